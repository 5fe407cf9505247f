use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DashError;

/// Severity level for a vulnerability finding, ordered from most to least
/// severe. Ranking MUST go through [`Severity::rank`]; sorting the string
/// form is lexicographic ("critical" < "high" < "info") and silently wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Returns a numeric rank where lower values indicate higher severity.
    /// Critical = 0, High = 1, Medium = 2, Low = 3, Info = 4.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
            Severity::Info => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }
}

impl FromStr for Severity {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            "info" => Ok(Severity::Info),
            other => Err(DashError::Query(format!("Unknown severity: {}", other))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_orders_most_severe_first() {
        assert!(Severity::Critical.rank() < Severity::High.rank());
        assert!(Severity::High.rank() < Severity::Medium.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
        assert!(Severity::Low.rank() < Severity::Info.rank());
    }

    #[test]
    fn test_rank_disagrees_with_lexicographic_order() {
        // "high" < "info" lexicographically, but high is the more severe of
        // the two; same for "critical" vs "high".
        assert!("high" < "info");
        assert!(Severity::High.rank() < Severity::Info.rank());
        assert!("critical" < "high");
        assert!(Severity::Critical.rank() < Severity::High.rank());
    }

    #[test]
    fn test_parse_round_trip() {
        for s in ["critical", "high", "medium", "low", "info"] {
            assert_eq!(s.parse::<Severity>().unwrap().as_str(), s);
        }
        assert!("CRITICAL".parse::<Severity>().is_err());
        assert!("urgent".parse::<Severity>().is_err());
    }
}
