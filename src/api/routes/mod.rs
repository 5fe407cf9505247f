pub mod health;
pub mod scans;
pub mod stats;
pub mod vulnerabilities;
