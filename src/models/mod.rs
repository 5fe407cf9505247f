pub mod record;
pub mod severity;

pub use record::{ScanRecord, VulnerabilityRecord};
pub use severity::Severity;
