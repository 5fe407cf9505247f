pub mod types;

pub use types::DashError;
