pub mod api;
pub mod cli;
pub mod errors;
pub mod models;
pub mod query;
pub mod stats;
pub mod store;
