pub mod commands;
pub mod init;
pub mod serve;

pub use commands::{Cli, Commands};
