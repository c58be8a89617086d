//! Channel abstraction for user I/O.

pub mod cli;
pub mod command;

pub use cli::{CliChannel, LineStream, Reply};
pub use command::Command;
