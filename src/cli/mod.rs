mod commands;

pub use commands::{BuildArgs, Cli, Commands, SourceArgs};
