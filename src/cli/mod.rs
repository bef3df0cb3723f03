pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, GenerateArgs, OutputFormatArg, ServeArgs};
pub use output::{OutputFormat, OutputFormatter};
