use aboutgen::cli::commands::{CliArgs, Commands};
use aboutgen::cli::handlers::{handle_generate, handle_serve};
use aboutgen::util::{init_logging, LoggingConfig};
use aboutgen::VERSION;

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_args(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("aboutgen v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args).await,
        Commands::Serve(serve_args) => handle_serve(serve_args).await,
    };

    std::process::exit(exit_code);
}
