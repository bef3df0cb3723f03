use clap::{Parser, Subcommand, ValueEnum};

/// Generate GitHub "About" descriptions from repository metadata
#[derive(Parser, Debug)]
#[command(
    name = "aboutgen",
    about = "Generate GitHub \"About\" descriptions from repository metadata",
    version,
    author,
    long_about = "aboutgen reads a public GitHub repository's metadata, languages, top-level \
                  files, package manifest and README, then asks a Gemini model for a short, \
                  developer-facing \"About\" description."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate a description for a repository",
        long_about = "Fetches repository metadata from the GitHub API and generates a description.\n\
                      Supplying --features or --benefits switches to the longer three-part format.\n\n\
                      Examples:\n  \
                      aboutgen generate https://github.com/facebook/react\n  \
                      aboutgen generate https://github.com/owner/repo --features \"real-time sync\" --benefits speed\n  \
                      aboutgen generate https://github.com/owner/repo --format json"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Serve the generate endpoint over HTTP",
        long_about = "Starts an HTTP server exposing POST /api/generate and GET /healthz.\n\n\
                      Examples:\n  \
                      aboutgen serve\n  \
                      aboutgen serve --bind 0.0.0.0:8080"
    )]
    Serve(ServeArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(value_name = "URL", help = "GitHub repository URL")]
    pub url: String,

    #[arg(long, value_name = "TEXT", help = "Key features to highlight")]
    pub features: Option<String>,

    #[arg(long, value_name = "TEXT", help = "Benefits to highlight")]
    pub benefits: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Generation model (defaults to ABOUTGEN_MODEL or gemini-2.5-flash)"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Transport timeout in seconds (defaults to ABOUTGEN_REQUEST_TIMEOUT or 30)"
    )]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[arg(
        long,
        value_name = "ADDR",
        help = "Listen address (defaults to ABOUTGEN_BIND or 127.0.0.1:3000)"
    )]
    pub bind: Option<String>,

    #[arg(short = 'm', long, value_name = "MODEL", help = "Generation model")]
    pub model: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_generate_args() {
        let args = CliArgs::parse_from(["aboutgen", "generate", "https://github.com/a/b"]);
        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(generate.url, "https://github.com/a/b");
                assert_eq!(generate.format, OutputFormatArg::Human);
                assert!(generate.features.is_none());
                assert!(generate.benefits.is_none());
                assert!(generate.model.is_none());
                assert!(generate.timeout.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let args = CliArgs::parse_from([
            "aboutgen",
            "generate",
            "https://github.com/a/b",
            "--features",
            "real-time sync",
            "--benefits",
            "speed",
            "--format",
            "json",
            "--model",
            "gemini-2.0-flash",
            "--timeout",
            "90",
        ]);

        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(generate.features.as_deref(), Some("real-time sync"));
                assert_eq!(generate.benefits.as_deref(), Some("speed"));
                assert_eq!(generate.format, OutputFormatArg::Json);
                assert_eq!(generate.model.as_deref(), Some("gemini-2.0-flash"));
                assert_eq!(generate.timeout, Some(90));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_requires_url() {
        assert!(CliArgs::try_parse_from(["aboutgen", "generate"]).is_err());
    }

    #[test]
    fn test_serve_command() {
        let args = CliArgs::parse_from(["aboutgen", "serve", "--bind", "0.0.0.0:8080"]);
        match args.command {
            Commands::Serve(serve) => assert_eq!(serve.bind.as_deref(), Some("0.0.0.0:8080")),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["aboutgen", "-v", "serve"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["aboutgen", "--log-level", "debug", "serve"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));

        assert!(CliArgs::try_parse_from(["aboutgen", "-v", "-q", "serve"]).is_err());
    }
}
