//! Command handlers; each returns the process exit code

use super::commands::{GenerateArgs, ServeArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::AboutgenConfig;
use crate::error::ErrorKind;
use crate::pipeline::DescriptionPipeline;
use crate::progress::LoggingHandler;
use crate::prompt::Hints;
use crate::server;
use std::sync::Arc;
use tracing::{debug, error};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_URL: i32 = 2;

/// Loads configuration from the environment and applies `generate` overrides
pub fn generate_config(args: &GenerateArgs) -> AboutgenConfig {
    let mut config = AboutgenConfig::default();
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    config
}

/// Loads configuration from the environment and applies `serve` overrides
pub fn serve_config(args: &ServeArgs) -> AboutgenConfig {
    let mut config = AboutgenConfig::default();
    if let Some(bind) = &args.bind {
        config.bind = bind.clone();
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    config
}

fn build_pipeline(config: &AboutgenConfig) -> Option<DescriptionPipeline> {
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return None;
    }
    debug!("{}", config);

    match DescriptionPipeline::from_config(config) {
        Ok(pipeline) => Some(pipeline.with_progress(Arc::new(LoggingHandler))),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

pub async fn handle_generate(args: &GenerateArgs) -> i32 {
    let config = generate_config(args);
    let Some(pipeline) = build_pipeline(&config) else {
        return EXIT_FAILURE;
    };

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let hints = Hints::new(args.features.clone(), args.benefits.clone());

    match pipeline.run(&args.url, &hints).await {
        Ok(output) => match formatter.format_output(&output) {
            Ok(text) => {
                println!("{}", text.trim_end());
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_FAILURE
            }
        },
        Err(pipeline_error) => {
            match formatter.format_error(&pipeline_error) {
                Ok(text) if formatter.format() == OutputFormat::Json => println!("{}", text),
                Ok(text) => eprintln!("{}", text),
                Err(e) => eprintln!("Error: {:#}", e),
            }
            exit_code_for(pipeline_error.kind())
        }
    }
}

pub async fn handle_serve(args: &ServeArgs) -> i32 {
    let config = serve_config(args);
    let Some(pipeline) = build_pipeline(&config) else {
        return EXIT_FAILURE;
    };

    match server::serve(pipeline, &config.bind).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

pub fn exit_code_for(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::InvalidUrl => EXIT_INVALID_URL,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;

    fn generate_args() -> GenerateArgs {
        GenerateArgs {
            url: "https://github.com/a/b".to_string(),
            features: None,
            benefits: None,
            format: OutputFormatArg::Human,
            model: Some("gemini-2.0-flash".to_string()),
            timeout: Some(45),
        }
    }

    #[test]
    fn test_generate_overrides() {
        let config = generate_config(&generate_args());
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.request_timeout_secs, 45);
    }

    #[test]
    fn test_serve_overrides() {
        let config = serve_config(&ServeArgs {
            bind: Some("0.0.0.0:9000".to_string()),
            model: None,
        });
        assert_eq!(config.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(ErrorKind::InvalidUrl), EXIT_INVALID_URL);
        assert_eq!(exit_code_for(ErrorKind::RateLimited), EXIT_FAILURE);
        assert_eq!(exit_code_for(ErrorKind::RepoPrivate), EXIT_FAILURE);
    }

    #[tokio::test]
    async fn test_invalid_timeout_fails_before_network() {
        let mut args = generate_args();
        args.timeout = Some(0);
        assert_eq!(handle_generate(&args).await, EXIT_FAILURE);
    }
}
