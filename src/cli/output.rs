//! Output formatting for generate results
//!
//! JSON output is the same envelope the HTTP endpoint returns; human output is
//! a short report with the description on its own line.

use crate::api::GenerateResponse;
use crate::error::PipelineError;
use crate::pipeline::PipelineOutput;
use crate::prompt::LANGUAGE_LIMIT;
use anyhow::{Context, Result};

const RULE_WIDTH: usize = 42;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Response envelope as pretty JSON
    Json,
    /// Human-readable report
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn format_output(&self, output: &PipelineOutput) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&GenerateResponse::from_output(output)),
            OutputFormat::Human => Ok(format_human(output)),
        }
    }

    pub fn format_error(&self, error: &PipelineError) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&GenerateResponse::from_error(error)),
            OutputFormat::Human => Ok(error.help_message()),
        }
    }
}

fn to_json(response: &GenerateResponse) -> Result<String> {
    serde_json::to_string_pretty(response).context("Failed to serialize response to JSON")
}

fn format_human(output: &PipelineOutput) -> String {
    let text = &output.description.text;
    let languages = output.repository.top_languages(LANGUAGE_LIMIT);

    let mut out = String::new();
    out.push_str(&format!("\u{2713} About: {}\n", output.repository.name));
    out.push_str(&"\u{2501}".repeat(RULE_WIDTH));
    out.push_str("\n\n");
    out.push_str(text);
    out.push_str("\n\n");
    out.push_str(&format!(
        "Length:     {}/{} ({})\n",
        text.chars().count(),
        output.profile.max_length(),
        output.profile
    ));
    if languages.is_empty() {
        out.push_str("Languages:  (none reported)\n");
    } else {
        out.push_str(&format!("Languages:  {}\n", languages.join(", ")));
    }
    out
}
