//! Generation backend errors

use thiserror::Error;

/// Errors that can occur talking to a generation backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// API request failed with the given message
    #[error("{}", api_error_message(.message, .status_code))]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out after the specified duration (in seconds)
    #[error("Request timed out after {seconds} seconds")]
    TimeoutError { seconds: u64 },

    /// Generic error for other cases
    #[error("Error: {message}")]
    Other { message: String },
}

fn api_error_message(message: &str, status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!("API error ({}): {}", code, message),
        None => format!("API error: {}", message),
    }
}
