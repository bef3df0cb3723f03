use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text hints a caller may supply to steer the description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
}

impl Hints {
    /// Builds hints, treating blank strings as absent
    pub fn new(features: Option<String>, benefits: Option<String>) -> Self {
        Self {
            features: clean(features),
            benefits: clean(benefits),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        clean(self.features.clone()).is_none() && clean(self.benefits.clone()).is_none()
    }

    pub fn features(&self) -> Option<&str> {
        self.features.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn benefits(&self) -> Option<&str> {
        self.benefits.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Length and structure calibration for one generation request.
///
/// `Terse` is a two-part description capped at 160 characters. `Extended`
/// aims for 280-299 characters in three parts and is chosen whenever the
/// caller supplies hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Terse,
    Extended,
}

impl Profile {
    /// Terse without hints, extended with any
    pub fn select(hints: &Hints) -> Self {
        if hints.is_empty() {
            Profile::Terse
        } else {
            Profile::Extended
        }
    }

    /// Hard cap on the normalized output, in characters
    pub fn max_length(self) -> usize {
        match self {
            Profile::Terse => 160,
            Profile::Extended => 300,
        }
    }

    /// Inclusive target range the model is asked to hit, if any
    pub fn target_range(self) -> Option<(usize, usize)> {
        match self {
            Profile::Terse => None,
            Profile::Extended => Some((280, 299)),
        }
    }

    /// README characters interpolated into the prompt; `None` keeps the full excerpt
    pub fn readme_limit(self) -> Option<usize> {
        match self {
            Profile::Terse => Some(300),
            Profile::Extended => None,
        }
    }

    pub fn format_rule(self) -> &'static str {
        match self {
            Profile::Terse => "[Brief Purpose] + [Main Tech Stack]",
            Profile::Extended => "[Brief Purpose] + [Main Tech Stack] + [Value Proposition]",
        }
    }

    pub fn length_rule(self) -> String {
        match self.target_range() {
            Some((low, high)) => format!(
                "Length: between {} and {} characters. Never exceed {} characters.",
                low,
                high,
                self.max_length()
            ),
            None => format!("Max {} characters.", self.max_length()),
        }
    }

    pub fn includes_hints(self) -> bool {
        matches!(self, Profile::Extended)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Terse => write!(f, "terse"),
            Profile::Extended => write!(f, "extended"),
        }
    }
}
