use super::profile::{Hints, Profile};
use crate::github::RepositoryData;

/// Languages interpolated into the prompt
pub const LANGUAGE_LIMIT: usize = 3;

/// Manifest dependency names interpolated into the prompt
pub const DEPENDENCY_LIMIT: usize = 5;

const LIST_SEPARATOR: &str = ", ";

/// A compiled prompt together with the length contract it was compiled for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    profile: Profile,
}

impl GenerationRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Hard cap the normalized response must satisfy
    pub fn max_length(&self) -> usize {
        self.profile.max_length()
    }
}

/// Compiles repository data and hints into a generation request.
///
/// The profile is picked from the hints (see [`Profile::select`]); the same
/// rule set renders both profiles.
pub fn compile(data: &RepositoryData, hints: &Hints) -> GenerationRequest {
    let profile = Profile::select(hints);

    let mut lines: Vec<String> = vec![
        "Generate a GitHub \"About\" description for the following repository.".to_string(),
        String::new(),
        "RULES:".to_string(),
        format!("- {}", profile.length_rule()),
        "- NO emojis or decorative symbols.".to_string(),
        "- NO marketing fluff.".to_string(),
        "- Practical and developer-friendly.".to_string(),
        format!("- Format: {}.", profile.format_rule()),
        "- Output ONLY the description text on a single line. No quotes.".to_string(),
        String::new(),
        "CONTEXT:".to_string(),
        format!("Repo Name: {}", data.name),
        format!(
            "Current Description: {}",
            data.current_description().unwrap_or("None")
        ),
        format!(
            "Languages: {}",
            data.top_languages(LANGUAGE_LIMIT).join(LIST_SEPARATOR)
        ),
        format!("Files: {}", data.file_structure.join(LIST_SEPARATOR)),
    ];

    let dependencies = data.dependency_names(DEPENDENCY_LIMIT);
    if !dependencies.is_empty() {
        lines.push(format!("Key Dependencies: {}", dependencies.join(LIST_SEPARATOR)));
    }

    lines.push(format!("README Snippet: {}", readme_snippet(data, profile)));

    if profile.includes_hints() {
        if let Some(features) = hints.features() {
            lines.push(format!("Key Features: {}", features));
        }
        if let Some(benefits) = hints.benefits() {
            lines.push(format!("Benefits: {}", benefits));
        }
    }

    lines.push(String::new());
    lines.push("DESCRIPTION:".to_string());

    GenerationRequest {
        prompt: lines.join("\n"),
        profile,
    }
}

fn readme_snippet(data: &RepositoryData, profile: Profile) -> String {
    match (data.readme_excerpt.as_deref(), profile.readme_limit()) {
        (Some(readme), Some(limit)) => readme.chars().take(limit).collect(),
        (Some(readme), None) => readme.to_string(),
        (None, _) => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> RepositoryData {
        RepositoryData {
            name: "react".to_string(),
            description: Some("The library for web and native user interfaces.".to_string()),
            languages: vec![
                "JavaScript".into(),
                "TypeScript".into(),
                "HTML".into(),
                "CSS".into(),
            ],
            file_structure: vec!["packages".into(), "package.json".into(), "README.md".into()],
            package_manifest: json!({
                "dependencies": {"a": "1", "b": "1", "c": "1", "d": "1", "e": "1", "f": "1"}
            })
            .as_object()
            .cloned(),
            readme_excerpt: Some("R".repeat(800)),
        }
    }

    #[test]
    fn test_terse_prompt_contents() {
        let request = compile(&sample_data(), &Hints::none());
        let prompt = request.prompt();

        assert_eq!(request.profile(), Profile::Terse);
        assert_eq!(request.max_length(), 160);
        assert!(prompt.contains("Max 160 characters."));
        assert!(prompt.contains("Repo Name: react"));
        assert!(prompt.contains("Current Description: The library for web and native user interfaces."));
        assert!(prompt.contains("Languages: JavaScript, TypeScript, HTML\n"));
        assert!(prompt.contains("Files: packages, package.json, README.md"));
        assert!(prompt.contains("Key Dependencies: a, b, c, d, e\n"));
        assert!(prompt.contains("Format: [Brief Purpose] + [Main Tech Stack]."));
        assert!(!prompt.contains("Key Features"));
        assert!(prompt.ends_with("DESCRIPTION:"));
    }

    #[test]
    fn test_terse_readme_capped() {
        let request = compile(&sample_data(), &Hints::none());
        let snippet_line = request
            .prompt()
            .lines()
            .find(|line| line.starts_with("README Snippet: "))
            .unwrap();
        assert_eq!(snippet_line.len(), "README Snippet: ".len() + 300);
    }

    #[test]
    fn test_extended_prompt_contents() {
        let hints = Hints::new(Some("real-time sync".into()), Some("speed".into()));
        let request = compile(&sample_data(), &hints);
        let prompt = request.prompt();

        assert_eq!(request.profile(), Profile::Extended);
        assert_eq!(request.max_length(), 300);
        assert!(prompt.contains("between 280 and 299 characters"));
        assert!(prompt.contains("[Value Proposition]"));
        assert!(prompt.contains("Key Features: real-time sync"));
        assert!(prompt.contains("Benefits: speed"));
        assert!(prompt.contains(&"R".repeat(800)));
    }

    #[test]
    fn test_missing_optional_fields() {
        let request = compile(&RepositoryData::named("bare-repo"), &Hints::none());
        let prompt = request.prompt();

        assert!(prompt.contains("Current Description: None"));
        assert!(prompt.contains("README Snippet: N/A"));
        assert!(!prompt.contains("Key Dependencies"));
    }

    #[test]
    fn test_repository_name_always_verbatim() {
        for name in ["a", "weird.name-with_chars", "ünïcödé", "x".repeat(200).as_str()] {
            let data = RepositoryData::named(name);
            assert!(compile(&data, &Hints::none()).prompt().contains(name));
            let hints = Hints::new(Some("f".into()), None);
            assert!(compile(&data, &hints).prompt().contains(name));
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let hints = Hints::new(None, Some("fewer allocations".into()));
        assert_eq!(compile(&sample_data(), &hints), compile(&sample_data(), &hints));
    }

    #[test]
    fn test_only_benefits_hint() {
        let hints = Hints::new(None, Some("speed".into()));
        let prompt = compile(&sample_data(), &hints).prompt().to_string();
        assert!(prompt.contains("Benefits: speed"));
        assert!(!prompt.contains("Key Features"));
    }
}
