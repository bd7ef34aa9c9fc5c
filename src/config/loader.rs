//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::info!(
        path = %path.display(),
        links = config.links.len(),
        home = %config.home.id,
        "Route table loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backstack::Transition;
    use crate::config::schema::LinkMode;

    const TABLE: &str = r#"
default_transition = "fade"

[home]
id = "home"

[[links]]
pattern = "master-detail/{item}"
mode = "replace"
transition = "horizontal_slide"

[[links.destinations]]
id = "master-detail-list"

[[links.destinations]]
id = "master-detail-item"
args = { index = "{item}" }
enter = "fade"

[[links]]
pattern = "transitions"
mode = "verbatim"

[[links.destinations]]
id = "home"
"#;

    #[test]
    fn test_parse_route_table() {
        let config = parse_config(TABLE).unwrap();
        assert_eq!(config.default_transition, Transition::Fade);
        assert_eq!(config.links.len(), 2);

        let first = &config.links[0];
        assert_eq!(first.mode, LinkMode::Replace);
        assert_eq!(first.transition, Some(Transition::HorizontalSlide));
        assert_eq!(first.destinations[1].args["index"], "{item}");
        assert_eq!(first.destinations[1].enter, Some(Transition::Fade));

        assert_eq!(config.links[1].mode, LinkMode::Verbatim);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.home.id, "home");
        assert!(config.links.is_empty());
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(parse_config("links = 3"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_error_lists_everything() {
        let err = parse_config(
            r#"
[[links]]
pattern = "a/{}"
destinations = [{ id = "a" }]

[[links]]
pattern = "b"
destinations = []
"#,
        )
        .unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().starts_with("Validation failed: link 0"));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/deeplink-routes.toml");
        assert!(matches!(load_config(path), Err(ConfigError::Io(_))));
    }
}
