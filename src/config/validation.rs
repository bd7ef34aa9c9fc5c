//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every link pattern parses
//! - Check destination templates only reference declared placeholders
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Duplicate patterns are not errors; registration keeps the first

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{placeholder_refs, DestinationConfig, RouterConfig};
use crate::routing::{PatternParseError, RoutePattern};

/// A single semantic problem in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("link {index}: {source}")]
    Pattern {
        index: usize,
        #[source]
        source: PatternParseError,
    },

    #[error("link {index} ({pattern}): no destinations")]
    NoDestinations { index: usize, pattern: String },

    #[error("{location}: destination id is empty")]
    EmptyDestinationId { location: String },

    #[error("link {index} ({pattern}): arg {arg:?} references undeclared placeholder {{{name}}}")]
    UndeclaredPlaceholder {
        index: usize,
        pattern: String,
        arg: String,
        name: String,
    },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.home.id.trim().is_empty() {
        errors.push(ValidationError::EmptyDestinationId {
            location: "home".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (index, link) in config.links.iter().enumerate() {
        if !seen.insert(link.pattern.as_str()) {
            tracing::warn!(pattern = %link.pattern, index, "Duplicate link pattern, first one wins");
        }

        if link.destinations.is_empty() {
            errors.push(ValidationError::NoDestinations {
                index,
                pattern: link.pattern.clone(),
            });
        }

        for destination in &link.destinations {
            if destination.id.trim().is_empty() {
                errors.push(ValidationError::EmptyDestinationId {
                    location: format!("link {} ({})", index, link.pattern),
                });
            }
        }

        match RoutePattern::parse(&link.pattern) {
            Ok(pattern) => {
                let declared: HashSet<&str> = pattern.placeholders().collect();
                check_references(index, &link.pattern, &link.destinations, &declared, &mut errors);
            }
            Err(source) => errors.push(ValidationError::Pattern { index, source }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_references(
    index: usize,
    pattern: &str,
    destinations: &[DestinationConfig],
    declared: &HashSet<&str>,
    errors: &mut Vec<ValidationError>,
) {
    for destination in destinations {
        for (arg, value) in &destination.args {
            for name in placeholder_refs(value) {
                if !declared.contains(name) {
                    errors.push(ValidationError::UndeclaredPlaceholder {
                        index,
                        pattern: pattern.to_string(),
                        arg: arg.clone(),
                        name: name.to_string(),
                    });
                }
            }
        }
    }
}
