//! Route pattern parsing and segment matching.
//!
//! # Responsibilities
//! - Parse a pattern string into literal and placeholder segments
//! - Collect declared query parameter names (advisory only)
//! - Match a decoded path against a pattern, producing ordered bindings
//!
//! # Design Decisions
//! - Arity must match exactly: no wildcard, variadic or optional segments
//! - Literal matching is case-sensitive
//! - Placeholder names drop exactly the surrounding braces
//! - No regex to guarantee O(n) matching

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::routing::uri;

/// Errors raised when a pattern string cannot be registered.
#[derive(Debug, Error)]
pub enum PatternParseError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern {pattern:?} is not a valid URI: {source}")]
    InvalidUri {
        pattern: String,
        #[source]
        source: url::ParseError,
    },

    #[error("pattern {pattern:?} has no path segments")]
    NoPathSegments { pattern: String },

    #[error("pattern {pattern:?} has an unnamed placeholder at segment {position}")]
    EmptyPlaceholder { pattern: String, position: usize },
}

/// A single token of a pattern path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the incoming segment exactly.
    Literal(String),
    /// Matches any single segment and binds it to the name.
    Placeholder(String),
}

impl Segment {
    /// Classify a decoded path token. Returns `None` for `{}`.
    fn classify(token: &str) -> Option<Self> {
        match token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
            Some("") => None,
            Some(name) => Some(Segment::Placeholder(name.to_string())),
            None => Some(Segment::Literal(token.to_string())),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Placeholder(name) => write!(f, "{{{}}}", name),
        }
    }
}

/// A placeholder name bound to the incoming segment at its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterBinding {
    pub key: String,
    pub value: String,
}

impl ParameterBinding {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Value of the first binding named `key`.
pub fn lookup<'a>(bindings: &'a [ParameterBinding], key: &str) -> Option<&'a str> {
    bindings
        .iter()
        .find(|b| b.key == key)
        .map(|b| b.value.as_str())
}

/// A parsed route pattern. Identity is the raw string.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    parameter_names: BTreeSet<String>,
}

impl RoutePattern {
    /// Parse a pattern such as `team/{teamId}/member/{memberId}?tab=info`.
    pub fn parse(raw: &str) -> Result<Self, PatternParseError> {
        if raw.trim().is_empty() {
            return Err(PatternParseError::Empty);
        }

        let parts = uri::parse(raw).map_err(|source| PatternParseError::InvalidUri {
            pattern: raw.to_string(),
            source,
        })?;

        if parts.segments.is_empty() {
            return Err(PatternParseError::NoPathSegments {
                pattern: raw.to_string(),
            });
        }

        let segments = parts
            .segments
            .iter()
            .enumerate()
            .map(|(position, token)| {
                Segment::classify(token).ok_or_else(|| PatternParseError::EmptyPlaceholder {
                    pattern: raw.to_string(),
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
            parameter_names: parts.query_names.into_iter().collect(),
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Query parameter names declared on the pattern. Never enforced.
    pub fn parameter_names(&self) -> &BTreeSet<String> {
        &self.parameter_names
    }

    pub fn arity(&self) -> usize {
        self.segments.len()
    }

    /// Placeholder names in left-to-right order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match decoded path segments, returning bindings on a full match.
    pub fn match_segments(&self, path: &[String]) -> Option<Vec<ParameterBinding>> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut bindings = Vec::new();
        for (segment, incoming) in self.segments.iter().zip(path) {
            match segment {
                Segment::Placeholder(name) => {
                    bindings.push(ParameterBinding::new(name.as_str(), incoming.as_str()));
                }
                Segment::Literal(text) if text == incoming => {}
                Segment::Literal(_) => return None,
            }
        }
        Some(bindings)
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for RoutePattern {}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_segments() {
        let pattern = RoutePattern::parse("/team/{teamId}/member/{memberId}").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("team".into()),
                Segment::Placeholder("teamId".into()),
                Segment::Literal("member".into()),
                Segment::Placeholder("memberId".into()),
            ]
        );
        assert_eq!(pattern.placeholders().collect::<Vec<_>>(), vec!["teamId", "memberId"]);
    }

    #[test]
    fn test_placeholder_name_keeps_last_char() {
        let pattern = RoutePattern::parse("user/{id}").unwrap();
        assert_eq!(pattern.placeholders().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_query_names_are_collected() {
        let pattern = RoutePattern::parse("search/{term}?page=1&sort=asc").unwrap();
        assert!(pattern.parameter_names().contains("page"));
        assert!(pattern.parameter_names().contains("sort"));
        assert_eq!(pattern.arity(), 2);
    }

    #[test]
    fn test_malformed_patterns() {
        assert!(matches!(RoutePattern::parse(""), Err(PatternParseError::Empty)));
        assert!(matches!(
            RoutePattern::parse("http://[::1"),
            Err(PatternParseError::InvalidUri { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("myapp://host"),
            Err(PatternParseError::NoPathSegments { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("user/{}"),
            Err(PatternParseError::EmptyPlaceholder { position: 1, .. })
        ));
    }

    #[test]
    fn test_lone_brace_is_literal() {
        let pattern = RoutePattern::parse("a/{").unwrap();
        assert_eq!(pattern.segments()[1], Segment::Literal("{".into()));
    }

    #[test]
    fn test_match_binds_in_order() {
        let pattern = RoutePattern::parse("/team/{teamId}/member/{memberId}").unwrap();
        let bindings = pattern.match_segments(&path(&["team", "42", "member", "7"])).unwrap();
        assert_eq!(
            bindings,
            vec![
                ParameterBinding::new("teamId", "42"),
                ParameterBinding::new("memberId", "7"),
            ]
        );
        assert_eq!(lookup(&bindings, "memberId"), Some("7"));
    }

    #[test]
    fn test_arity_and_case() {
        let pattern = RoutePattern::parse("/a/{b}").unwrap();
        assert!(pattern.match_segments(&path(&["a", "b", "c"])).is_none());
        assert!(pattern.match_segments(&path(&["a"])).is_none());
        assert!(pattern.match_segments(&path(&["A", "b"])).is_none());
    }

    #[test]
    fn test_duplicate_keys_kept() {
        let pattern = RoutePattern::parse("{x}/{x}").unwrap();
        let bindings = pattern.match_segments(&path(&["1", "2"])).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(lookup(&bindings, "x"), Some("1"));
    }

    #[test]
    fn test_identity_is_raw_string() {
        let a = RoutePattern::parse("/user/{id}").unwrap();
        let b = RoutePattern::parse("user/{id}").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, RoutePattern::parse("/user/{id}").unwrap());
    }
}
