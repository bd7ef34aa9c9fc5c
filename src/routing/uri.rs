//! URI decomposition shared by pattern parsing and dispatch.
//!
//! # Design Decisions
//! - `url` validates the input; segments come from the raw path so `.`, `..`
//!   and `\` stay ordinary characters and arity is never changed
//! - Relative references (`navigation`, `/user/{id}`) need no scheme
//! - Path segments are percent-decoded; empty segments are skipped
//! - Input is taken verbatim: surrounding whitespace is part of the segments
//! - Scheme, host and fragment never take part in matching

use percent_encoding::percent_decode_str;
use url::{form_urlencoded, Url};

const LOCAL_BASE: &str = "deeplink://local/";

/// Path segments and query parameter names of a parsed URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriParts {
    pub segments: Vec<String>,
    pub query_names: Vec<String>,
}

/// Parse `raw` as an absolute URI or a relative reference.
pub fn parse(raw: &str) -> Result<UriParts, url::ParseError> {
    match Url::parse(raw) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(LOCAL_BASE)?.join(raw)?;
        }
        other => {
            other?;
        }
    }

    let without_fragment = raw.split('#').next().unwrap_or_default();
    let (reference, query) = match without_fragment.split_once('?') {
        Some((reference, query)) => (reference, Some(query)),
        None => (without_fragment, None),
    };

    let segments = raw_path(reference)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect();

    let mut query_names: Vec<String> = Vec::new();
    for (name, _) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        if !query_names.iter().any(|n| *n == name) {
            query_names.push(name.into_owned());
        }
    }

    Ok(UriParts {
        segments,
        query_names,
    })
}

/// Path of a reference with scheme and authority removed. Opaque URIs
/// (`mailto:someone`) have no path.
fn raw_path(reference: &str) -> &str {
    let rest = match split_scheme(reference) {
        Some(rest) if !rest.starts_with('/') => return "",
        Some(rest) => rest,
        None => reference,
    };
    match rest.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path
            .find('/')
            .map(|i| &authority_and_path[i..])
            .unwrap_or_default(),
        None => rest,
    }
}

/// Remainder after `scheme:`, if `reference` starts with a scheme.
fn split_scheme(reference: &str) -> Option<&str> {
    let (scheme, rest) = reference.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(rest)
}

/// Path segments of an incoming URI, or `None` when it has none to match.
pub fn path_segments(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }
    match parse(raw) {
        Ok(parts) if !parts.segments.is_empty() => Some(parts.segments),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(uri = %raw, error = %e, "Unparseable deep link");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_and_absolute() {
        let parts = parse("team/42").unwrap();
        assert_eq!(parts.segments, vec!["team", "42"]);

        let parts = parse("myapp://host/team/42?tab=info#top").unwrap();
        assert_eq!(parts.segments, vec!["team", "42"]);
        assert_eq!(parts.query_names, vec!["tab"]);
    }

    #[test]
    fn test_placeholder_braces_survive() {
        let parts = parse("/user/{id}?tab=x&tab=y&sort=asc").unwrap();
        assert_eq!(parts.segments, vec!["user", "{id}"]);
        assert_eq!(parts.query_names, vec!["tab", "sort"]);
    }

    #[test]
    fn test_empty_segments_skipped() {
        assert_eq!(path_segments("/a//b/"), Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(path_segments("/tag/hello%20world"), Some(vec!["tag".to_string(), "hello world".to_string()]));
    }

    #[test]
    fn test_pathless_inputs() {
        assert_eq!(path_segments(""), None);
        assert_eq!(path_segments("myapp://host"), None);
        assert_eq!(path_segments("myapp://host/"), None);
        assert_eq!(path_segments("mailto:someone"), None);
        assert_eq!(path_segments("myapp://host?x=1#/frag"), None);
    }

    #[test]
    fn test_dot_segments_are_kept() {
        assert_eq!(
            path_segments("/a/../dir/x"),
            Some(vec!["a".to_string(), "..".to_string(), "dir".to_string(), "x".to_string()])
        );
        assert_eq!(
            path_segments("myapp://host/./x"),
            Some(vec![".".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_backslash_is_not_a_separator() {
        assert_eq!(
            path_segments("http://example.com/dir\\x"),
            Some(vec!["dir\\x".to_string()])
        );
    }

    #[test]
    fn test_encoded_braces_decode_into_segments() {
        assert_eq!(
            path_segments("pair/%7Bb%7D/x"),
            Some(vec!["pair".to_string(), "{b}".to_string(), "x".to_string()])
        );
        assert_eq!(path_segments("/a%2Fb"), Some(vec!["a/b".to_string()]));
    }

    #[test]
    fn test_surrounding_whitespace_is_kept() {
        assert_eq!(path_segments(" /a "), Some(vec![" ".to_string(), "a ".to_string()]));
    }

    #[test]
    fn test_unparseable_input() {
        assert_eq!(path_segments("http://[::1/a"), None);
    }
}
