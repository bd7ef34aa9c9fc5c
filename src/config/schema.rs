//! Configuration schema definitions.
//!
//! This module defines the route table a navigation session is built from.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::backstack::{BackStackEntry, Destination, Transition};
use crate::routing::{lookup, ParameterBinding};

/// Root configuration for a navigation session.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Destination every composed stack is rooted at.
    pub home: DestinationConfig,

    /// Transition used when a link does not name one.
    pub default_transition: Transition,

    /// Deep links, in precedence order.
    pub links: Vec<LinkConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A destination template. Arg values may reference bindings as `{name}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DestinationConfig {
    /// Destination identity.
    pub id: String,

    /// Construction arguments.
    #[serde(default)]
    pub args: BTreeMap<String, String>,

    /// Transition applied when the entry becomes visible.
    #[serde(default)]
    pub enter: Option<Transition>,

    /// Transition applied when the entry is removed.
    #[serde(default)]
    pub exit: Option<Transition>,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            id: "home".to_string(),
            args: BTreeMap::new(),
            enter: None,
            exit: None,
        }
    }
}

impl DestinationConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Destination with `{name}` references replaced by bound values.
    pub fn destination(&self, bindings: &[ParameterBinding]) -> Destination {
        let args = self
            .args
            .iter()
            .map(|(key, value)| (key.clone(), substitute(value, bindings)))
            .collect();
        Destination {
            id: self.id.clone(),
            args,
        }
    }

    /// Stack entry for this template.
    pub fn instantiate(&self, bindings: &[ParameterBinding]) -> BackStackEntry {
        BackStackEntry {
            destination: self.destination(bindings),
            enter_transition: self.enter,
            exit_transition: self.exit,
        }
    }
}

/// How a link's destinations become the new stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    /// Home first, then the destinations.
    #[default]
    Replace,
    /// Exactly the destinations.
    Verbatim,
}

/// A deep link mapping a pattern to destinations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    /// Pattern such as `team/{teamId}/member/{memberId}`.
    pub pattern: String,

    #[serde(default)]
    pub mode: LinkMode,

    /// Overrides `default_transition` for this link.
    #[serde(default)]
    pub transition: Option<Transition>,

    /// Destinations, bottom to top.
    pub destinations: Vec<DestinationConfig>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Install the Prometheus recorder.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
        }
    }
}

/// Names referenced as `{name}` inside `value`.
pub fn placeholder_refs(value: &str) -> Vec<&str> {
    let mut refs = Vec::new();
    let mut rest = value;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                if end > 0 {
                    refs.push(&after[..end]);
                }
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    refs
}

/// Single left-to-right pass; bound values are written once and never
/// rescanned. Unknown references are copied as-is.
fn substitute(value: &str, bindings: &[ParameterBinding]) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            rest = &rest[start..];
            break;
        };
        let reference = &rest[start..start + end + 2];
        match lookup(bindings, &after[..end]) {
            Some(bound) => out.push_str(bound),
            None => out.push_str(reference),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
