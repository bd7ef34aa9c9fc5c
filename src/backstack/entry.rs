//! Destinations, transitions and back stack values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Strategy the host applies when an entry is pushed or popped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Fade,
    #[default]
    SimpleSwap,
    HorizontalSlide,
    VerticalSlide,
}

/// Opaque descriptor of a navigable unit: identity plus construction args.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, String>,
}

impl Destination {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            args: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }
}

/// One level of navigation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackStackEntry {
    pub destination: Destination,
    /// Applied when this entry becomes visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter_transition: Option<Transition>,
    /// Applied when this entry is removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_transition: Option<Transition>,
}

impl BackStackEntry {
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            enter_transition: None,
            exit_transition: None,
        }
    }

    pub fn with_enter(mut self, transition: Transition) -> Self {
        self.enter_transition = Some(transition);
        self
    }

    pub fn with_exit(mut self, transition: Transition) -> Self {
        self.exit_transition = Some(transition);
        self
    }

    /// Use `transition` for both enter and exit.
    pub fn with_transition(self, transition: Transition) -> Self {
        self.with_enter(transition).with_exit(transition)
    }

    /// Fill unset transitions, keeping explicit ones.
    pub(crate) fn or_transition(mut self, transition: Transition) -> Self {
        self.enter_transition.get_or_insert(transition);
        self.exit_transition.get_or_insert(transition);
        self
    }
}

impl From<Destination> for BackStackEntry {
    fn from(destination: Destination) -> Self {
        Self::new(destination)
    }
}

/// Ordered history, bottom to top. Index 0 is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BackStack {
    entries: Vec<BackStackEntry>,
}

impl BackStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&BackStackEntry> {
        self.entries.first()
    }

    /// The visible entry.
    pub fn top(&self) -> Option<&BackStackEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BackStackEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BackStackEntry> {
        self.entries.iter()
    }

    /// Destination ids, bottom to top.
    pub fn ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.destination.id.as_str())
            .collect()
    }

    pub fn pop(&mut self) -> Option<BackStackEntry> {
        self.entries.pop()
    }

    pub fn into_entries(self) -> Vec<BackStackEntry> {
        self.entries
    }
}

impl From<Vec<BackStackEntry>> for BackStack {
    fn from(entries: Vec<BackStackEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<BackStackEntry> for BackStack {
    fn from_iter<I: IntoIterator<Item = BackStackEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BackStack {
    type Item = &'a BackStackEntry;
    type IntoIter = std::slice::Iter<'a, BackStackEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
