//! Navigation session: one registry, one composer, one sink.
//!
//! # Responsibilities
//! - Register deep links whose handlers compose back stacks
//! - Open incoming URIs, falling back to a home root when nothing matches
//!   and the host has no stack yet
//! - Pop the visible entry on back
//!
//! # Design Decisions
//! - Explicitly owned per session; no process-wide registry
//! - Unmatched URIs never disturb an existing stack

use std::path::Path;

use crate::backstack::{
    BackStackComposer, BackStackEntry, BackStackSink, Destination, SinkUnavailableError, Transition,
};
use crate::config::{load_config, LinkConfig, LinkMode, RouterConfig};
use crate::error::Error;
use crate::routing::{ParameterBinding, PatternParseError, Registry, RouteMatch};

/// Outcome of a deep link handler.
pub type LinkResult = Result<(), SinkUnavailableError>;

/// What handlers get to work with.
#[derive(Debug)]
pub struct Session<S> {
    composer: BackStackComposer,
    sink: S,
}

impl<S: BackStackSink> Session<S> {
    pub fn composer(&self) -> &BackStackComposer {
        &self.composer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn replace_with(&self, target: BackStackEntry, transition: Transition) -> LinkResult {
        self.composer.replace_with(&self.sink, target, transition)
    }

    pub fn replace_with_all<I>(&self, entries: I, transition: Transition) -> LinkResult
    where
        I: IntoIterator<Item = BackStackEntry>,
    {
        self.composer.replace_with_all(&self.sink, entries, transition)
    }

    pub fn submit_verbatim<I>(&self, entries: I, transition: Transition) -> LinkResult
    where
        I: IntoIterator<Item = BackStackEntry>,
    {
        self.composer.submit_verbatim(&self.sink, entries, transition)
    }
}

/// Result of [`Navigator::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A registered link handled the URI.
    Routed { pattern: String },
    /// Nothing matched and the host had no stack, so home became the root.
    Fallback,
    /// Nothing matched and the existing stack was left alone.
    Ignored,
}

/// Deep link navigator for one session.
pub struct Navigator<S> {
    registry: Registry<Session<S>, LinkResult>,
    session: Session<S>,
    default_transition: Transition,
}

impl<S: BackStackSink + 'static> Navigator<S> {
    pub fn new(home: Destination, sink: S) -> Self {
        Self {
            registry: Registry::new(),
            session: Session {
                composer: BackStackComposer::new(home),
                sink,
            },
            default_transition: Transition::default(),
        }
    }

    pub fn with_default_transition(mut self, transition: Transition) -> Self {
        self.default_transition = transition;
        self
    }

    /// Build a navigator with every configured link registered.
    pub fn from_config(config: &RouterConfig, sink: S) -> Result<Self, PatternParseError> {
        let home = config.home.destination(&[]);
        let mut navigator = Self::new(home, sink).with_default_transition(config.default_transition);
        for link in &config.links {
            navigator.register_link(link.clone())?;
        }

        tracing::info!(
            links = navigator.registry.len(),
            home = %navigator.session.composer.home().id,
            "Navigator ready"
        );
        Ok(navigator)
    }

    /// Load a route table and build a navigator from it.
    pub fn from_config_file(path: &Path, sink: S) -> Result<Self, Error> {
        let config = load_config(path)?;
        Ok(Self::from_config(&config, sink)?)
    }

    /// Register a handler for `pattern`. Returns `Ok(false)` for a duplicate.
    pub fn register<F>(&mut self, pattern: &str, handler: F) -> Result<bool, PatternParseError>
    where
        F: Fn(&mut Session<S>, &[ParameterBinding]) -> LinkResult + Send + Sync + 'static,
    {
        self.registry.register(pattern, handler)
    }

    fn register_link(&mut self, link: LinkConfig) -> Result<bool, PatternParseError> {
        let transition = link.transition.unwrap_or(self.default_transition);
        let pattern = link.pattern.clone();
        self.register(&pattern, move |session, bindings| {
            let entries = link.destinations.iter().map(|d| d.instantiate(bindings));
            match link.mode {
                LinkMode::Replace => session.replace_with_all(entries, transition),
                LinkMode::Verbatim => session.submit_verbatim(entries, transition),
            }
        })
    }

    /// Route `uri`, or root the host at home if it has nothing to show.
    pub fn open(&mut self, uri: &str) -> Result<OpenOutcome, SinkUnavailableError> {
        if let Some(dispatched) = self.registry.dispatch_with(uri, &mut self.session) {
            dispatched.output?;
            return Ok(OpenOutcome::Routed {
                pattern: dispatched.pattern.raw().to_string(),
            });
        }

        if !self.session.sink.snapshot()?.is_empty() {
            tracing::debug!(uri = %uri, "Unmatched deep link ignored, stack kept");
            return Ok(OpenOutcome::Ignored);
        }

        tracing::info!(uri = %uri, home = %self.session.composer.home().id, "Falling back to home root");
        let root = BackStackEntry::new(self.session.composer.home().clone());
        self.session.submit_verbatim([root], self.default_transition)?;
        Ok(OpenOutcome::Fallback)
    }

    /// Pop the visible entry. Returns `false` when only the root is left.
    pub fn handle_back(&self) -> Result<bool, SinkUnavailableError> {
        let mut stack = self.session.sink.snapshot()?;
        if stack.len() <= 1 {
            return Ok(false);
        }

        let popped = stack.pop();
        let transition = popped
            .as_ref()
            .and_then(|e| e.exit_transition)
            .unwrap_or(self.default_transition);

        tracing::debug!(
            popped = popped.as_ref().map(|e| e.destination.id.as_str()).unwrap_or_default(),
            depth = stack.len(),
            "Back handled"
        );
        self.session.submit_verbatim(stack.into_entries(), transition)?;
        Ok(true)
    }

    pub fn resolve(&self, uri: &str) -> Option<RouteMatch<'_>> {
        self.registry.resolve(uri)
    }

    pub fn registry(&self) -> &Registry<Session<S>, LinkResult> {
        &self.registry
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.session.sink
    }
}
