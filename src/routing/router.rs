//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store registered patterns with their handlers in registration order
//! - Look up the first pattern matching an incoming URI
//! - Invoke the matched handler with the ordered bindings
//!
//! # Design Decisions
//! - Registration order is the only precedence rule (first match wins)
//! - Registering an already known raw pattern is a no-op
//! - `register` takes `&mut self` and `dispatch` takes `&self`, so setup
//!   happens-before dispatch unless the caller wraps the registry in a lock
//! - No-match is a normal `None`/`false`, never an error

use std::fmt;

use crate::observability::metrics;
use crate::routing::matcher::{ParameterBinding, PatternParseError, RoutePattern};
use crate::routing::uri;

/// Callback bound to a pattern. `C` is the caller's dispatch context.
pub type Handler<C, R> = Box<dyn Fn(&mut C, &[ParameterBinding]) -> R + Send + Sync>;

struct Route<C, R> {
    pattern: RoutePattern,
    handler: Handler<C, R>,
}

/// Result of a pure lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub pattern: &'a RoutePattern,
    pub bindings: Vec<ParameterBinding>,
}

impl RouteMatch<'_> {
    pub fn get(&self, key: &str) -> Option<&str> {
        crate::routing::matcher::lookup(&self.bindings, key)
    }
}

/// Result of a dispatch that reached a handler.
#[derive(Debug)]
pub struct Dispatched<'a, R> {
    pub pattern: &'a RoutePattern,
    pub output: R,
}

/// Ordered registry of deep link patterns.
pub struct Registry<C, R = ()> {
    routes: Vec<Route<C, R>>,
}

impl<C, R> Registry<C, R> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register `pattern`. Returns `Ok(false)` if it was already registered,
    /// in which case the first handler stays bound.
    pub fn register<F>(&mut self, pattern: &str, handler: F) -> Result<bool, PatternParseError>
    where
        F: Fn(&mut C, &[ParameterBinding]) -> R + Send + Sync + 'static,
    {
        if self.contains(pattern) {
            tracing::debug!(pattern = %pattern, "Deep link already registered, keeping first handler");
            metrics::record_registration("duplicate");
            return Ok(false);
        }

        let parsed = match RoutePattern::parse(pattern) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "Rejected deep link pattern");
                metrics::record_registration("rejected");
                return Err(e);
            }
        };

        tracing::debug!(
            pattern = %pattern,
            arity = parsed.arity(),
            precedence = self.routes.len(),
            "Deep link registered"
        );
        metrics::record_registration("added");

        self.routes.push(Route {
            pattern: parsed,
            handler: Box::new(handler),
        });
        Ok(true)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.routes.iter().any(|r| r.pattern.raw() == pattern)
    }

    /// Registered patterns in precedence order.
    pub fn patterns(&self) -> impl Iterator<Item = &RoutePattern> {
        self.routes.iter().map(|r| &r.pattern)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first matching pattern without invoking its handler.
    pub fn resolve(&self, uri: &str) -> Option<RouteMatch<'_>> {
        self.find(uri).map(|(route, bindings)| RouteMatch {
            pattern: &route.pattern,
            bindings,
        })
    }

    /// Dispatch `uri`, returning the handler output on a match.
    pub fn dispatch_with(&self, uri: &str, ctx: &mut C) -> Option<Dispatched<'_, R>> {
        let Some((route, bindings)) = self.find(uri) else {
            tracing::debug!(uri = %uri, candidates = self.routes.len(), "No deep link matched");
            metrics::record_dispatch("unmatched");
            return None;
        };

        tracing::info!(
            uri = %uri,
            pattern = %route.pattern,
            bindings = bindings.len(),
            "Deep link matched"
        );
        metrics::record_dispatch("matched");

        let output = (route.handler)(ctx, &bindings);
        Some(Dispatched {
            pattern: &route.pattern,
            output,
        })
    }

    /// Dispatch `uri`. Returns `true` if a handler ran.
    pub fn dispatch(&self, uri: &str, ctx: &mut C) -> bool {
        self.dispatch_with(uri, ctx).is_some()
    }

    fn find(&self, uri: &str) -> Option<(&Route<C, R>, Vec<ParameterBinding>)> {
        let segments = uri::path_segments(uri)?;
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .match_segments(&segments)
                .map(|bindings| (route, bindings))
        })
    }
}

impl<C, R> Default for Registry<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

// Handlers are opaque, so only the patterns are shown.
impl<C, R> fmt::Debug for Registry<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|r| r.pattern.raw()))
            .finish()
    }
}
