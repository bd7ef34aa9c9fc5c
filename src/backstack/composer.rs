//! Back stack composition for deep link targets.
//!
//! # Responsibilities
//! - Prefix caller entries with a freshly built home entry
//! - Submit composed or verbatim stacks to the sink in one call
//!
//! # Design Decisions
//! - Home is rebuilt from the template on every call, never reused
//! - The home entry takes the submission transition for enter and exit;
//!   caller entries keep explicit transitions and take it where unset
//! - Verbatim submissions are passed through untouched
//! - No state is kept between calls

use crate::backstack::entry::{BackStack, BackStackEntry, Destination, Transition};
use crate::backstack::sink::{BackStackSink, SinkUnavailableError};
use crate::observability::metrics;

/// Builds home-rooted stacks and submits them.
#[derive(Debug, Clone)]
pub struct BackStackComposer {
    home: Destination,
}

impl BackStackComposer {
    pub fn new(home: Destination) -> Self {
        Self { home }
    }

    pub fn home(&self) -> &Destination {
        &self.home
    }

    /// `[home, entries...]` with transitions filled in.
    pub fn compose<I>(&self, entries: I, transition: Transition) -> BackStack
    where
        I: IntoIterator<Item = BackStackEntry>,
    {
        let home = BackStackEntry::new(self.home.clone()).with_transition(transition);
        std::iter::once(home)
            .chain(entries.into_iter().map(|e| e.or_transition(transition)))
            .collect()
    }

    /// Replace the sink's stack with `[home, target]`.
    pub fn replace_with<S>(
        &self,
        sink: &S,
        target: BackStackEntry,
        transition: Transition,
    ) -> Result<(), SinkUnavailableError>
    where
        S: BackStackSink + ?Sized,
    {
        self.replace_with_all(sink, [target], transition)
    }

    /// Replace the sink's stack with `[home, entries...]`.
    pub fn replace_with_all<S, I>(
        &self,
        sink: &S,
        entries: I,
        transition: Transition,
    ) -> Result<(), SinkUnavailableError>
    where
        S: BackStackSink + ?Sized,
        I: IntoIterator<Item = BackStackEntry>,
    {
        submit(sink, self.compose(entries, transition), transition, "replace")
    }

    /// Replace the sink's stack with exactly `entries`.
    pub fn submit_verbatim<S, I>(
        &self,
        sink: &S,
        entries: I,
        transition: Transition,
    ) -> Result<(), SinkUnavailableError>
    where
        S: BackStackSink + ?Sized,
        I: IntoIterator<Item = BackStackEntry>,
    {
        submit(sink, entries.into_iter().collect(), transition, "verbatim")
    }
}

fn submit<S>(
    sink: &S,
    stack: BackStack,
    transition: Transition,
    mode: &'static str,
) -> Result<(), SinkUnavailableError>
where
    S: BackStackSink + ?Sized,
{
    let depth = stack.len();
    let top = stack
        .top()
        .map(|e| e.destination.id.clone())
        .unwrap_or_default();

    match sink.set_back_stack(stack, transition) {
        Ok(()) => {
            tracing::debug!(mode, depth, top = %top, ?transition, "Back stack replaced");
            metrics::record_submission(mode, "ok");
            metrics::record_stack_depth(depth);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(mode, depth, top = %top, error = %e, "Back stack submission rejected");
            metrics::record_submission(mode, "unavailable");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backstack::sink::MemorySink;

    fn composer() -> BackStackComposer {
        BackStackComposer::new(Destination::new("home"))
    }

    fn entry(id: &str) -> BackStackEntry {
        BackStackEntry::new(Destination::new(id))
    }

    #[test]
    fn test_replace_with_prefixes_home() {
        let sink = MemorySink::new();
        sink.set_back_stack(
            [entry("a"), entry("b"), entry("c")].into_iter().collect(),
            Transition::Fade,
        )
        .unwrap();

        composer()
            .replace_with(&sink, entry("detail"), Transition::Fade)
            .unwrap();

        let stack = sink.current();
        assert_eq!(stack.ids(), vec!["home", "detail"]);
        for e in &stack {
            assert_eq!(e.enter_transition, Some(Transition::Fade));
            assert_eq!(e.exit_transition, Some(Transition::Fade));
        }
        assert_eq!(sink.last_transition(), Some(Transition::Fade));
    }

    #[test]
    fn test_explicit_entry_transitions_survive() {
        let stack = composer().compose(
            [entry("detail").with_transition(Transition::Fade)],
            Transition::SimpleSwap,
        );
        assert_eq!(stack.entries()[0].enter_transition, Some(Transition::SimpleSwap));
        assert_eq!(stack.entries()[1].enter_transition, Some(Transition::Fade));
    }

    #[test]
    fn test_replace_with_all_keeps_order() {
        let sink = MemorySink::new();
        composer()
            .replace_with_all(&sink, [entry("list"), entry("detail")], Transition::SimpleSwap)
            .unwrap();
        assert_eq!(sink.current().ids(), vec!["home", "list", "detail"]);
    }

    #[test]
    fn test_home_is_fresh_each_time() {
        let composer = composer();
        let sink = MemorySink::new();
        composer.replace_with(&sink, entry("a"), Transition::Fade).unwrap();
        composer.replace_with(&sink, entry("b"), Transition::VerticalSlide).unwrap();

        let stack = sink.current();
        assert_eq!(stack.ids(), vec!["home", "b"]);
        assert_eq!(stack.root().unwrap().enter_transition, Some(Transition::VerticalSlide));
    }

    #[test]
    fn test_submit_verbatim_has_no_home() {
        let sink = MemorySink::new();
        composer()
            .submit_verbatim(&sink, [entry("x"), entry("y")], Transition::Fade)
            .unwrap();
        let stack = sink.current();
        assert_eq!(stack.ids(), vec!["x", "y"]);
        assert_eq!(stack.root().unwrap().enter_transition, None);
    }

    #[test]
    fn test_unavailable_sink_keeps_previous_stack() {
        let sink = MemorySink::new();
        composer().replace_with(&sink, entry("a"), Transition::Fade).unwrap();
        sink.detach();

        let err = composer()
            .replace_with(&sink, entry("b"), Transition::Fade)
            .unwrap_err();
        assert_eq!(err.reason(), "host not attached");
        assert_eq!(sink.current().ids(), vec!["home", "a"]);
    }
}
