//! The back stack sink capability and an in-memory implementation.
//!
//! # Responsibilities
//! - Define the replacement primitive the host navigation owner provides
//! - Provide `MemorySink` for headless hosts, the CLI and tests
//!
//! # Design Decisions
//! - Every submission is a full-state replacement, applied under one lock
//! - Submissions are applied in arrival order, never merged
//! - An unattached sink rejects submissions; no retry happens here

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::backstack::entry::{BackStack, Transition};

/// The host cannot accept a back stack right now.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("back stack sink unavailable: {reason}")]
pub struct SinkUnavailableError {
    reason: String,
}

impl SinkUnavailableError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Owner of the visible navigation history.
pub trait BackStackSink: Send + Sync {
    /// Replace the whole history with `stack`.
    fn set_back_stack(&self, stack: BackStack, transition: Transition) -> Result<(), SinkUnavailableError>;

    /// Current history.
    fn snapshot(&self) -> Result<BackStack, SinkUnavailableError>;
}

impl<S: BackStackSink + ?Sized> BackStackSink for Arc<S> {
    fn set_back_stack(&self, stack: BackStack, transition: Transition) -> Result<(), SinkUnavailableError> {
        (**self).set_back_stack(stack, transition)
    }

    fn snapshot(&self) -> Result<BackStack, SinkUnavailableError> {
        (**self).snapshot()
    }
}

#[derive(Debug, Default)]
struct SinkState {
    attached: bool,
    stack: BackStack,
    last_transition: Option<Transition>,
    submissions: u64,
}

/// In-memory sink holding the stack behind a mutex.
#[derive(Debug)]
pub struct MemorySink {
    state: Mutex<SinkState>,
}

impl MemorySink {
    /// An attached, empty sink.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SinkState {
                attached: true,
                ..SinkState::default()
            }),
        }
    }

    /// A sink whose host has not attached yet.
    pub fn detached() -> Self {
        Self {
            state: Mutex::new(SinkState::default()),
        }
    }

    pub fn attach(&self) {
        self.lock_or_recover().attached = true;
    }

    pub fn detach(&self) {
        self.lock_or_recover().attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.lock_or_recover().attached
    }

    /// Stack as last applied, regardless of attachment.
    pub fn current(&self) -> BackStack {
        self.lock_or_recover().stack.clone()
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.lock_or_recover().last_transition
    }

    /// Number of applied submissions.
    pub fn submissions(&self) -> u64 {
        self.lock_or_recover().submissions
    }

    fn lock(&self) -> Result<MutexGuard<'_, SinkState>, SinkUnavailableError> {
        self.state
            .lock()
            .map_err(|_| SinkUnavailableError::new("sink state lock poisoned"))
    }

    fn lock_or_recover(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl BackStackSink for MemorySink {
    fn set_back_stack(&self, stack: BackStack, transition: Transition) -> Result<(), SinkUnavailableError> {
        let mut state = self.lock()?;
        if !state.attached {
            return Err(SinkUnavailableError::new("host not attached"));
        }
        state.stack = stack;
        state.last_transition = Some(transition);
        state.submissions += 1;
        Ok(())
    }

    fn snapshot(&self) -> Result<BackStack, SinkUnavailableError> {
        let state = self.lock()?;
        if !state.attached {
            return Err(SinkUnavailableError::new("host not attached"));
        }
        Ok(state.stack.clone())
    }
}
