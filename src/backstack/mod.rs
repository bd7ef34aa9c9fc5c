//! Back stack composition subsystem.
//!
//! # Data Flow
//! ```text
//! Matched deep link handler
//!     → composer.rs (home + targets, or verbatim entries)
//!     → sink.rs (BackStackSink::set_back_stack, full replacement)
//!     → Host navigation shows the new top entry
//! ```
//!
//! # Design Decisions
//! - Stacks are built fresh per dispatch and submitted whole
//! - Transitions are opaque tags for the host
//! - The sink is the only shared mutable resource

pub mod composer;
pub mod entry;
pub mod sink;

pub use composer::BackStackComposer;
pub use entry::{BackStack, BackStackEntry, Destination, Transition};
pub use sink::{BackStackSink, MemorySink, SinkUnavailableError};
