//! Host-agnostic deep link routing library.
//!
//! # Architecture Overview
//!
//! ```text
//!   open URL / intent
//!   ─────────────────▶ ┌────────────┐    ┌────────────┐    ┌──────────────┐
//!                      │ navigator  │───▶│  routing   │───▶│   handler    │
//!                      │  (session) │    │  registry  │    │  (bindings)  │
//!                      └────────────┘    └────────────┘    └──────┬───────┘
//!                                                                 │
//!                                                                 ▼
//!                                        ┌────────────┐    ┌──────────────┐
//!   host navigation  ◀───────────────────│    sink    │◀───│  backstack   │
//!   (visible history)                    │ (replace)  │    │   composer   │
//!                                        └────────────┘    └──────────────┘
//! ```
//!
//! Cross-cutting: `config` (route tables), `observability` (tracing, metrics).

pub mod backstack;
pub mod config;
pub mod error;
pub mod navigator;
pub mod observability;
pub mod routing;

pub use backstack::{
    BackStack, BackStackComposer, BackStackEntry, BackStackSink, Destination, MemorySink,
    SinkUnavailableError, Transition,
};
pub use config::RouterConfig;
pub use error::{Error, Result};
pub use navigator::{Navigator, OpenOutcome, Session};
pub use routing::{ParameterBinding, PatternParseError, Registry, RouteMatch, RoutePattern};
