//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, backstack, navigator produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stderr log output (binary)
//!     → Prometheus text rendering (binary, on demand)
//! ```
//!
//! # Design Decisions
//! - The library only emits; the binary installs subscribers and recorders
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
