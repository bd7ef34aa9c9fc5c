//! Deep link routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming URI (scheme, host, path, query)
//!     → uri.rs (decoded path segments; scheme/host ignored)
//!     → router.rs (registered patterns, in registration order)
//!     → matcher.rs (arity check, literal compare, placeholder binding)
//!     → Return: handler output or no-match
//!
//! Registration (at session setup):
//!     pattern string
//!     → matcher.rs (parse literal / {placeholder} segments)
//!     → append unless the raw pattern is already known
//! ```
//!
//! # Design Decisions
//! - One registry per navigation session, passed explicitly
//! - No regex, no backtracking across patterns
//! - Deterministic: same input always matches same pattern
//! - First match wins (ordered by registration)

pub mod matcher;
pub mod router;
pub mod uri;

pub use matcher::{lookup, ParameterBinding, PatternParseError, RoutePattern, Segment};
pub use router::{Dispatched, Handler, Registry, RouteMatch};
