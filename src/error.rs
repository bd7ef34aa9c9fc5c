//! Crate-level error type.

use thiserror::Error;

use crate::backstack::SinkUnavailableError;
use crate::config::ConfigError;
use crate::routing::PatternParseError;

/// Any failure surfaced by the router.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternParseError),

    #[error(transparent)]
    Sink(#[from] SinkUnavailableError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
