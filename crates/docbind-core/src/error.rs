use crate::{accessor::AccessorError, introspect::IntrospectError, registry::RegistryError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error for registry operations. Each component error keeps
/// its own type; this wrapper exists so callers crossing component
/// boundaries handle one error with one classification.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Accessor(#[from] AccessorError),

    #[error(transparent)]
    Introspect(#[from] IntrospectError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Accessor(err) => err.class(),
            Self::Introspect(err) => err.class(),
            Self::Registry(err) => err.class(),
        }
    }
}

///
/// ErrorClass
/// Coarse classification carried by every registry error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    InvariantViolation,
    NotFound,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
