#![forbid(unsafe_code)]

//! Error taxonomy for canvas operations.
//!
//! Every failure is reported synchronously to the caller; nothing is
//! retried internally. Validation failures leave state untouched. The one
//! documented exception is an allocation failure in the middle of a resize,
//! which leaves the canvas partially reflowed and unusable.

use std::collections::TryReserveError;
use std::fmt;

/// Errors returned by canvas operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasError {
    /// Negative dimension, out-of-range frame index, or an unmanage whose
    /// guard does not match the managing one.
    InvalidArgument,
    /// Buffer allocation failed. When raised by a resize the canvas must be
    /// discarded: frames already reflowed are not rolled back.
    OutOfMemory,
    /// The canvas is managed and the operation conflicts with the attached
    /// driver, or the driver's guard refused a resize.
    Busy,
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::Busy => write!(f, "canvas is busy"),
        }
    }
}

impl std::error::Error for CanvasError {}

impl From<TryReserveError> for CanvasError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}
