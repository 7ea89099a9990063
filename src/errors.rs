//! Error types for bounded string operations.
//!
//! Truncation is never an error here: it is reported through the
//! [`Written`](crate::Written) and [`LineRead`](crate::LineRead) outcomes.
//! This module only covers broken preconditions and input failures.

use thiserror::Error;

/// Failure of a bounded operation.
///
/// Precondition variants are returned before the destination is touched.
/// [`BoundsError::Read`] is returned after the destination has been reset to
/// the empty string, so the buffer is always terminated when this is seen.
#[derive(Debug, Error)]
pub enum BoundsError {
    /// A capacity of zero leaves no room for the terminator.
    #[error("capacity must be at least 1 to hold the terminator")]
    ZeroCapacity,

    /// The declared capacity is larger than the destination slice.
    #[error("capacity {capacity} exceeds destination length {len}")]
    CapacityExceedsBuffer {
        /// Capacity passed by the caller
        capacity: usize,
        /// Actual length of the destination slice
        len: usize,
    },

    /// A `Display` implementation reported an error while rendering.
    #[error("formatting trait implementation returned an error")]
    Format,

    /// The line source failed with something other than `Interrupted`.
    #[error("line read failed: {0}")]
    Read(#[from] std::io::Error),
}

impl BoundsError {
    /// Returns true for errors caused by the caller's arguments rather than
    /// by the data or the input source.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BoundsError::ZeroCapacity | BoundsError::CapacityExceedsBuffer { .. }
        )
    }
}
