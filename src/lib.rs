//! # securec-helpers
//!
//! Bounded replacements for the classic C string primitives, plus a
//! build-time barrier that keeps the unbounded originals out of code that
//! opts in.
//!
//! Every operation writes into a caller-owned byte buffer with an explicit
//! capacity that counts the terminator slot. Whatever the input, the
//! destination ends up holding at most `capacity - 1` content bytes followed
//! by a terminator, and nothing at or past `capacity` is written.
//!
//! | Unbounded primitive | Replacement |
//! |---|---|
//! | `strcpy`, `strncpy` | [`bounded_copy`] |
//! | `strcat` | [`bounded_concat`] |
//! | `sprintf` | [`bounded_format!`] / [`bounded_format()`] |
//! | `gets` | [`bounded_read_line`] / [`bounded_read_line_from`] |
//!
//! Modules that invoke [`ban_unsafe!`] cannot call the left-hand column at
//! all; see [`barrier`].
//!
//! ## Contract
//!
//! - Truncation is silent but reported: see [`Written`] and [`LineRead`]
//! - A capacity of zero, or one larger than the destination slice, is a
//!   precondition violation reported as [`BoundsError`] before anything is written
//! - Sources end at their first NUL byte or at the end of the slice
//! - No allocation, no shared state; concurrent calls on distinct buffers are
//!   independent
//!
//! # Example
//!
//! ```rust
//! use securec_helpers::*;
//!
//! let mut dest = [0u8; 8];
//! let written = bounded_copy(&mut dest, b"Ayushman", 8).unwrap();
//! assert_eq!(content(&dest), b"Ayushma");
//! assert!(written.truncated);
//!
//! let mut greeting = [0u8; 10];
//! bounded_format!(&mut greeting, 10, "Hi {}", "Bo").unwrap();
//! assert_eq!(content(&greeting), b"Hi Bo");
//! ```

pub mod barrier;
pub mod buffer;
pub mod copying;
pub mod errors;
#[cfg(unix)]
pub mod ffi;
pub mod formatting;
pub mod reading;

// Re-export the operation surface for convenience
pub use buffer::*;
pub use copying::*;
pub use errors::*;
pub use formatting::*;
pub use reading::*;
