//! Bounded copy and concatenation into caller-provided buffers.
//!
//! These replace the unbounded copy and append primitives. Both functions:
//!
//! - **Never write past `capacity`**: at most `capacity - 1` content bytes plus a terminator
//! - **Always terminate**: the destination is a valid string after every `Ok` return
//! - **Truncate silently**: losing trailing bytes is not an error, but the
//!   returned [`Written`] says whether it happened
//! - **Stop at the source sentinel**: a source ends at its first NUL byte,
//!   or at the end of the slice when it has none
//!
//! # Capacity
//!
//! `capacity` counts the terminator and must be in `1..=dest.len()`. Anything
//! else is rejected with [`BoundsError`] before `dest` is modified.

use crate::buffer::{TERMINATOR, check_capacity, content_len};
use crate::errors::BoundsError;
use log::trace;

/// Outcome of a bounded write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Written {
    /// Content bytes now in the destination, terminator excluded.
    pub len: usize,
    /// True when part of the input did not fit and was dropped.
    pub truncated: bool,
}

/// Copy the string in `src` into `dest`, keeping at most `capacity - 1` bytes.
///
/// The rest of `dest[..capacity]` is filled with terminators, so index
/// `capacity - 1` always holds one. Bytes at or beyond `capacity` are never
/// touched.
///
/// # Example
/// ```
/// # use securec_helpers::*;
/// let mut dest = [0xFFu8; 8];
/// let written = bounded_copy(&mut dest, b"Ayushman", 8).unwrap();
/// assert_eq!(&dest, b"Ayushma\0");
/// assert_eq!(written, Written { len: 7, truncated: true });
///
/// let written = bounded_copy(&mut dest, b"Bo\0ignored", 8).unwrap();
/// assert_eq!(content(&dest), b"Bo");
/// assert!(!written.truncated);
/// ```
#[inline]
pub fn bounded_copy(
    dest: &mut [u8],
    src: &[u8],
    capacity: usize,
) -> Result<Written, BoundsError> {
    let limit = check_capacity(dest, capacity)?;
    let src_len = content_len(src);
    let len = src_len.min(limit);

    dest[..len].copy_from_slice(&src[..len]);
    dest[len..capacity].fill(TERMINATOR);

    let truncated = src_len > limit;
    if truncated {
        trace!("bounded_copy: truncated {src_len} source bytes to {len}");
    }
    Ok(Written { len, truncated })
}

/// Append the string in `src` to the string already in `dest`.
///
/// The existing content ends at the first terminator inside
/// `dest[..capacity]`. If there is none, the content is clamped to
/// `capacity - 1` bytes (reported as truncated) before appending. The
/// returned length is the total content length after the append.
///
/// # Example
/// ```
/// # use securec_helpers::*;
/// let mut dest = [0u8; 10];
/// bounded_copy(&mut dest, b"Hi ", 10).unwrap();
/// let written = bounded_concat(&mut dest, b"Ayushman", 10).unwrap();
/// assert_eq!(content(&dest), b"Hi Ayushm");
/// assert_eq!(written, Written { len: 9, truncated: true });
/// ```
#[inline]
pub fn bounded_concat(
    dest: &mut [u8],
    src: &[u8],
    capacity: usize,
) -> Result<Written, BoundsError> {
    let limit = check_capacity(dest, capacity)?;
    let existing = content_len(&dest[..capacity]);
    let mut truncated = existing > limit;
    let start = existing.min(limit);

    let src_len = content_len(src);
    let take = src_len.min(limit - start);
    dest[start..start + take].copy_from_slice(&src[..take]);

    let len = start + take;
    dest[len] = TERMINATOR;

    if take < src_len {
        truncated = true;
    }
    if truncated {
        trace!("bounded_concat: content clamped to {len} of {capacity} capacity");
    }
    Ok(Written { len, truncated })
}
