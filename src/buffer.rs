//! Terminated fixed-capacity buffers.
//!
//! Every operation in this crate works on a caller-owned `&mut [u8]` plus an
//! explicit capacity. The capacity counts the terminator slot, so a buffer of
//! capacity `N` holds at most `N - 1` content bytes followed by [`TERMINATOR`].
//!
//! [`TextBuf`] is an owned `[u8; N]` that carries its capacity in the type and
//! forwards to the free functions.

use crate::copying::{Written, bounded_concat, bounded_copy};
use crate::errors::BoundsError;
use crate::formatting::bounded_format;
use crate::reading::{LineRead, bounded_read_line_from};
use core::fmt;
use core::str::Utf8Error;
use std::io::BufRead;

/// Sentinel marking the logical end of content in a buffer.
pub const TERMINATOR: u8 = 0;

/// Validate `capacity` against `dest` and return the number of content bytes
/// that fit (`capacity - 1`).
///
/// # Example
/// ```
/// # use securec_helpers::*;
/// let buf = [0u8; 8];
/// assert_eq!(check_capacity(&buf, 8).unwrap(), 7);
/// assert!(matches!(check_capacity(&buf, 0), Err(BoundsError::ZeroCapacity)));
/// assert!(check_capacity(&buf, 9).is_err());
/// ```
#[inline]
pub fn check_capacity(
    dest: &[u8],
    capacity: usize,
) -> Result<usize, BoundsError> {
    if capacity == 0 {
        return Err(BoundsError::ZeroCapacity);
    }
    if capacity > dest.len() {
        return Err(BoundsError::CapacityExceedsBuffer {
            capacity,
            len: dest.len(),
        });
    }
    Ok(capacity - 1)
}

/// Length of the content in `buf`: index of the first terminator, or the
/// whole slice when there is none.
///
/// # Example
/// ```
/// # use securec_helpers::content_len;
/// assert_eq!(content_len(b"Hi\0junk"), 2);
/// assert_eq!(content_len(b"no terminator"), 13);
/// assert_eq!(content_len(b""), 0);
/// ```
#[inline]
pub fn content_len(buf: &[u8]) -> usize {
    buf.iter()
        .position(|&b| b == TERMINATOR)
        .unwrap_or(buf.len())
}

/// Content bytes of `buf`, up to but excluding the first terminator.
#[inline]
pub fn content(buf: &[u8]) -> &[u8] {
    &buf[..content_len(buf)]
}

/// Owned terminated buffer of capacity `N` (terminator included).
///
/// `N` must be at least 1; `TextBuf::<0>::new()` fails to compile.
///
/// # Example
/// ```
/// # use securec_helpers::*;
/// let mut name = TextBuf::<8>::new();
/// let written = name.copy_from(b"Ayushman").unwrap();
/// assert!(written.truncated);
/// assert_eq!(name.as_str().unwrap(), "Ayushma");
///
/// let mut greeting = TextBuf::<10>::new();
/// bounded_format!(greeting.as_raw_mut(), 10, "Hi {}", "Bo").unwrap();
/// assert_eq!(greeting.as_bytes(), b"Hi Bo");
/// ```
#[derive(Clone)]
pub struct TextBuf<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> TextBuf<N> {
    const NON_EMPTY: () = assert!(N > 0, "TextBuf needs room for the terminator");

    /// Create an empty buffer (all terminators).
    #[inline]
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            bytes: [TERMINATOR; N],
        }
    }

    /// Total capacity including the terminator slot.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of content bytes.
    #[inline]
    pub fn len(&self) -> usize {
        content_len(&self.bytes)
    }

    /// True when the content is the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes[0] == TERMINATOR
    }

    /// Content bytes without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        content(&self.bytes)
    }

    /// Content as UTF-8. Byte-level truncation may split a multi-byte
    /// character, in which case this returns the decoding error.
    #[inline]
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// The whole backing array, terminator and unused tail included.
    #[inline]
    pub fn as_raw(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Mutable access to the backing array for the free functions.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }

    /// Reset to the empty string.
    #[inline]
    pub fn clear(&mut self) {
        self.bytes[0] = TERMINATOR;
    }

    /// Replace the content with `src` (see [`bounded_copy`]).
    #[inline]
    pub fn copy_from(
        &mut self,
        src: &[u8],
    ) -> Result<Written, BoundsError> {
        bounded_copy(&mut self.bytes, src, N)
    }

    /// Append `src` to the content (see [`bounded_concat`]).
    #[inline]
    pub fn push_bytes(
        &mut self,
        src: &[u8],
    ) -> Result<Written, BoundsError> {
        bounded_concat(&mut self.bytes, src, N)
    }

    /// Replace the content with rendered `args` (see [`bounded_format`]).
    #[inline]
    pub fn format(
        &mut self,
        args: fmt::Arguments<'_>,
    ) -> Result<Written, BoundsError> {
        bounded_format(&mut self.bytes, N, args)
    }

    /// Replace the content with the next line from `reader`
    /// (see [`bounded_read_line_from`]).
    #[inline]
    pub fn read_line_from<R: BufRead + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<LineRead, BoundsError> {
        bounded_read_line_from(reader, &mut self.bytes, N)
    }
}

impl<const N: usize> Default for TextBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for TextBuf<N> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("TextBuf")
            .field("capacity", &N)
            .field(
                "content",
                &String::from_utf8_lossy(self.as_bytes()),
            )
            .finish()
    }
}

/// Appending writer for `write!`. Output that does not fit is dropped, the
/// buffer stays terminated and the write still reports success.
impl<const N: usize> fmt::Write for TextBuf<N> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        match self.push_bytes(s.as_bytes()) {
            Ok(_) => Ok(()),
            Err(_) => Err(fmt::Error),
        }
    }
}
