//! Bounded formatted writes.
//!
//! Rendering goes through `core::fmt`, so the template and its arguments are
//! checked against each other at compile time. The output is cut at
//! `capacity - 1` bytes and always terminated.

use crate::buffer::{TERMINATOR, check_capacity};
use crate::copying::Written;
use crate::errors::BoundsError;
use core::fmt;
use log::trace;

/// `fmt::Write` sink over a fixed slice that keeps what fits and counts
/// what it dropped.
struct TruncatingWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
    dropped: usize,
}

impl fmt::Write for TruncatingWriter<'_> {
    #[inline]
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        let room = self.buf.len() - self.len;
        let take = room.min(s.len());
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        self.dropped += s.len() - take;
        Ok(())
    }
}

/// Render `args` into `dest`, keeping at most `capacity - 1` bytes.
///
/// Usually called through [`bounded_format!`](crate::bounded_format!). The
/// cut is made on a byte boundary, not a character boundary.
///
/// If a `Display` implementation fails, `dest` keeps whatever was rendered
/// before the failure, terminated, and [`BoundsError::Format`] is returned.
///
/// # Example
/// ```
/// # use securec_helpers::*;
/// let mut dest = [0u8; 10];
/// let written = bounded_format(&mut dest, 10, format_args!("Hi {}", "Bo")).unwrap();
/// assert_eq!(content(&dest), b"Hi Bo");
/// assert!(!written.truncated);
///
/// let written = bounded_format(&mut dest, 6, format_args!("{}", 1234567)).unwrap();
/// assert_eq!(content(&dest), b"12345");
/// assert!(written.truncated);
/// ```
pub fn bounded_format(
    dest: &mut [u8],
    capacity: usize,
    args: fmt::Arguments<'_>,
) -> Result<Written, BoundsError> {
    let limit = check_capacity(dest, capacity)?;

    let mut writer = TruncatingWriter {
        buf: &mut dest[..limit],
        len: 0,
        dropped: 0,
    };
    let rendered = fmt::write(&mut writer, args);
    let TruncatingWriter { len, dropped, .. } = writer;
    dest[len] = TERMINATOR;

    rendered.map_err(|_| BoundsError::Format)?;

    if dropped > 0 {
        trace!("bounded_format: dropped {dropped} bytes past capacity {capacity}");
    }
    Ok(Written {
        len,
        truncated: dropped > 0,
    })
}

/// Format into a buffer with an explicit capacity.
///
/// Expands to [`bounded_format`] with `format_args!`, so placeholders and
/// arguments are checked by the compiler.
///
/// # Example
/// ```
/// # use securec_helpers::*;
/// let mut dest = [0u8; 30];
/// let name = "Ayushman";
/// bounded_format!(&mut dest, 30, "Hi {name}").unwrap();
/// assert_eq!(content(&dest), b"Hi Ayushman");
/// ```
///
/// A placeholder without a matching argument does not build:
/// ```compile_fail
/// # use securec_helpers::*;
/// let mut dest = [0u8; 10];
/// bounded_format!(&mut dest, 10, "Hi {}").unwrap();
/// ```
#[macro_export]
macro_rules! bounded_format {
    ($dest:expr, $capacity:expr, $($arg:tt)+) => {
        $crate::formatting::bounded_format($dest, $capacity, ::core::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::content;

    struct Failing;

    impl fmt::Display for Failing {
        fn fmt(
            &self,
            _f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_bounded_format_greeting_fits() {
        let mut dest = [0xAAu8; 10];
        let written = bounded_format!(&mut dest, 10, "Hi {}", "Bo").unwrap();
        assert_eq!(&dest[..6], b"Hi Bo\0");
        assert_eq!(written, Written { len: 5, truncated: false });
    }

    #[test]
    fn test_bounded_format_truncates() {
        let mut dest = [0xAAu8; 8];
        let written = bounded_format!(&mut dest, 8, "Hi {}", "Ayushman").unwrap();
        assert_eq!(&dest, b"Hi Ayus\0");
        assert_eq!(written, Written { len: 7, truncated: true });
    }

    #[test]
    fn test_bounded_format_respects_capacity_below_slice_len() {
        let mut dest = [0xAAu8; 8];
        bounded_format!(&mut dest, 4, "{}{}", 12, 34).unwrap();
        assert_eq!(&dest[..4], b"123\0");
        assert!(dest[4..].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_bounded_format_capacity_one() {
        let mut dest = [0xAAu8; 2];
        let written = bounded_format!(&mut dest, 1, "{}", "x").unwrap();
        assert_eq!(dest, [TERMINATOR, 0xAA]);
        assert!(written.truncated);
    }

    #[test]
    fn test_bounded_format_empty_output() {
        let mut dest = *b"stale";
        let written = bounded_format!(&mut dest, 5, "{}", "").unwrap();
        assert_eq!(content(&dest), b"");
        assert_eq!(written, Written::default());
    }

    #[test]
    fn test_bounded_format_rejects_zero_capacity() {
        let mut dest = [0xAAu8; 4];
        let result = bounded_format!(&mut dest, 0, "{}", 1);
        assert!(matches!(result, Err(BoundsError::ZeroCapacity)));
        assert_eq!(dest, [0xAA; 4]);
    }

    #[test]
    fn test_bounded_format_display_error_leaves_terminated_prefix() {
        let mut dest = [0xAAu8; 16];
        let result = bounded_format!(&mut dest, 16, "ok {}", Failing);
        assert!(matches!(result, Err(BoundsError::Format)));
        assert_eq!(content(&dest), b"ok ");
    }

    #[test]
    fn test_bounded_format_numbers_and_padding() {
        let mut dest = [0u8; 32];
        bounded_format!(&mut dest, 32, "{:>5}|{:03}|{:.2}", "ab", 7, 1.5).unwrap();
        assert_eq!(content(&dest), b"   ab|007|1.50");
    }
}
