//! Bounded line input.
//!
//! Reads one line into a caller-provided buffer the way `fgets` does, then
//! strips the trailing newline. The differences from `fgets` are what makes
//! the result total:
//!
//! - **Defined failure state**: on a read error the destination is reset to
//!   the empty string before the error is returned
//! - **Defined end of input**: immediate end of input yields an empty,
//!   terminated destination and `end_of_input = true`
//! - **No over-read**: bytes after the newline, or past `capacity - 1`, stay
//!   in the reader for the next call. A newline directly after a full buffer
//!   is consumed as this line's terminator

use crate::buffer::{TERMINATOR, check_capacity};
use crate::errors::BoundsError;
use log::{trace, warn};
use std::io::{self, BufRead};

const NEWLINE: u8 = b'\n';

/// Outcome of a bounded line read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineRead {
    /// Content bytes stored, after stripping the newline.
    pub len: usize,
    /// A trailing `\n` was read and replaced by the terminator.
    pub terminator_stripped: bool,
    /// The buffer filled up and more of the same line is still in the
    /// reader.
    pub truncated: bool,
    /// The reader reported end of input during this call.
    pub end_of_input: bool,
}

/// Read one line from standard input into `dest`.
///
/// Blocks until a newline, end of input, or `capacity - 1` bytes. See
/// [`bounded_read_line_from`] for the exact contract.
pub fn bounded_read_line(
    dest: &mut [u8],
    capacity: usize,
) -> Result<LineRead, BoundsError> {
    let stdin = io::stdin();
    let mut lock = stdin.lock();
    bounded_read_line_from(&mut lock, dest, capacity)
}

/// Read one line from `reader` into `dest`, storing at most `capacity - 1`
/// bytes and stripping one trailing `\n`.
///
/// Only `\n` is stripped; a preceding `\r` is kept as content.
/// `Interrupted` errors are retried. Any other error clears `dest` to the
/// empty string and is returned as [`BoundsError::Read`].
///
/// # Example
/// ```
/// # use securec_helpers::*;
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(&b"Ayushman\nnext\n"[..]);
/// let mut dest = [0u8; 20];
///
/// let line = bounded_read_line_from(&mut input, &mut dest, 20).unwrap();
/// assert_eq!(content(&dest), b"Ayushman");
/// assert!(line.terminator_stripped);
///
/// bounded_read_line_from(&mut input, &mut dest, 20).unwrap();
/// assert_eq!(content(&dest), b"next");
///
/// let line = bounded_read_line_from(&mut input, &mut dest, 20).unwrap();
/// assert_eq!(content(&dest), b"");
/// assert!(line.end_of_input);
/// ```
pub fn bounded_read_line_from<R: BufRead + ?Sized>(
    reader: &mut R,
    dest: &mut [u8],
    capacity: usize,
) -> Result<LineRead, BoundsError> {
    let limit = check_capacity(dest, capacity)?;
    dest[0] = TERMINATOR;

    let mut len = 0;
    let mut saw_newline = false;
    let mut end_of_input = false;

    while len < limit {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                dest[0] = TERMINATOR;
                warn!("bounded_read_line: read failed after {len} bytes: {e}");
                return Err(BoundsError::Read(e));
            }
        };
        if available.is_empty() {
            end_of_input = true;
            break;
        }

        let window = &available[..available.len().min(limit - len)];
        let (take, found) = match window.iter().position(|&b| b == NEWLINE) {
            Some(i) => (i + 1, true),
            None => (window.len(), false),
        };
        dest[len..len + take].copy_from_slice(&window[..take]);
        reader.consume(take);
        len += take;

        if found {
            saw_newline = true;
            break;
        }
    }

    if saw_newline {
        len -= 1;
    } else if len == limit && limit > 0 {
        // Buffer is full: look at what follows before calling it truncated
        let next = loop {
            match reader.fill_buf() {
                Ok(rest) => break rest.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    dest[0] = TERMINATOR;
                    warn!("bounded_read_line: read failed after {len} bytes: {e}");
                    return Err(BoundsError::Read(e));
                }
            }
        };
        match next {
            None => end_of_input = true,
            Some(NEWLINE) => {
                reader.consume(1);
                saw_newline = true;
            }
            Some(_) => {}
        }
    }
    dest[len] = TERMINATOR;

    let truncated = !saw_newline && !end_of_input && limit > 0;
    if truncated {
        trace!("bounded_read_line: line longer than {limit} bytes, rest left unread");
    }
    Ok(LineRead {
        len,
        terminator_stripped: saw_newline,
        truncated,
        end_of_input,
    })
}
