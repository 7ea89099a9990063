//! Build-time barrier against unbounded string primitives.
//!
//! This crate exposes no unbounded copy, format, append or line-read
//! function. The barrier additionally stops code from reaching for the C
//! spellings of those calls:
//!
//! - [`ban_unsafe!`](crate::ban_unsafe!) is invoked once per module. It
//!   imports shadow items named `strcpy`, `strncpy`, `strcat`, `sprintf` and
//!   `gets` into that module. A call such as `strcpy(dest, src)` then fails
//!   type checking with a diagnostic naming the call and its replacement,
//!   `strcpy!(..)` expands to `compile_error!`, and importing a real item of
//!   the same name is a duplicate-name error. Nothing runs at run time.
//! - [`scan_source`] is the lexical side of the same policy. It finds
//!   call-shaped uses of the banned names in Rust or C text, including
//!   path-qualified calls such as `libc::strcpy(..)` that the shadow items
//!   cannot see. The `securec scan` command turns its findings into a
//!   failing exit status for CI.
//!
//! # Example
//!
//! A module with the barrier active and only bounded calls builds:
//! ```
//! securec_helpers::ban_unsafe!();
//! use securec_helpers::{bounded_copy, content};
//!
//! fn main() {
//!     let mut dest = [0u8; 8];
//!     bounded_copy(&mut dest, b"Ayushman", 8).unwrap();
//!     assert_eq!(content(&dest), b"Ayushma");
//! }
//! ```
//!
//! Calling a banned function does not:
//! ```compile_fail
//! securec_helpers::ban_unsafe!();
//!
//! fn main() {
//!     let mut dest = [0u8; 8];
//!     strcpy(&mut dest, b"Ayushman\0");
//! }
//! ```
//!
//! Neither does the macro spelling:
//! ```compile_fail
//! securec_helpers::ban_unsafe!();
//!
//! fn main() {
//!     let mut dest = [0u8; 8];
//!     sprintf!(&mut dest, "Hi %s", "Bo");
//! }
//! ```
//!
//! Nor bringing in another item with a banned name:
//! ```compile_fail
//! securec_helpers::ban_unsafe!();
//!
//! fn gets(_buf: &mut [u8]) {}
//!
//! fn main() {}
//! ```

use core::fmt;

/// A banned call and the bounded operation that replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannedCall {
    /// Name of the unbounded primitive.
    pub name: &'static str,
    /// Bounded replacement in this crate.
    pub alternative: &'static str,
    /// Why the primitive cannot be made safe by its caller.
    pub reason: &'static str,
}

impl fmt::Display for BannedCall {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "`{}` is unsafe. Use a safer alternative: `{}`",
            self.name, self.alternative
        )
    }
}

/// Every call the barrier rejects.
pub static BANNED: [BannedCall; 5] = [
    BannedCall {
        name: "strcpy",
        alternative: "bounded_copy",
        reason: "writes the whole source regardless of destination size",
    },
    BannedCall {
        name: "strncpy",
        alternative: "bounded_copy",
        reason: "leaves the destination unterminated when the source fills it",
    },
    BannedCall {
        name: "strcat",
        alternative: "bounded_concat",
        reason: "appends the whole source regardless of remaining space",
    },
    BannedCall {
        name: "sprintf",
        alternative: "bounded_format!",
        reason: "renders without any destination size",
    },
    BannedCall {
        name: "gets",
        alternative: "bounded_read_line",
        reason: "reads a line of any length into a fixed buffer",
    },
];

/// Find the banned call with exactly this name.
///
/// # Example
/// ```
/// # use securec_helpers::barrier::lookup;
/// assert_eq!(lookup("gets").unwrap().alternative, "bounded_read_line");
/// assert!(lookup("fgets").is_none());
/// ```
pub fn lookup(name: &str) -> Option<&'static BannedCall> {
    BANNED.iter().find(|call| call.name == name)
}

/// Shadow items imported by [`ban_unsafe!`](crate::ban_unsafe!).
///
/// Each function requires a trait that is sealed and never implemented, so
/// every call fails to type check. The traits carry the diagnostic text.
pub mod banned {
    mod sealed {
        pub trait Sealed {}
    }

    #[diagnostic::on_unimplemented(
        message = "`strcpy` is unsafe. Use a safer alternative: `bounded_copy`",
        label = "unbounded copy rejected by `ban_unsafe!`"
    )]
    pub trait StrcpyIsBanned: sealed::Sealed {}

    #[diagnostic::on_unimplemented(
        message = "`strncpy` is unsafe. Use a safer alternative: `bounded_copy`",
        label = "possibly unterminated copy rejected by `ban_unsafe!`"
    )]
    pub trait StrncpyIsBanned: sealed::Sealed {}

    #[diagnostic::on_unimplemented(
        message = "`strcat` is unsafe. Use a safer alternative: `bounded_concat`",
        label = "unbounded append rejected by `ban_unsafe!`"
    )]
    pub trait StrcatIsBanned: sealed::Sealed {}

    #[diagnostic::on_unimplemented(
        message = "`sprintf` is unsafe. Use a safer alternative: `bounded_format!`",
        label = "unbounded format rejected by `ban_unsafe!`"
    )]
    pub trait SprintfIsBanned: sealed::Sealed {}

    #[diagnostic::on_unimplemented(
        message = "`gets` is unsafe. Use a safer alternative: `bounded_read_line`",
        label = "unbounded line read rejected by `ban_unsafe!`"
    )]
    pub trait GetsIsBanned: sealed::Sealed {}

    pub fn strcpy<D: StrcpyIsBanned, S>(
        _dest: D,
        _src: S,
    ) {
    }

    pub fn strncpy<D: StrncpyIsBanned, S, N>(
        _dest: D,
        _src: S,
        _n: N,
    ) {
    }

    pub fn strcat<D: StrcatIsBanned, S>(
        _dest: D,
        _src: S,
    ) {
    }

    pub fn sprintf<D: SprintfIsBanned, F, A>(
        _dest: D,
        _format: F,
        _args: A,
    ) {
    }

    pub fn gets<D: GetsIsBanned>(_dest: D) {}

    pub use crate::__securec_banned_gets as gets;
    pub use crate::__securec_banned_sprintf as sprintf;
    pub use crate::__securec_banned_strcat as strcat;
    pub use crate::__securec_banned_strcpy as strcpy;
    pub use crate::__securec_banned_strncpy as strncpy;
}

#[doc(hidden)]
#[macro_export]
macro_rules! __securec_banned_strcpy {
    ($($tt:tt)*) => {
        ::core::compile_error!("`strcpy` is unsafe. Use a safer alternative: `bounded_copy`")
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __securec_banned_strncpy {
    ($($tt:tt)*) => {
        ::core::compile_error!("`strncpy` is unsafe. Use a safer alternative: `bounded_copy`")
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __securec_banned_strcat {
    ($($tt:tt)*) => {
        ::core::compile_error!("`strcat` is unsafe. Use a safer alternative: `bounded_concat`")
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __securec_banned_sprintf {
    ($($tt:tt)*) => {
        ::core::compile_error!("`sprintf` is unsafe. Use a safer alternative: `bounded_format!`")
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __securec_banned_gets {
    ($($tt:tt)*) => {
        ::core::compile_error!("`gets` is unsafe. Use a safer alternative: `bounded_read_line`")
    };
}

/// Activate the barrier for the current module.
///
/// Expands to a single `use` of the shadow items in [`barrier::banned`](crate::barrier::banned).
/// Place it at the top of every module that must not use the unbounded
/// primitives; modules without it are unaffected.
#[macro_export]
macro_rules! ban_unsafe {
    () => {
        #[allow(unused_imports)]
        use $crate::barrier::banned::{gets, sprintf, strcat, strcpy, strncpy};
    };
}

/// Call-shaped use of a banned name found by [`scan_source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub call: &'static BannedCall,
    /// 1-based line number
    pub line: usize,
    /// 1-based byte column of the name
    pub column: usize,
}

impl fmt::Display for Violation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.call)
    }
}

#[derive(Default)]
struct ScanState {
    in_block_comment: bool,
    in_string: bool,
}

/// Find every call-shaped use (`name(` or `name!`) of a banned name.
///
/// Works on Rust and C text alike. Line and block comments, string and
/// character literals, and `fn name` definitions are skipped. Raw string
/// literals are not recognized.
///
/// # Example
/// ```
/// # use securec_helpers::barrier::scan_source;
/// let source = "let n = libc::strcpy(dst, src); // strcpy(a, b)\nputs(\"gets(x)\");\n";
/// let found = scan_source(source);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].call.name, "strcpy");
/// assert_eq!((found[0].line, found[0].column), (1, 15));
/// ```
pub fn scan_source(source: &str) -> Vec<Violation> {
    let mut found = Vec::new();
    let mut state = ScanState::default();
    for (index, line) in source.lines().enumerate() {
        scan_line(line, index + 1, &mut state, &mut found);
    }
    found
}

fn scan_line(
    line: &str,
    line_no: usize,
    state: &mut ScanState,
    found: &mut Vec<Violation>,
) {
    let bytes = line.as_bytes();
    let mut i = 0;
    let mut prev_ident: Option<&str> = None;

    while i < bytes.len() {
        let b = bytes[i];
        let rest = &bytes[i..];

        if state.in_block_comment {
            if rest.starts_with(b"*/") {
                state.in_block_comment = false;
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }
        if state.in_string {
            match b {
                b'\\' => i += 2,
                b'"' => {
                    state.in_string = false;
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }

        if rest.starts_with(b"//") {
            return;
        }
        if rest.starts_with(b"/*") {
            state.in_block_comment = true;
            i += 2;
            continue;
        }
        match b {
            b'"' => {
                state.in_string = true;
                i += 1;
                prev_ident = None;
            }
            b'\'' => {
                i += char_literal_len(rest);
                prev_ident = None;
            }
            _ if is_ident_start(b) => {
                let start = i;
                while i < bytes.len() && is_ident_continue(bytes[i]) {
                    i += 1;
                }
                let ident = &line[start..i];
                if prev_ident != Some("fn")
                    && let Some(call) = lookup(ident)
                    && is_call_shaped(&bytes[i..])
                {
                    found.push(Violation {
                        call,
                        line: line_no,
                        column: start + 1,
                    });
                }
                prev_ident = Some(ident);
            }
            _ if b.is_ascii_whitespace() => i += 1,
            _ if b.is_ascii_digit() => {
                while i < bytes.len() && is_ident_continue(bytes[i]) {
                    i += 1;
                }
                prev_ident = None;
            }
            _ => {
                i += 1;
                prev_ident = None;
            }
        }
    }
}

/// Bytes to skip for a `'` that opens a character literal, or 1 for a
/// lifetime or label.
fn char_literal_len(rest: &[u8]) -> usize {
    match rest {
        [b'\'', b'\\', ..] => rest
            .get(3..)
            .and_then(|tail| tail.iter().position(|&b| b == b'\''))
            .map_or(rest.len(), |end| end + 4),
        [b'\'', _, b'\'', ..] => 3,
        _ => 1,
    }
}

fn is_call_shaped(after: &[u8]) -> bool {
    let mut rest = after;
    while let [first, tail @ ..] = rest {
        if !first.is_ascii_whitespace() {
            break;
        }
        rest = tail;
    }
    match rest {
        [b'(', ..] => true,
        [b'!', next, ..] => *next != b'=',
        [b'!'] => true,
        _ => false,
    }
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
