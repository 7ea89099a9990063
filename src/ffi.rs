//! C entry points for the bounded copy operations.
//!
//! These let C code that includes no unbounded primitive at all still copy
//! and append strings. Both functions return the content length now in
//! `dest` (for concatenation that includes the existing prefix), or `-1`
//! without touching `dest` when an argument is null or `size` is zero.
//!
//! The return value alone does not say whether `src` was cut short. Pass a
//! non-null `truncated` pointer to learn that: it receives `1` when part of
//! `src` was dropped and `0` otherwise. It is left untouched on `-1`.

use crate::copying::{Written, bounded_concat, bounded_copy};
use crate::errors::BoundsError;
use core::ffi::CStr;
use core::slice;
use libc::{c_char, c_int, size_t, ssize_t};

#[inline]
fn to_status(
    result: Result<Written, BoundsError>,
    truncated: *mut c_int,
) -> ssize_t {
    match result {
        Ok(written) => {
            if !truncated.is_null() {
                unsafe { *truncated = c_int::from(written.truncated) };
            }
            written.len as ssize_t
        }
        Err(_) => -1,
    }
}

/// Bounded replacement for `strcpy`: copy `src` into the `size`-byte buffer
/// at `dest`, always terminating it.
///
/// # Safety
/// `dest` must be valid for writes of `size` bytes, `src` must point to a
/// NUL-terminated string, and the two regions must not overlap. `truncated`
/// is either null or valid for one `int` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn securec_copy(
    dest: *mut c_char,
    src: *const c_char,
    size: size_t,
    truncated: *mut c_int,
) -> ssize_t {
    if dest.is_null() || src.is_null() || size == 0 {
        return -1;
    }
    let src = unsafe { CStr::from_ptr(src) }.to_bytes();
    let dest = unsafe { slice::from_raw_parts_mut(dest.cast::<u8>(), size) };
    to_status(bounded_copy(dest, src, size), truncated)
}

/// Bounded replacement for `strcat`: append `src` to the string in the
/// `size`-byte buffer at `dest`, always terminating it.
///
/// Returns the full content length of `dest` afterwards, so it can exceed
/// `strlen(src)` even when `src` was cut short; check `truncated` for that.
///
/// # Safety
/// Same as [`securec_copy`]. `dest` need not be terminated within `size`
/// bytes; its content is clamped to `size - 1` bytes in that case.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn securec_concat(
    dest: *mut c_char,
    src: *const c_char,
    size: size_t,
    truncated: *mut c_int,
) -> ssize_t {
    if dest.is_null() || src.is_null() || size == 0 {
        return -1;
    }
    let src = unsafe { CStr::from_ptr(src) }.to_bytes();
    let dest = unsafe { slice::from_raw_parts_mut(dest.cast::<u8>(), size) };
    to_status(bounded_concat(dest, src, size), truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    fn as_cstr(buf: &[c_char]) -> &CStr {
        unsafe { CStr::from_ptr(buf.as_ptr()) }
    }

    #[test]
    fn test_securec_copy_truncates() {
        let mut dest = [0x7f as c_char; 8];
        let mut truncated: c_int = -1;
        let n = unsafe {
            securec_copy(dest.as_mut_ptr(), c"Ayushman".as_ptr(), 8, &mut truncated)
        };
        assert_eq!(n, 7);
        assert_eq!(truncated, 1);
        assert_eq!(as_cstr(&dest), c"Ayushma");
    }

    #[test]
    fn test_securec_copy_fits() {
        let mut dest = [0 as c_char; 20];
        let mut truncated: c_int = -1;
        let n = unsafe {
            securec_copy(dest.as_mut_ptr(), c"Ayushman".as_ptr(), 20, &mut truncated)
        };
        assert_eq!(n, 8);
        assert_eq!(truncated, 0);
        assert_eq!(as_cstr(&dest), c"Ayushman");
    }

    #[test]
    fn test_securec_copy_null_flag_is_optional() {
        let mut dest = [0 as c_char; 4];
        let n = unsafe {
            securec_copy(dest.as_mut_ptr(), c"abcdef".as_ptr(), 4, ptr::null_mut())
        };
        assert_eq!(n, 3);
        assert_eq!(as_cstr(&dest), c"abc");
    }

    #[test]
    fn test_securec_copy_rejects_null_and_zero() {
        let mut dest = [0x7f as c_char; 4];
        let mut truncated: c_int = 7;
        unsafe {
            assert_eq!(securec_copy(ptr::null_mut(), c"x".as_ptr(), 4, &mut truncated), -1);
            assert_eq!(securec_copy(dest.as_mut_ptr(), ptr::null(), 4, &mut truncated), -1);
            assert_eq!(securec_copy(dest.as_mut_ptr(), c"x".as_ptr(), 0, &mut truncated), -1);
        }
        assert!(dest.iter().all(|&c| c == 0x7f));
        assert_eq!(truncated, 7);
    }

    #[test]
    fn test_securec_concat_fits() {
        let mut dest = [0 as c_char; 16];
        let mut truncated: c_int = -1;
        unsafe {
            securec_copy(dest.as_mut_ptr(), c"Hi ".as_ptr(), 16, ptr::null_mut());
            let n = securec_concat(dest.as_mut_ptr(), c"Bo".as_ptr(), 16, &mut truncated);
            assert_eq!(n, 5);
        }
        assert_eq!(truncated, 0);
        assert_eq!(as_cstr(&dest), c"Hi Bo");
    }

    #[test]
    fn test_securec_concat_truncation_flagged_despite_long_return() {
        let mut dest = [0 as c_char; 10];
        let mut truncated: c_int = -1;
        let src = c"Ayushman";
        let n = unsafe {
            securec_copy(dest.as_mut_ptr(), c"Hi ".as_ptr(), 10, ptr::null_mut());
            securec_concat(dest.as_mut_ptr(), src.as_ptr(), 10, &mut truncated)
        };
        // Return counts the prefix too, so it is not below strlen(src)
        assert_eq!(n, 9);
        assert!(n as usize > src.to_bytes().len());
        assert_eq!(truncated, 1);
        assert_eq!(as_cstr(&dest), c"Hi Ayushm");
    }
}
