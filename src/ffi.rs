//! C ABI exports that make this crate's cdylib a cipher module.
//!
//! The exported symbols are exactly the contract `CipherModule` loads:
//! - `encrypt(text, key)` / `decrypt(text, key)`: take a NUL-terminated
//!   string and a shift key, return a newly allocated NUL-terminated string
//!   or null on failure
//! - `free_text(text)`: releases a string returned by either function
//!
//! No function unwinds across the FFI boundary; panics are turned into a
//! null return.

use std::ffi::{CStr, CString, c_char, c_int};
use std::panic::catch_unwind;
use std::ptr;

use crate::shift;

/// Shift every letter of `text` forward by `key`.
///
/// # Returns
/// A new NUL-terminated string owned by the caller, or null if `text` is null.
/// Release it with `free_text`.
///
/// # Safety
/// - `text` must be null or point to a valid NUL-terminated string
/// - `text` must remain valid for the duration of the call
#[unsafe(no_mangle)]
pub unsafe extern "C" fn encrypt(text: *mut c_char, key: c_int) -> *mut c_char {
    unsafe { transform(text, key, shift::encrypt) }
}

/// Shift every letter of `text` backward by `key`.
///
/// # Safety
/// Same requirements as `encrypt`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn decrypt(text: *mut c_char, key: c_int) -> *mut c_char {
    unsafe { transform(text, key, shift::decrypt) }
}

/// Release a string returned by `encrypt` or `decrypt`. Null is ignored.
///
/// # Safety
/// - `text` must be null or a pointer returned by this module's `encrypt`/`decrypt`
/// - `text` must not be used or freed again after this call
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_text(text: *mut c_char) {
    if text.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        // SAFETY: the pointer came from CString::into_raw in transform().
        drop(unsafe { CString::from_raw(text) });
    });
}

unsafe fn transform(
    text: *const c_char,
    key: c_int,
    cipher: fn(&[u8], i32) -> Vec<u8>,
) -> *mut c_char {
    if text.is_null() {
        return ptr::null_mut();
    }
    // SAFETY: caller guarantees a valid NUL-terminated string.
    let input = unsafe { CStr::from_ptr(text) }.to_bytes();

    let result = catch_unwind(|| match CString::new(cipher(input, key)) {
        Ok(output) => output.into_raw(),
        Err(_) => ptr::null_mut(),
    });
    result.unwrap_or(ptr::null_mut())
}
