//! A deliberately unusual cipher module for exercising the host.
//!
//! - `encrypt` shifts the caller's buffer in place and returns that same pointer
//! - `decrypt` returns null for key 0; otherwise it returns a fresh buffer
//! - there is no `free_text`, so the host must not try to release results
//!
//! It does not link the caesarbox library, whose own exports would clash.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;

fn shift_byte(byte: u8, key: i32) -> u8 {
    let base = match byte {
        b'a'..=b'z' => b'a',
        b'A'..=b'Z' => b'A',
        _ => return byte,
    };
    (byte - base + key.rem_euclid(26) as u8) % 26 + base
}

/// # Safety
/// `text` must be null or a valid, writable NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn encrypt(text: *mut c_char, key: c_int) -> *mut c_char {
    if text.is_null() {
        return ptr::null_mut();
    }
    // SAFETY: caller guarantees a valid NUL-terminated string.
    let len = unsafe { CStr::from_ptr(text) }.to_bytes().len();
    // SAFETY: `len` bytes before the terminator are owned by the caller and writable.
    let bytes = unsafe { std::slice::from_raw_parts_mut(text.cast::<u8>(), len) };
    for byte in bytes.iter_mut() {
        *byte = shift_byte(*byte, key);
    }
    text
}

/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn decrypt(text: *mut c_char, key: c_int) -> *mut c_char {
    if text.is_null() || key == 0 {
        return ptr::null_mut();
    }
    // SAFETY: caller guarantees a valid NUL-terminated string.
    let input = unsafe { CStr::from_ptr(text) }.to_bytes();
    let back = 26 - key.rem_euclid(26);
    let output: Vec<u8> = input.iter().map(|&b| shift_byte(b, back)).collect();
    match CString::new(output) {
        Ok(output) => output.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}
