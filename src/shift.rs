//! Caesar shift over ASCII letters
//!
//! Letters rotate within their own case by the key reduced modulo 26.
//! Every other byte, including non-ASCII UTF-8 sequences, passes through
//! unchanged, so the output always has the same length as the input.

/// Number of letters in the ASCII alphabet.
pub const ALPHABET_LEN: i32 = 26;

/// Reduce any integer key to a forward shift in `0..26`.
pub fn normalize_key(key: i32) -> u8 {
    key.rem_euclid(ALPHABET_LEN) as u8
}

/// Shift a single byte forward by `shift` positions (already normalized).
fn rotate(byte: u8, shift: u8) -> u8 {
    let base = if byte.is_ascii_lowercase() {
        b'a'
    } else if byte.is_ascii_uppercase() {
        b'A'
    } else {
        return byte;
    };
    (byte - base + shift) % ALPHABET_LEN as u8 + base
}

/// Shift one byte forward by `key`.
pub fn shift_byte(byte: u8, key: i32) -> u8 {
    rotate(byte, normalize_key(key))
}

/// Encrypt `text` by shifting every letter forward by `key`.
pub fn encrypt(text: &[u8], key: i32) -> Vec<u8> {
    let shift = normalize_key(key);
    text.iter().map(|&b| rotate(b, shift)).collect()
}

/// Decrypt `text` by shifting every letter backward by `key`.
pub fn decrypt(text: &[u8], key: i32) -> Vec<u8> {
    // Backward by k is forward by 26 - k.
    let shift = (ALPHABET_LEN as u8 - normalize_key(key)) % ALPHABET_LEN as u8;
    text.iter().map(|&b| rotate(b, shift)).collect()
}
