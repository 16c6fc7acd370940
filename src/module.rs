//! Loading and calling an external cipher module
//!
//! A cipher module is a dynamic library exporting
//!
//! ```c
//! char *encrypt(char *text, int key);
//! char *decrypt(char *text, int key);
//! void free_text(char *text);   /* optional */
//! ```
//!
//! The text functions receive a NUL-terminated copy of the input and return
//! a NUL-terminated result. Results are released with `free_text` when the
//! module exports it. Modules without `free_text` leak their results, since
//! memory from a foreign allocator cannot be freed safely from here.

use std::ffi::{CStr, CString, c_char, c_int};
use std::path::{Path, PathBuf};

use libloading::Library;
use tracing::debug;

use crate::error::{CaesarboxError, ErrorCategory, ErrorKind, Result};
use crate::operation::Operation;

type TextFn = unsafe extern "C" fn(*mut c_char, c_int) -> *mut c_char;
type FreeFn = unsafe extern "C" fn(*mut c_char);

/// Symbol used to release result buffers, if the module provides one.
pub const FREE_SYMBOL: &str = "free_text";

/// A loaded cipher module. The library stays open until this is dropped.
#[derive(Debug)]
pub struct CipherModule {
    encrypt: TextFn,
    decrypt: TextFn,
    free: Option<FreeFn>,
    path: PathBuf,
    // Keeps the function pointers above valid.
    _library: Library,
}

impl CipherModule {
    /// Open the library at `path` and resolve its exported functions.
    ///
    /// Fails with `ModuleLoad` if the library cannot be opened, and with
    /// `MissingSymbol` if `encrypt` or `decrypt` is absent. In the latter
    /// case the library is closed again before returning.
    pub fn load(path: &Path) -> Result<Self> {
        // SAFETY: opening a library runs its initializers. The module path is
        // chosen by the user, who is trusted to point at a cipher module.
        let library = unsafe { Library::new(path) }.map_err(|e| {
            CaesarboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::ModuleLoad,
                format!("failed to load cipher module {}", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), "cipher module opened");

        let encrypt = resolve_text_fn(&library, path, Operation::Encrypt)?;
        let decrypt = resolve_text_fn(&library, path, Operation::Decrypt)?;

        // SAFETY: the signature matches the module contract documented above.
        let free = unsafe { library.get::<FreeFn>(FREE_SYMBOL.as_bytes()) }
            .ok()
            .map(|symbol| *symbol);
        debug!(has_free = free.is_some(), "cipher module symbols resolved");

        Ok(Self {
            encrypt,
            decrypt,
            free,
            path: path.to_path_buf(),
            _library: library,
        })
    }

    /// Path the module was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the module exports `free_text`.
    pub fn releases_results(&self) -> bool {
        self.free.is_some()
    }

    pub fn encrypt(&self, text: &[u8], key: i32) -> Result<Vec<u8>> {
        self.apply(Operation::Encrypt, text, key)
    }

    pub fn decrypt(&self, text: &[u8], key: i32) -> Result<Vec<u8>> {
        self.apply(Operation::Decrypt, text, key)
    }

    /// Run `op` over `text` with `key` inside the module.
    pub fn apply(&self, op: Operation, text: &[u8], key: i32) -> Result<Vec<u8>> {
        let func = match op {
            Operation::Encrypt => self.encrypt,
            Operation::Decrypt => self.decrypt,
        };

        let mut buffer = CString::new(text)
            .map_err(|e| {
                let position = e.nul_position();
                CaesarboxError::with_kind_and_source(
                    ErrorCategory::User,
                    ErrorKind::InvalidText,
                    format!("input contains a NUL byte at offset {}", position),
                    e,
                )
            })?
            .into_bytes_with_nul();
        let input = buffer.as_mut_ptr().cast::<c_char>();

        // SAFETY: `input` is a valid NUL-terminated buffer that outlives the
        // call, and `func` was resolved from a library we still hold open.
        let output = unsafe { func(input, key) };
        if output.is_null() {
            return Err(CaesarboxError::with_kind(
                ErrorCategory::Internal,
                ErrorKind::NullResult,
                format!(
                    "cipher module {} returned no result for {}",
                    self.path.display(),
                    op
                ),
            ));
        }

        // SAFETY: non-null results are NUL-terminated strings per the contract.
        let result = unsafe { CStr::from_ptr(output) }.to_bytes().to_vec();
        debug!(%op, input_len = text.len(), output_len = result.len(), "module call finished");

        // Some modules transform the buffer in place and hand it back.
        if output != input {
            self.release(output, result.len());
        }
        Ok(result)
    }

    fn release(&self, output: *mut c_char, len: usize) {
        match self.free {
            // SAFETY: `output` was returned by this module and is not used again.
            Some(free) => unsafe { free(output) },
            None => debug!(len, "module exports no {}; leaking result", FREE_SYMBOL),
        }
    }
}

fn resolve_text_fn(library: &Library, path: &Path, op: Operation) -> Result<TextFn> {
    let name = op.symbol_name();
    // SAFETY: the signature matches the module contract documented above.
    let symbol = unsafe { library.get::<TextFn>(name.as_bytes()) }.map_err(|e| {
        CaesarboxError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::MissingSymbol,
            format!("cipher module {} does not export '{}'", path.display(), name),
            e,
        )
    })?;
    Ok(*symbol)
}
