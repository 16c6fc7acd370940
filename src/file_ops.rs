//! File encryption/decryption operations
//!
//! Reads a whole input file, runs it through a loaded cipher module and
//! writes the result. Output is written to a temporary file in the target
//! directory and renamed into place, so a failed run never leaves a partial
//! output file behind.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::error::{CaesarboxError, ErrorCategory, ErrorKind, Result};
use crate::module::CipherModule;
use crate::operation::Operation;

/// Encrypt the contents of `input_path` into `output_path` with `key`.
pub fn encrypt_file(
    module: &CipherModule,
    input_path: &Path,
    output_path: &Path,
    key: i32,
) -> Result<()> {
    transform_file(module, Operation::Encrypt, input_path, output_path, key)
}

/// Decrypt the contents of `input_path` into `output_path` with `key`.
pub fn decrypt_file(
    module: &CipherModule,
    input_path: &Path,
    output_path: &Path,
    key: i32,
) -> Result<()> {
    transform_file(module, Operation::Decrypt, input_path, output_path, key)
}

/// Read `input_path`, apply `op` through `module`, and atomically write the
/// result to `output_path`.
pub fn transform_file(
    module: &CipherModule,
    op: Operation,
    input_path: &Path,
    output_path: &Path,
    key: i32,
) -> Result<()> {
    let text = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    let result = module
        .apply(op, &text, key)
        .map_err(|e| e.with_context(format!("{} failed", op)))?;
    write_file_atomic(output_path, &result)
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    info!(%op, output = %output_path.display(), bytes = result.len(), "output written");
    Ok(())
}

/// Write `contents` to a tempfile beside `path`, fsync, then rename over `path`.
///
/// An existing target keeps its permissions. A new file gets the same mode
/// a plain create would (0o666 less the umask on Unix).
fn write_file_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path)
        .ok()
        .filter(|metadata| metadata.is_file())
        .map(|metadata| metadata.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut temp_file = builder.tempfile_in(dir).map_err(|e| {
        CaesarboxError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            format!("failed to create tempfile in {}", dir.display()),
            e,
        )
    })?;

    if let Some(permissions) = existing {
        temp_file.as_file().set_permissions(permissions).map_err(|e| {
            CaesarboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                "failed to copy permissions of existing output",
                e,
            )
        })?;
    }

    temp_file.write_all(contents).map_err(|e| {
        CaesarboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to write to tempfile",
            e,
        )
    })?;
    // Flush and fsync() such that the rename, if it succeeds, always points
    // to a complete file.
    temp_file.flush().map_err(|e| {
        CaesarboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to flush tempfile",
            e,
        )
    })?;
    temp_file.as_file().sync_all().map_err(|e| {
        CaesarboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to sync file prior to rename",
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        CaesarboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            format!("failed to rename to target file {}", path.display()),
            e,
        )
    })?;
    Ok(())
}

fn read_error(path: &Path, err: io::Error) -> CaesarboxError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    CaesarboxError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}
