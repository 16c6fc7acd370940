//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use caesarbox::config::{DEFAULT_MODULE_NAME, default_module_file_name};

/// Path to the caesarbox binary built for this test run
pub fn caesarbox_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_caesarbox"))
}

/// Path to this crate's own cdylib, the bundled reference cipher module.
///
/// Cargo places it next to the binary; the deps directory is checked as a
/// fallback.
pub fn reference_module() -> PathBuf {
    let file_name = default_module_file_name();
    let bin = caesarbox_bin();
    let mut candidates = Vec::new();
    if let Some(dir) = bin.parent() {
        candidates.push(dir.join(&file_name));
        candidates.push(dir.join("deps").join(&file_name));
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(deps) = exe.parent() {
            candidates.push(deps.join(&file_name));
        }
    }

    candidates
        .into_iter()
        .find(|path| path.is_file())
        .unwrap_or_else(|| {
            panic!(
                "built {} module not found next to {}",
                DEFAULT_MODULE_NAME,
                bin.display()
            )
        })
}

/// Path to the `fixture_module` example cdylib: in-place `encrypt`, `decrypt`
/// returning null for key 0, and no `free_text`.
pub fn fixture_module() -> PathBuf {
    let bin = caesarbox_bin();
    let examples = bin
        .parent()
        .expect("binary has a parent directory")
        .join("examples");
    let exact = examples.join(libloading::library_filename("fixture_module"));
    if exact.is_file() {
        return exact;
    }

    // Fall back to a hashed copy of the same library.
    let prefix = format!("{}fixture_module", std::env::consts::DLL_PREFIX);
    std::fs::read_dir(&examples)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .find(|path| {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            name.starts_with(&prefix) && name.ends_with(std::env::consts::DLL_SUFFIX)
        })
        .unwrap_or_else(|| panic!("fixture_module not built in {}", examples.display()))
}

/// Get path to a file in the testdata directory
pub fn testdata_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("testdata");
    path.push(filename);
    path
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("test paths are UTF-8")
}
