//! Locating the cipher module
//!
//! Resolution order:
//! 1. explicit path (`--module`, or `CAESARBOX_MODULE` via clap's env support);
//!    a bare file name that exists in the working directory is anchored there,
//!    since the platform loader would otherwise only search its own path
//! 2. the platform library file for [`DEFAULT_MODULE_NAME`] next to the
//!    running executable
//! 3. the bare platform file name, left to the system loader's search path

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming the module path.
pub const MODULE_ENV: &str = "CAESARBOX_MODULE";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "CAESARBOX_LOG";

/// Library stem of the bundled reference module.
pub const DEFAULT_MODULE_NAME: &str = "caesarbox";

/// Where a module path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSource {
    /// Given on the command line or through the environment.
    Explicit,
    /// Found alongside the running executable.
    ExecutableDir,
    /// Handed to the platform loader's own search.
    LoaderSearch,
}

impl fmt::Display for ModuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModuleSource::Explicit => "explicit",
            ModuleSource::ExecutableDir => "executable directory",
            ModuleSource::LoaderSearch => "loader search path",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLocation {
    pub path: PathBuf,
    pub source: ModuleSource,
}

/// Platform file name of the default module (`libcaesarbox.so`, `caesarbox.dll`, ...).
pub fn default_module_file_name() -> OsString {
    libloading::library_filename(DEFAULT_MODULE_NAME)
}

/// Resolve the module path from an explicit choice and the executable's directory.
pub fn locate_module(explicit: Option<&Path>, exe_dir: Option<&Path>) -> ModuleLocation {
    if let Some(path) = explicit {
        return ModuleLocation {
            path: anchor_bare_name(path),
            source: ModuleSource::Explicit,
        };
    }

    let file_name = default_module_file_name();
    if let Some(dir) = exe_dir {
        let candidate = dir.join(&file_name);
        if candidate.is_file() {
            return ModuleLocation {
                path: candidate,
                source: ModuleSource::ExecutableDir,
            };
        }
    }

    ModuleLocation {
        path: PathBuf::from(file_name),
        source: ModuleSource::LoaderSearch,
    }
}

/// Prefix `./` to a single-component path naming a file in the working directory.
fn anchor_bare_name(path: &Path) -> PathBuf {
    if path.components().count() == 1 && path.file_name().is_some() && path.is_file() {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

/// Directory containing the running executable, if it can be determined.
pub fn current_exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
