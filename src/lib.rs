//! Caesarbox - Caesar shift file encryption through a loadable cipher module
//!
//! The host side (`module`, `file_ops`, `prompt`) loads any dynamic library
//! exporting `encrypt`/`decrypt` and runs files through it. The `ffi` module
//! exports those same symbols, so this crate's cdylib is itself a module.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod error;
pub mod ffi;
pub mod file_ops;
pub mod logging;
pub mod module;
pub mod operation;
pub mod prompt;
pub mod shift;

pub use error::{CaesarboxError, ErrorCategory, ErrorKind, Result};
pub use module::CipherModule;
pub use operation::Operation;
