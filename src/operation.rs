use std::fmt;
use std::str::FromStr;

use crate::error::{CaesarboxError, ErrorCategory, ErrorKind};

/// Which direction to run the cipher in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl Operation {
    /// Name of the symbol a cipher module exports for this operation.
    pub fn symbol_name(self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol_name())
    }
}

impl FromStr for Operation {
    type Err = CaesarboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" | "e" => Ok(Operation::Encrypt),
            "decrypt" | "d" => Ok(Operation::Decrypt),
            other => Err(CaesarboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::InvalidOperation,
                format!("unknown operation '{}'; expected encrypt or decrypt", other),
            )),
        }
    }
}
