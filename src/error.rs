//! Card Errors
//!
//! Only configuration errors reach the host; the rest are logged and skipped.

use serde::{Deserialize, Serialize};

/// Common result type for card operations
pub type CardResult<T> = Result<T, CardError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardError {
    /// Invalid or incomplete card configuration (fatal at setup)
    Config(String),
    /// Host value could not be decoded into the expected shape
    Decode(String),
    /// Host call failed synchronously
    Host(String),
}

impl std::fmt::Display for CardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardError::Config(msg) => write!(f, "{}", msg),
            CardError::Decode(msg) => write!(f, "Decode error: {}", msg),
            CardError::Host(msg) => write!(f, "Host error: {}", msg),
        }
    }
}

impl std::error::Error for CardError {}
