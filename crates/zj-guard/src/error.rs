//! Error types for guarded cipher and signing operations.

use thiserror::Error;
use zj_aes::CbcError;

use crate::check::CheckStatus;
use crate::config::ConfigError;

/// Errors returned by [`Guard`](crate::Guard) and its building blocks.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The application check did not pass.
    #[error("application check failed: {0}")]
    Rejected(CheckStatus),

    /// The application check passed but the process runs on an emulator.
    #[error("emulator environment rejected")]
    Emulator,

    /// Ciphertext or concealed key text is not valid base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Ciphertext is malformed or was produced with another key.
    #[error("decryption failed: {0}")]
    Cipher(#[from] CbcError),

    /// Decrypted bytes are not UTF-8 text.
    #[error("decrypted data is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// AES key material is not 16 bytes.
    #[error("AES-128 key must be 16 bytes, got {0}")]
    KeyLength(usize),

    /// Concealed key text has no characters after the decoy.
    #[error("concealed key text is empty")]
    EmptyConcealedKey,

    /// Initialization vector is not 16 bytes.
    #[error("IV must be 16 bytes, got {0}")]
    IvLength(usize),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GuardError {
    /// True when the operation was refused by the application gate.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Emulator)
    }
}

/// Convenience alias.
pub type Result<T, E = GuardError> = std::result::Result<T, E>;
