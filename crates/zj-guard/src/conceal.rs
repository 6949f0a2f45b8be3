//! Concealed AES key text: one decoy character followed by the base64 key.
//!
//! The key never sits in a binary as its raw bytes or as one contiguous
//! literal. Generated code rebuilds the text one character at a time, drops
//! the decoy and base64-decodes the rest.

use std::fmt;

use base64::{prelude::BASE64_STANDARD, Engine};
use zeroize::Zeroize;
use zj_aes::{Aes128Key, BLOCK_LEN};

use crate::error::{GuardError, Result};

/// Key text in `decoy + base64(key)` form.
#[derive(Clone, PartialEq, Eq)]
pub struct ConcealedKey {
    decoy: char,
    encoded: String,
}

impl ConcealedKey {
    /// Conceals a 16-byte textual key behind `decoy`.
    pub fn conceal(key: &str, decoy: char) -> Result<Self> {
        if key.len() != BLOCK_LEN {
            return Err(GuardError::KeyLength(key.len()));
        }
        Ok(Self {
            decoy,
            encoded: BASE64_STANDARD.encode(key.as_bytes()),
        })
    }

    /// Splits concealed text into its decoy and encoded parts.
    pub fn parse(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        let decoy = chars.next().ok_or(GuardError::EmptyConcealedKey)?;
        let encoded = chars.as_str();
        if encoded.is_empty() {
            return Err(GuardError::EmptyConcealedKey);
        }
        Ok(Self {
            decoy,
            encoded: encoded.to_owned(),
        })
    }

    /// Decoy character.
    pub fn decoy(&self) -> char {
        self.decoy
    }

    /// Recovers the AES key.
    pub fn reveal(&self) -> Result<Aes128Key> {
        let mut raw = BASE64_STANDARD.decode(&self.encoded)?;
        let key = Aes128Key::from_slice(&raw).ok_or(GuardError::KeyLength(raw.len()));
        raw.zeroize();
        key
    }

    /// Rust source rebuilding the text one `push` at a time into `var`.
    pub fn render_char_pushes(&self, var: &str) -> String {
        let mut out = String::new();
        for ch in std::iter::once(self.decoy).chain(self.encoded.chars()) {
            out.push_str(&format!("    {var}.push({ch:?});\n"));
        }
        out
    }

    /// A complete function named `name` returning the concealed text.
    pub fn render_rust_fn(&self, name: &str) -> String {
        let len = self.decoy.len_utf8() + self.encoded.len();
        format!(
            "pub fn {name}() -> String {{\n    let mut s = String::with_capacity({len});\n{}    s\n}}\n",
            self.render_char_pushes("s")
        )
    }
}

impl fmt::Display for ConcealedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.decoy, self.encoded)
    }
}

impl fmt::Debug for ConcealedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcealedKey")
            .field("decoy", &self.decoy)
            .finish_non_exhaustive()
    }
}

impl Drop for ConcealedKey {
    fn drop(&mut self) {
        self.encoded.zeroize();
    }
}
