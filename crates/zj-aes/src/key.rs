//! Key material for AES-128.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{Block, BLOCK_LEN};

/// AES-128 key. Wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Aes128Key([u8; BLOCK_LEN]);

impl Aes128Key {
    /// Builds a key from a slice, returning `None` unless it is exactly 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; BLOCK_LEN] = bytes.try_into().ok()?;
        Some(Self(raw))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_LEN] {
        &self.0
    }
}

impl From<[u8; BLOCK_LEN]> for Aes128Key {
    fn from(value: [u8; BLOCK_LEN]) -> Self {
        Self(value)
    }
}

// Never print key bytes.
impl core::fmt::Debug for Aes128Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Aes128Key(..)")
    }
}

/// The eleven round keys produced by the AES-128 key schedule.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys(pub(crate) [Block; 11]);

impl RoundKeys {
    /// Round key for `round` (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }
}

impl core::fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("RoundKeys(..)")
    }
}
