//! AES-128 building blocks for the zjguard string cipher.
//!
//! Provides:
//! - FIPS-197 key schedule and single-block encryption/decryption,
//! - PKCS#5 (PKCS#7 over 16-byte blocks) padding,
//! - CBC mode with a caller-supplied IV.
//!
//! Lookups are table based and not constant time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cbc;
mod cipher;
mod key;
mod padding;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_LEN};
pub use crate::cbc::{CbcCipher, CbcError};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, Aes128};
pub use crate::key::{Aes128Key, RoundKeys};
pub use crate::padding::{pad, unpad, PaddingError};
