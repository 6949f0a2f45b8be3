//! Cipher block chaining over AES-128 with PKCS#5 padding.

use thiserror::Error;

use crate::block::{load, xor_in_place, Block, BLOCK_LEN};
use crate::cipher::Aes128;
use crate::key::Aes128Key;
use crate::padding::{pad, unpad, PaddingError};

/// Errors from CBC decryption.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CbcError {
    /// Ciphertext is empty or not block aligned.
    #[error("ciphertext length {0} is not a non-zero multiple of 16")]
    Length(usize),
    /// Decrypted data did not end in valid padding (usually a wrong key or IV).
    #[error("bad padding after decryption: {0}")]
    Padding(#[from] PaddingError),
}

/// AES-128-CBC with a fixed initialization vector.
#[derive(Clone, Debug)]
pub struct CbcCipher {
    aes: Aes128,
    iv: Block,
}

impl CbcCipher {
    /// Creates a cipher for `key` and `iv`.
    pub fn new(key: &Aes128Key, iv: Block) -> Self {
        Self {
            aes: Aes128::new(key),
            iv,
        }
    }

    /// Pads and encrypts `plaintext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let padded = pad(plaintext);
        let mut out = Vec::with_capacity(padded.len());
        let mut chain = self.iv;
        for chunk in padded.chunks_exact(BLOCK_LEN) {
            let mut block = load(chunk);
            xor_in_place(&mut block, &chain);
            chain = self.aes.encrypt(&block);
            out.extend_from_slice(&chain);
        }
        out
    }

    /// Decrypts `ciphertext` and strips the padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CbcError> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CbcError::Length(ciphertext.len()));
        }
        let mut out = Vec::with_capacity(ciphertext.len());
        let mut chain = self.iv;
        for chunk in ciphertext.chunks_exact(BLOCK_LEN) {
            let block = load(chunk);
            let mut plain = self.aes.decrypt(&block);
            xor_in_place(&mut plain, &chain);
            out.extend_from_slice(&plain);
            chain = block;
        }
        let len = unpad(&out)?.len();
        out.truncate(len);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp800_38a() -> (Aes128Key, Block) {
        let key: [u8; 16] = hex::decode("2b7e151628aed2a6abf7158809cf4f3c")
            .unwrap()
            .try_into()
            .unwrap();
        let iv: Block = hex::decode("000102030405060708090a0b0c0d0e0f")
            .unwrap()
            .try_into()
            .unwrap();
        (Aes128Key::from(key), iv)
    }

    #[test]
    fn chaining_matches_sp800_38a() {
        let (key, iv) = sp800_38a();
        let cipher = CbcCipher::new(&key, iv);
        let plain = hex::decode(
            "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51",
        )
        .unwrap();
        let out = cipher.encrypt(&plain);
        // Two data blocks plus one padding block.
        assert_eq!(out.len(), 48);
        assert_eq!(
            hex::encode(&out[..32]),
            "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2"
        );
        assert_eq!(cipher.decrypt(&out).unwrap(), plain);
    }

    #[test]
    fn known_string_vector() {
        let key = Aes128Key::from(*b"19a62c9b948585ff");
        let cipher = CbcCipher::new(&key, *b"fedcba9876543210");
        assert_eq!(
            hex::encode(cipher.encrypt(b"hello")),
            "5704a454fafc6895d1033a2b3b923eaf"
        );
    }

    #[test]
    fn rejects_unaligned_ciphertext() {
        let (key, iv) = sp800_38a();
        let cipher = CbcCipher::new(&key, iv);
        assert_eq!(cipher.decrypt(&[]), Err(CbcError::Length(0)));
        assert_eq!(cipher.decrypt(&[0u8; 20]), Err(CbcError::Length(20)));
    }

    #[test]
    fn wrong_iv_breaks_padding_or_data() {
        let (key, iv) = sp800_38a();
        let ct = CbcCipher::new(&key, iv).encrypt(b"attack at dawn");
        let other = CbcCipher::new(&key, [0u8; 16]);
        // Only the first block depends on the IV; the padding lives in it here.
        match other.decrypt(&ct) {
            Ok(pt) => assert_ne!(pt, b"attack at dawn"),
            Err(err) => assert!(matches!(err, CbcError::Padding(_))),
        }
    }
}
