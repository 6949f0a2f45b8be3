//! String cipher: `base64(AES-128-CBC(PKCS#5(utf8(text))))`.

use base64::{prelude::BASE64_STANDARD, Engine};
use zj_aes::{Aes128Key, Block, CbcCipher};

use crate::error::Result;

/// Encrypts text to base64 and back.
#[derive(Clone, Debug)]
pub struct StringCipher {
    cbc: CbcCipher,
}

impl StringCipher {
    /// Cipher for `key` with a fixed IV.
    pub fn new(key: &Aes128Key, iv: Block) -> Self {
        Self {
            cbc: CbcCipher::new(key, iv),
        }
    }

    /// Encrypts `plaintext` to padded base64.
    pub fn encrypt(&self, plaintext: &str) -> String {
        BASE64_STANDARD.encode(self.cbc.encrypt(plaintext.as_bytes()))
    }

    /// Decrypts base64 text produced by [`encrypt`](Self::encrypt).
    ///
    /// Surrounding whitespace is ignored.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        let raw = BASE64_STANDARD.decode(ciphertext.trim())?;
        let plain = self.cbc.decrypt(&raw)?;
        Ok(String::from_utf8(plain)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GuardError;

    fn cipher() -> StringCipher {
        StringCipher::new(
            &Aes128Key::from(*b"19a62c9b948585ff"),
            *b"fedcba9876543210",
        )
    }

    #[test]
    fn known_vectors() {
        let c = cipher();
        assert_eq!(c.encrypt("hello"), "VwSkVPr8aJXRAzorO5I+rw==");
        assert_eq!(c.encrypt(""), "CaV2zrwNQhas0oKPKsbDXQ==");
        assert_eq!(
            c.encrypt("0123456789abcdef"),
            "HH8suPsLlvMlS2WjL3XsMEWI+sUZFeZQFlV5lFgx+dw="
        );
        assert_eq!(c.encrypt("加密测试"), "E+Q5+DR4cv6c5m3HtTxfGA==");
    }

    #[test]
    fn decrypts_known_vectors() {
        let c = cipher();
        assert_eq!(c.decrypt("VwSkVPr8aJXRAzorO5I+rw==").unwrap(), "hello");
        assert_eq!(c.decrypt("  E+Q5+DR4cv6c5m3HtTxfGA==\n").unwrap(), "加密测试");
        assert_eq!(c.decrypt("CaV2zrwNQhas0oKPKsbDXQ==").unwrap(), "");
    }

    #[test]
    fn malformed_ciphertext() {
        let c = cipher();
        assert!(matches!(c.decrypt("not base64!"), Err(GuardError::Base64(_))));
        // Valid base64, 3 bytes.
        assert!(matches!(c.decrypt("AAAA"), Err(GuardError::Cipher(_))));
        assert!(matches!(c.decrypt(""), Err(GuardError::Cipher(_))));
    }

    #[test]
    fn wrong_key_does_not_yield_plaintext() {
        let ct = cipher().encrypt("a fairly long secret message");
        let other = StringCipher::new(&Aes128Key::from([7u8; 16]), *b"fedcba9876543210");
        match other.decrypt(&ct) {
            Ok(text) => assert_ne!(text, "a fairly long secret message"),
            Err(err) => assert!(matches!(err, GuardError::Cipher(_) | GuardError::Utf8(_))),
        }
    }
}
