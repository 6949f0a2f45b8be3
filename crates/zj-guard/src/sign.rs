//! MD5 request signer.

use zeroize::Zeroize;
use zj_md5::Md5;

/// Signs payloads as `md5_hex(payload || sign_key)`.
#[derive(Clone)]
pub struct Signer {
    key: String,
}

impl Signer {
    /// Signer appending `key` to every payload.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// 32 lowercase hex characters.
    pub fn sign(&self, payload: &str) -> String {
        let mut md5 = Md5::new();
        md5.update(payload.as_bytes());
        md5.update(self.key.as_bytes());
        hex::encode(md5.finalize())
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

impl Drop for Signer {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
