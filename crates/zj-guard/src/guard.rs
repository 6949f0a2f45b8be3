//! Application-gated cipher and signer.

use zj_aes::Block;

use crate::check::{CheckStatus, Identity};
use crate::cipher::StringCipher;
use crate::conceal::ConcealedKey;
use crate::config::GuardConfig;
use crate::context::AppContext;
use crate::error::{GuardError, Result};
use crate::sign::Signer;

/// Encrypts, decrypts and signs on behalf of one verified application.
///
/// Every operation except [`check`](Self::check) first verifies the calling
/// context and refuses to run for a repackaged or re-signed application.
#[derive(Clone, Debug)]
pub struct Guard {
    identity: Identity,
    cipher: StringCipher,
    signer: Signer,
    reject_emulator: bool,
}

impl Guard {
    /// Builds a guard from its parts. The key is revealed once, here.
    pub fn new(
        identity: Identity,
        key: &ConcealedKey,
        iv: Block,
        sign_key: impl Into<String>,
    ) -> Result<Self> {
        let key = key.reveal()?;
        Ok(Self {
            identity,
            cipher: StringCipher::new(&key, iv),
            signer: Signer::new(sign_key),
            reject_emulator: true,
        })
    }

    /// Builds a guard from a validated configuration.
    pub fn from_config(config: &GuardConfig) -> Result<Self> {
        config.validate()?;
        let guard = Self::new(
            config.identity(),
            &config.concealed_key()?,
            config.iv_block()?,
            config.sign_key.clone(),
        )?;
        Ok(guard.reject_emulator(config.reject_emulator))
    }

    /// Sets whether emulator contexts are refused (default: refused).
    pub fn reject_emulator(mut self, reject: bool) -> Self {
        self.reject_emulator = reject;
        self
    }

    /// Expected identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Verifies the package name and signing certificate of `ctx`.
    pub fn check<C: AppContext + ?Sized>(&self, ctx: &C) -> CheckStatus {
        let status = self.identity.verify(ctx);
        tracing::debug!(%status, "application check");
        status
    }

    fn admit<C: AppContext + ?Sized>(&self, ctx: &C) -> Result<()> {
        let status = self.check(ctx);
        if !status.is_passed() {
            tracing::warn!(%status, "refusing operation for unverified application");
            return Err(GuardError::Rejected(status));
        }
        if self.reject_emulator && ctx.is_emulator() {
            tracing::warn!("refusing operation on emulator");
            return Err(GuardError::Emulator);
        }
        Ok(())
    }

    /// Encrypts `plaintext` to base64.
    pub fn encode<C: AppContext + ?Sized>(&self, ctx: &C, plaintext: &str) -> Result<String> {
        self.admit(ctx)?;
        Ok(self.cipher.encrypt(plaintext))
    }

    /// Decrypts base64 produced by [`encode`](Self::encode).
    pub fn decode<C: AppContext + ?Sized>(&self, ctx: &C, ciphertext: &str) -> Result<String> {
        self.admit(ctx)?;
        self.cipher.decrypt(ciphertext)
    }

    /// Signs `payload` as `md5_hex(payload || sign_key)`.
    pub fn sign<C: AppContext + ?Sized>(&self, ctx: &C, payload: &str) -> Result<String> {
        self.admit(ctx)?;
        Ok(self.signer.sign(payload))
    }
}
