//! What the guard may ask of the calling application.

/// Facts about the running application.
///
/// Each lookup may fail (`None`), which the verifier reports as
/// [`CheckStatus::ContextUnavailable`](crate::CheckStatus::ContextUnavailable).
pub trait AppContext {
    /// Package name of the running application.
    fn package_name(&self) -> Option<String>;

    /// Hash of the first signing certificate, as computed by [`signature_hash`].
    fn signature_hash(&self) -> Option<i32>;

    /// Whether the process appears to run on an emulator.
    fn is_emulator(&self) -> bool {
        false
    }
}

/// Hash of a signing certificate's encoded bytes.
///
/// Same value as `java.util.Arrays.hashCode(byte[])`, which is what
/// `android.content.pm.Signature.hashCode()` returns: bytes are sign-extended
/// and folded with `h = 31 * h + b`, starting at 1, with 32-bit wrapping.
pub fn signature_hash(certificate: &[u8]) -> i32 {
    certificate
        .iter()
        .fold(1i32, |h, &b| h.wrapping_mul(31).wrapping_add(i32::from(b as i8)))
}

/// Context built from known values, for tests, tooling and host processes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticContext {
    package_name: Option<String>,
    signature_hash: Option<i32>,
    emulator: bool,
}

impl StaticContext {
    /// Context reporting `package_name` signed with a certificate hashing to `signature_hash`.
    pub fn new(package_name: impl Into<String>, signature_hash: i32) -> Self {
        Self {
            package_name: Some(package_name.into()),
            signature_hash: Some(signature_hash),
            emulator: false,
        }
    }

    /// Context whose hash is computed from the raw certificate bytes.
    pub fn from_certificate(package_name: impl Into<String>, certificate: &[u8]) -> Self {
        Self::new(package_name, signature_hash(certificate))
    }

    /// Context where every lookup fails.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Marks the context as running on an emulator.
    pub fn with_emulator(mut self, emulator: bool) -> Self {
        self.emulator = emulator;
        self
    }

    /// Drops the package name, as if the lookup failed.
    pub fn without_package(mut self) -> Self {
        self.package_name = None;
        self
    }

    /// Drops the certificate hash, as if the lookup failed.
    pub fn without_signature(mut self) -> Self {
        self.signature_hash = None;
        self
    }
}

impl AppContext for StaticContext {
    fn package_name(&self) -> Option<String> {
        self.package_name.clone()
    }

    fn signature_hash(&self) -> Option<i32> {
        self.signature_hash
    }

    fn is_emulator(&self) -> bool {
        self.emulator
    }
}

impl<T: AppContext + ?Sized> AppContext for &T {
    fn package_name(&self) -> Option<String> {
        (**self).package_name()
    }

    fn signature_hash(&self) -> Option<i32> {
        (**self).signature_hash()
    }

    fn is_emulator(&self) -> bool {
        (**self).is_emulator()
    }
}
