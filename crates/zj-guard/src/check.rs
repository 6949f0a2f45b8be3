//! Package and signing-certificate verification.

use std::fmt;

use crate::context::AppContext;

/// Outcome of verifying an application context.
///
/// The integer codes are the wire contract of the `check` operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CheckStatus {
    /// Package and certificate both match.
    Passed = 1,
    /// The package name differs from the expected one.
    PackageMismatch = -1,
    /// The package matches but the certificate hash does not.
    SignatureMismatch = -2,
    /// The context could not supply its package name or certificate.
    ContextUnavailable = -3,
}

impl CheckStatus {
    /// Integer status code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Parses a status code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Passed),
            -1 => Some(Self::PackageMismatch),
            -2 => Some(Self::SignatureMismatch),
            -3 => Some(Self::ContextUnavailable),
            _ => None,
        }
    }

    /// True only for [`CheckStatus::Passed`].
    pub fn is_passed(self) -> bool {
        self == Self::Passed
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Passed => "passed",
            Self::PackageMismatch => "package name mismatch",
            Self::SignatureMismatch => "signature mismatch",
            Self::ContextUnavailable => "context unavailable",
        };
        write!(f, "{text} ({})", self.code())
    }
}

/// Expected package name and certificate hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Application package name, e.g. `com.example.myapp`.
    pub package_name: String,
    /// Expected [`signature_hash`](crate::signature_hash) of the signing certificate.
    pub signature_hash: i32,
}

impl Identity {
    /// Creates an identity.
    pub fn new(package_name: impl Into<String>, signature_hash: i32) -> Self {
        Self {
            package_name: package_name.into(),
            signature_hash,
        }
    }

    /// Verifies `ctx` against this identity.
    ///
    /// Both lookups happen before any comparison, so a context missing either
    /// value reports `ContextUnavailable` even if the other would mismatch.
    pub fn verify<C: AppContext + ?Sized>(&self, ctx: &C) -> CheckStatus {
        let (Some(package), Some(hash)) = (ctx.package_name(), ctx.signature_hash()) else {
            return CheckStatus::ContextUnavailable;
        };
        if package != self.package_name {
            CheckStatus::PackageMismatch
        } else if hash != self.signature_hash {
            CheckStatus::SignatureMismatch
        } else {
            CheckStatus::Passed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticContext;

    fn identity() -> Identity {
        Identity::new("com.example.myapp", 1_234_567)
    }

    #[test]
    fn matching_context_passes() {
        let ctx = StaticContext::new("com.example.myapp", 1_234_567);
        assert_eq!(identity().verify(&ctx), CheckStatus::Passed);
    }

    #[test]
    fn package_is_compared_before_hash() {
        let ctx = StaticContext::new("com.evil.repack", 42);
        assert_eq!(identity().verify(&ctx), CheckStatus::PackageMismatch);
    }

    #[test]
    fn wrong_certificate() {
        let ctx = StaticContext::new("com.example.myapp", 42);
        assert_eq!(identity().verify(&ctx), CheckStatus::SignatureMismatch);
    }

    #[test]
    fn missing_lookups_win_over_mismatches() {
        let ctx = StaticContext::new("com.evil.repack", 42).without_signature();
        assert_eq!(identity().verify(&ctx), CheckStatus::ContextUnavailable);
        let ctx = StaticContext::new("com.example.myapp", 1_234_567).without_package();
        assert_eq!(identity().verify(&ctx), CheckStatus::ContextUnavailable);
        assert_eq!(
            identity().verify(&StaticContext::unavailable()),
            CheckStatus::ContextUnavailable
        );
    }

    #[test]
    fn codes_round_trip() {
        for status in [
            CheckStatus::Passed,
            CheckStatus::PackageMismatch,
            CheckStatus::SignatureMismatch,
            CheckStatus::ContextUnavailable,
        ] {
            assert_eq!(CheckStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(CheckStatus::from_code(0), None);
        assert_eq!(CheckStatus::SignatureMismatch.to_string(), "signature mismatch (-2)");
    }
}
