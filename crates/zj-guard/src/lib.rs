//! Application-gated AES string cipher and MD5 request signer.
//!
//! A [`Guard`] holds an expected [`Identity`] (package name and signing
//! certificate hash), a [`ConcealedKey`] and a signing secret. Callers pass an
//! [`AppContext`] describing themselves; encode, decode and sign run only for
//! the expected application.
//!
//! ```
//! use zj_guard::{ConcealedKey, Guard, Identity, StaticContext};
//!
//! let key = ConcealedKey::conceal("19a62c9b948585ff", 'N').unwrap();
//! let guard = Guard::new(
//!     Identity::new("com.example.myapp", 42),
//!     &key,
//!     *b"fedcba9876543210",
//!     "secret",
//! )
//! .unwrap();
//! let ctx = StaticContext::new("com.example.myapp", 42);
//! let sealed = guard.encode(&ctx, "hello").unwrap();
//! assert_eq!(guard.decode(&ctx, &sealed).unwrap(), "hello");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod check;
mod cipher;
mod conceal;
mod config;
mod context;
mod error;
mod guard;
pub mod native;
mod sign;

pub use crate::check::{CheckStatus, Identity};
pub use crate::cipher::StringCipher;
pub use crate::conceal::ConcealedKey;
pub use crate::config::{ConfigError, GuardConfig, DEFAULT_IV, REQUIRED_FIELDS};
pub use crate::context::{signature_hash, AppContext, StaticContext};
pub use crate::error::{GuardError, Result};
pub use crate::guard::Guard;
pub use crate::sign::Signer;
