//! Guard configuration loaded from JSON.
//!
//! The file layout follows the library builder's `config.json`: identity,
//! key material and the names the native binding is registered under.
//! Keys starting with `_comment` are annotations and are dropped before
//! parsing; any other unknown key is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use zj_aes::{Block, BLOCK_LEN};

use crate::check::Identity;
use crate::conceal::ConcealedKey;

/// IV used when the configuration does not name one.
pub const DEFAULT_IV: &str = "fedcba9876543210";

/// Fields that must be present in every configuration.
pub const REQUIRED_FIELDS: [&str; 11] = [
    "package_name",
    "signature_hash",
    "aes_key",
    "interference_char",
    "so_name",
    "jni_class_package",
    "jni_class_name",
    "method_encode",
    "method_decode",
    "method_check",
    "abi_filters",
];

const COMMENT_PREFIX: &str = "_comment";

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The text is not valid JSON or does not fit the schema.
    #[error("parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level JSON value is not an object.
    #[error("configuration must be a JSON object")]
    NotAnObject,
    /// A required field is absent.
    #[error("configuration is missing required field `{0}`")]
    MissingField(&'static str),
    /// A field is present but its value is unusable.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Human readable explanation.
        reason: String,
    },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn default_method_sign() -> String {
    "ZJ_sign".to_owned()
}

fn default_iv() -> String {
    DEFAULT_IV.to_owned()
}

fn default_true() -> bool {
    true
}

/// Parsed configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// Expected application package name.
    pub package_name: String,
    /// Expected signing-certificate hash.
    pub signature_hash: i32,
    /// 16-character AES key.
    pub aes_key: String,
    /// Decoy character placed in front of the base64 key text.
    pub interference_char: String,
    /// Native library name, without `lib` prefix or `.so` suffix.
    pub so_name: String,
    /// Java package of the binding class.
    pub jni_class_package: String,
    /// Simple name of the binding class.
    pub jni_class_name: String,
    /// Method name bound to encode.
    pub method_encode: String,
    /// Method name bound to decode.
    pub method_decode: String,
    /// Method name bound to check.
    pub method_check: String,
    /// Method name bound to sign.
    #[serde(default = "default_method_sign")]
    pub method_sign: String,
    /// Target ABIs for the native library.
    pub abi_filters: Vec<String>,
    /// Secret appended to payloads before MD5 signing.
    #[serde(default)]
    pub sign_key: String,
    /// 16-character CBC initialization vector.
    #[serde(default = "default_iv")]
    pub iv: String,
    /// Whether emulator environments are refused.
    #[serde(default = "default_true")]
    pub reject_emulator: bool,
}

impl GuardConfig {
    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), package = %config.package_name, "loaded configuration");
        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let Value::Object(mut map) = serde_json::from_str::<Value>(text)? else {
            return Err(ConfigError::NotAnObject);
        };
        map.retain(|key, _| !key.starts_with(COMMENT_PREFIX));
        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !map.contains_key(**f)) {
            return Err(ConfigError::MissingField(*missing));
        }
        let config: Self = serde_json::from_value(Value::Object(map))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value constraints that the schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_name.trim().is_empty() {
            return Err(invalid("package_name", "must not be empty"));
        }
        let key_chars = self.aes_key.chars().count();
        if key_chars != BLOCK_LEN || self.aes_key.len() != BLOCK_LEN {
            return Err(invalid(
                "aes_key",
                format!("must be {BLOCK_LEN} ASCII characters, got {key_chars}"),
            ));
        }
        if self.interference_char.chars().count() != 1 {
            return Err(invalid(
                "interference_char",
                format!("must be a single character, got '{}'", self.interference_char),
            ));
        }
        if self.iv.len() != BLOCK_LEN {
            return Err(invalid(
                "iv",
                format!("must be {BLOCK_LEN} bytes, got {}", self.iv.len()),
            ));
        }
        if self.abi_filters.is_empty() {
            return Err(invalid("abi_filters", "must be a non-empty array"));
        }
        let methods = [
            ("method_encode", &self.method_encode),
            ("method_decode", &self.method_decode),
            ("method_check", &self.method_check),
            ("method_sign", &self.method_sign),
        ];
        for (field, name) in methods {
            if name.is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }

    /// Expected identity.
    pub fn identity(&self) -> Identity {
        Identity::new(self.package_name.clone(), self.signature_hash)
    }

    /// Key text concealed behind the configured decoy.
    pub fn concealed_key(&self) -> crate::Result<ConcealedKey> {
        let decoy = self
            .interference_char
            .chars()
            .next()
            .ok_or_else(|| invalid("interference_char", "must be a single character"))?;
        ConcealedKey::conceal(&self.aes_key, decoy)
    }

    /// IV as a block.
    pub fn iv_block(&self) -> crate::Result<Block> {
        self.iv
            .as_bytes()
            .try_into()
            .map_err(|_| crate::GuardError::IvLength(self.iv.len()))
    }

    /// Slash-separated class path, e.g. `com/zyhd/library/net/encrypt/ZJEncrypt`.
    pub fn jni_class_path(&self) -> String {
        format!(
            "{}/{}",
            self.jni_class_package.replace('.', "/"),
            self.jni_class_name
        )
    }

    /// File name of the native library, e.g. `libZJEncrypt.so`.
    pub fn library_file_name(&self) -> String {
        format!("lib{}.so", self.so_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "_comment_key": "16 characters",
            "package_name": "com.example.myapp",
            "signature_hash": -1_550_331_417,
            "aes_key": "19a62c9b948585ff",
            "interference_char": "N",
            "so_name": "ZJEncrypt",
            "jni_class_package": "com.zyhd.library.net.encrypt",
            "jni_class_name": "ZJEncrypt",
            "method_encode": "ZJ_encode",
            "method_decode": "ZJ_decode",
            "method_check": "ZJ_check",
            "abi_filters": ["arm64-v8a", "armeabi-v7a"]
        })
    }

    fn with(field: &str, value: Value) -> String {
        let mut v = sample();
        v[field] = value;
        v.to_string()
    }

    fn without(field: &str) -> String {
        let mut v = sample();
        v.as_object_mut().unwrap().remove(field);
        v.to_string()
    }

    #[test]
    fn parses_sample_with_defaults() {
        let cfg = GuardConfig::from_json(&sample().to_string()).unwrap();
        assert_eq!(cfg.package_name, "com.example.myapp");
        assert_eq!(cfg.method_sign, "ZJ_sign");
        assert_eq!(cfg.iv, DEFAULT_IV);
        assert_eq!(cfg.sign_key, "");
        assert!(cfg.reject_emulator);
        assert_eq!(cfg.jni_class_path(), "com/zyhd/library/net/encrypt/ZJEncrypt");
        assert_eq!(cfg.library_file_name(), "libZJEncrypt.so");
        assert_eq!(cfg.identity(), Identity::new("com.example.myapp", -1_550_331_417));
        assert_eq!(cfg.concealed_key().unwrap().to_string(), "NMTlhNjJjOWI5NDg1ODVmZg==");
        assert_eq!(&cfg.iv_block().unwrap(), b"fedcba9876543210");
    }

    #[test]
    fn every_required_field_is_enforced() {
        for field in REQUIRED_FIELDS {
            match GuardConfig::from_json(&without(field)) {
                Err(ConfigError::MissingField(name)) => assert_eq!(name, field),
                other => panic!("{field}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            ("aes_key", json!("too-short"), "aes_key"),
            ("aes_key", json!("0123456789abcdeé"), "aes_key"),
            ("interference_char", json!("NM"), "interference_char"),
            ("interference_char", json!(""), "interference_char"),
            ("abi_filters", json!([]), "abi_filters"),
            ("iv", json!("short"), "iv"),
            ("package_name", json!("  "), "package_name"),
        ];
        for (field, value, expected) in cases {
            match GuardConfig::from_json(&with(field, value)) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("{field}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_keys_are_rejected_but_comments_are_not() {
        assert!(matches!(
            GuardConfig::from_json(&with("surprise", json!(1))),
            Err(ConfigError::Json(_))
        ));
        assert!(GuardConfig::from_json(&with("_comment_2", json!("note"))).is_ok());
    }

    #[test]
    fn non_object_and_bad_json() {
        assert!(matches!(GuardConfig::from_json("[1, 2]"), Err(ConfigError::NotAnObject)));
        assert!(matches!(GuardConfig::from_json("{"), Err(ConfigError::Json(_))));
        assert!(matches!(
            GuardConfig::from_json(&with("signature_hash", json!("abc"))),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, sample().to_string()).unwrap();
        let cfg = GuardConfig::load(&path).unwrap();
        assert_eq!(cfg.so_name, "ZJEncrypt");

        let missing = dir.path().join("nope.json");
        assert!(matches!(GuardConfig::load(&missing), Err(ConfigError::Io { .. })));
    }
}
