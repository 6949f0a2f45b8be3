//! The string-in/string-out contract of the native binding.
//!
//! Encode, decode and sign return [`UNSIGNATURE`] when the gate refuses the
//! caller; check returns the raw status code. Decode returns an empty string
//! for ciphertext it cannot decrypt.

use crate::config::GuardConfig;
use crate::context::AppContext;
use crate::guard::Guard;

/// Returned in place of a result when the application check fails.
pub const UNSIGNATURE: &str = "UNSIGNATURE";

const STRING_METHOD: &str = "(Ljava/lang/Object;Ljava/lang/String;)Ljava/lang/String;";
const CHECK_METHOD: &str = "(Ljava/lang/Object;)I";

/// Encrypts or returns [`UNSIGNATURE`].
pub fn encode<C: AppContext + ?Sized>(guard: &Guard, ctx: &C, plaintext: &str) -> String {
    guard
        .encode(ctx, plaintext)
        .unwrap_or_else(|_| UNSIGNATURE.to_owned())
}

/// Decrypts, or returns [`UNSIGNATURE`] on refusal and `""` on malformed input.
pub fn decode<C: AppContext + ?Sized>(guard: &Guard, ctx: &C, ciphertext: &str) -> String {
    match guard.decode(ctx, ciphertext) {
        Ok(text) => text,
        Err(err) if err.is_rejection() => UNSIGNATURE.to_owned(),
        Err(err) => {
            tracing::debug!(error = %err, "decode failed");
            String::new()
        }
    }
}

/// Status code: 1 pass, -1 package, -2 signature, -3 unavailable.
pub fn check<C: AppContext + ?Sized>(guard: &Guard, ctx: &C) -> i32 {
    guard.check(ctx).code()
}

/// Signs or returns [`UNSIGNATURE`].
pub fn sign<C: AppContext + ?Sized>(guard: &Guard, ctx: &C, payload: &str) -> String {
    guard
        .sign(ctx, payload)
        .unwrap_or_else(|_| UNSIGNATURE.to_owned())
}

/// Operation a registered method dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// [`encode`]
    Encode,
    /// [`decode`]
    Decode,
    /// [`check`]
    Check,
    /// [`sign`]
    Sign,
}

impl Operation {
    /// JNI type descriptor of the method.
    pub fn descriptor(self) -> &'static str {
        match self {
            Self::Check => CHECK_METHOD,
            Self::Encode | Self::Decode | Self::Sign => STRING_METHOD,
        }
    }
}

/// Value returned by a dispatched call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativeValue {
    /// String result of encode, decode or sign.
    Text(String),
    /// Status code from check.
    Status(i32),
}

/// One registered method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeMethod {
    /// Method name on the binding class.
    pub name: String,
    /// Operation behind it.
    pub operation: Operation,
}

/// Method table: configured names mapped to operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodTable {
    class_path: String,
    methods: Vec<NativeMethod>,
}

impl MethodTable {
    /// Table for the class and method names in `config`.
    pub fn from_config(config: &GuardConfig) -> Self {
        let method = |name: &str, operation| NativeMethod {
            name: name.to_owned(),
            operation,
        };
        Self {
            class_path: config.jni_class_path(),
            methods: vec![
                method(&config.method_check, Operation::Check),
                method(&config.method_decode, Operation::Decode),
                method(&config.method_encode, Operation::Encode),
                method(&config.method_sign, Operation::Sign),
            ],
        }
    }

    /// Slash-separated binding class path.
    pub fn class_path(&self) -> &str {
        &self.class_path
    }

    /// Registered methods in registration order.
    pub fn methods(&self) -> &[NativeMethod] {
        &self.methods
    }

    /// Looks up a method by name.
    pub fn lookup(&self, name: &str) -> Option<Operation> {
        self.methods
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.operation)
    }

    /// Calls the method registered as `name`. `arg` is ignored by check.
    pub fn invoke<C: AppContext + ?Sized>(
        &self,
        guard: &Guard,
        name: &str,
        ctx: &C,
        arg: &str,
    ) -> Option<NativeValue> {
        let value = match self.lookup(name)? {
            Operation::Encode => NativeValue::Text(encode(guard, ctx, arg)),
            Operation::Decode => NativeValue::Text(decode(guard, ctx, arg)),
            Operation::Sign => NativeValue::Text(sign(guard, ctx, arg)),
            Operation::Check => NativeValue::Status(check(guard, ctx)),
        };
        Some(value)
    }
}
