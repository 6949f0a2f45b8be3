use std::path::Path;
use std::process::Command;

use serde_json::json;

fn zjguard(args: &[&str]) -> (bool, String) {
    let out = Command::new(env!("CARGO_BIN_EXE_zjguard"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn zjguard");
    (out.status.success(), String::from_utf8_lossy(&out.stdout).trim().to_owned())
}

fn write_config(dir: &Path) -> String {
    let path = dir.join("config.json");
    let body = json!({
        "package_name": "com.example.myapp",
        "signature_hash": 30,
        "aes_key": "19a62c9b948585ff",
        "interference_char": "N",
        "so_name": "MyEncrypt",
        "jni_class_package": "com.example.myapp.utils",
        "jni_class_name": "MyEncrypt",
        "method_encode": "my_encode",
        "method_decode": "my_decode",
        "method_check": "my_check",
        "abi_filters": ["arm64-v8a"],
        "sign_key": "secret"
    });
    std::fs::write(&path, body.to_string()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn encode_decode_sign_with_configured_identity() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path());

    assert_eq!(
        zjguard(&["encode", "--config", &cfg, "hello"]),
        (true, "VwSkVPr8aJXRAzorO5I+rw==".to_owned())
    );
    assert_eq!(
        zjguard(&["decode", "--config", &cfg, "VwSkVPr8aJXRAzorO5I+rw=="]),
        (true, "hello".to_owned())
    );
    assert_eq!(
        zjguard(&["sign", "--config", &cfg, "hello"]),
        (true, "169d2f08070394e933aed366af17936c".to_owned())
    );
    assert_eq!(zjguard(&["check", "--config", &cfg]), (true, "1".to_owned()));
}

#[test]
fn overridden_identity_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path());

    assert_eq!(
        zjguard(&["check", "--config", &cfg, "--package", "com.other"]),
        (true, "-1".to_owned())
    );
    assert_eq!(
        zjguard(&["encode", "--config", &cfg, "--cert-hash", "-5", "hello"]),
        (true, "UNSIGNATURE".to_owned())
    );
    assert_eq!(
        zjguard(&["decode", "--config", &cfg, "--emulator", "VwSkVPr8aJXRAzorO5I+rw=="]),
        (true, "UNSIGNATURE".to_owned())
    );

    // A one-byte 0xff certificate hashes to 30, the configured value.
    let cert = dir.path().join("cert.der");
    std::fs::write(&cert, [0xffu8]).unwrap();
    let cert = cert.to_string_lossy().into_owned();
    assert_eq!(zjguard(&["cert-hash", &cert]), (true, "30".to_owned()));
    assert_eq!(
        zjguard(&["check", "--config", &cfg, "--cert", &cert]),
        (true, "1".to_owned())
    );
}

#[test]
fn conceal_and_inspect() {
    assert_eq!(
        zjguard(&["conceal", "--key", "19a62c9b948585ff", "--decoy", "N"]),
        (true, "NMTlhNjJjOWI5NDg1ODVmZg==".to_owned())
    );
    let (ok, src) = zjguard(&["conceal", "--key", "19a62c9b948585ff", "--decoy", "N", "--rust"]);
    assert!(ok);
    assert!(src.starts_with("pub fn concealed_key() -> String {"));
    assert_eq!(src.matches(".push(").count(), 25);

    let (ok, _) = zjguard(&["conceal", "--key", "short", "--decoy", "N"]);
    assert!(!ok);

    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path());
    let (ok, report) = zjguard(&["inspect", "--config", &cfg]);
    assert!(ok);
    assert!(report.contains("library: libMyEncrypt.so"));
    assert!(report.contains("class: com/example/myapp/utils/MyEncrypt"));
    assert!(report.contains("my_encode (Ljava/lang/Object;Ljava/lang/String;)Ljava/lang/String; -> Encode"));
}

#[test]
fn malformed_ciphertext_fails_decode() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path());
    let (ok, _) = zjguard(&["decode", "--config", &cfg, "AAAA"]);
    assert!(!ok);
}

#[test]
fn seeded_demo_succeeds() {
    let (ok, out) = zjguard(&["demo", "--seed", "7"]);
    assert!(ok);
    assert!(out.contains("stranger gets: UNSIGNATURE"));
}
