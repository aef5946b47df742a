use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

const KEY: &str = "some secret key";
const PASSWORD: &str = "some secret password";

/// Binary with a pinned empty config, secret key and password.
fn bin(dir: &Path) -> Command {
    let config = dir.join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sealkit"));
    cmd.env("SEALKIT_CONFIG", &config)
        .env("SEALKIT_KEY", KEY)
        .env("SEALKIT_PASSWORD", PASSWORD)
        .env_remove("RUST_LOG");
    cmd
}

fn encrypt_file(dir: &TempDir, data: &[u8]) -> std::path::PathBuf {
    let input = dir.path().join("plain.txt");
    let output = dir.path().join("sealed.txt");
    fs::write(&input, data).unwrap();

    bin(dir.path())
        .arg("encrypt")
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .assert()
        .success();

    output
}

#[test]
fn encrypt_and_decrypt_files_roundtrip() {
    let dir = tempdir().unwrap();
    let sealed = encrypt_file(&dir, b"some secret data");
    let opened = dir.path().join("opened.txt");

    assert_ne!(fs::read(&sealed).unwrap(), b"some secret data");

    bin(dir.path())
        .arg("decrypt")
        .arg("--in")
        .arg(&sealed)
        .arg("--out")
        .arg(&opened)
        .assert()
        .success();

    assert_eq!(fs::read(opened).unwrap(), b"some secret data");
}

#[test]
fn stdin_stdout_roundtrip() {
    let dir = tempdir().unwrap();

    let output = bin(dir.path())
        .arg("encrypt")
        .write_stdin("hello")
        .output()
        .unwrap();
    assert!(output.status.success());

    bin(dir.path())
        .arg("decrypt")
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout("hello");
}

#[test]
fn raw_mode_roundtrip() {
    let dir = tempdir().unwrap();

    let output = bin(dir.path())
        .args(["encrypt", "--raw", "--algorithm", "aes-128-cbc"])
        .write_stdin("raw bytes")
        .output()
        .unwrap();
    assert!(output.status.success());
    // salt + iv + one block + tag
    assert_eq!(output.stdout.len(), 16 + 16 + 16 + 32);

    bin(dir.path())
        .args(["decrypt", "--raw", "--algorithm", "AES-128-CBC"])
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout("raw bytes");
}

#[test]
fn wrong_key_fails_hash_validation() {
    let dir = tempdir().unwrap();
    let sealed = encrypt_file(&dir, b"some secret data");

    bin(dir.path())
        .env("SEALKIT_KEY", "another key")
        .arg("decrypt")
        .arg("--in")
        .arg(&sealed)
        .assert()
        .failure()
        .stderr(predicate::str::contains("hash validation failed"));
}

#[test]
fn corrupted_envelope_fails() {
    let dir = tempdir().unwrap();
    let sealed = encrypt_file(&dir, b"some secret data");

    let text = fs::read_to_string(&sealed).unwrap();
    let replacement = if text.starts_with('x') { "y" } else { "x" };
    fs::write(&sealed, format!("{replacement}{}", &text[1..])).unwrap();

    bin(dir.path())
        .arg("decrypt")
        .arg("--in")
        .arg(&sealed)
        .assert()
        .failure()
        .stderr(predicate::str::contains("hash validation failed"));
}

#[test]
fn key_file_overrides_environment() {
    let dir = tempdir().unwrap();
    let key_file = dir.path().join("key");
    fs::write(&key_file, "file key").unwrap();

    let output = bin(dir.path())
        .arg("encrypt")
        .arg("--key-file")
        .arg(&key_file)
        .write_stdin("data")
        .output()
        .unwrap();
    assert!(output.status.success());

    bin(dir.path())
        .env("SEALKIT_KEY", "file key")
        .arg("decrypt")
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout("data");
}

#[test]
fn key_file_trailing_newline_is_part_of_the_key() {
    let dir = tempdir().unwrap();
    let key_file = dir.path().join("key");
    fs::write(&key_file, "file key\n").unwrap();

    let output = bin(dir.path())
        .arg("encrypt")
        .arg("--key-file")
        .arg(&key_file)
        .write_stdin("data")
        .output()
        .unwrap();
    assert!(output.status.success());

    bin(dir.path())
        .env("SEALKIT_KEY", "file key")
        .arg("decrypt")
        .write_stdin(output.stdout.clone())
        .assert()
        .failure()
        .stderr(predicate::str::contains("hash validation failed"));

    bin(dir.path())
        .arg("decrypt")
        .arg("--key-file")
        .arg(&key_file)
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout("data");
}

#[test]
fn output_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("sealed.txt");

    bin(dir.path())
        .arg("encrypt")
        .arg("--out")
        .arg(&output)
        .write_stdin("data")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to write"));

    assert!(!output.exists());
}

#[test]
fn missing_key_fails() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .env_remove("SEALKIT_KEY")
        .arg("encrypt")
        .write_stdin("data")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SEALKIT_KEY"));
}

#[test]
fn unsupported_algorithm_fails() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .args(["encrypt", "--algorithm", "FOO"])
        .write_stdin("data")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported cipher algorithm FOO"));
}

#[test]
fn algorithm_from_config_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"encrypter": {"algorithm": "nope"}}"#,
    )
    .unwrap();

    bin(dir.path())
        .arg("encrypt")
        .write_stdin("data")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported cipher algorithm nope"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .arg("ciphers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn ciphers_lists_supported_algorithms() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .arg("ciphers")
        .assert()
        .success()
        .stdout(predicate::str::contains("aes-256-cbc"))
        .stdout(predicate::str::contains("aes-128-cbc"))
        .stdout(predicate::str::contains("camellia-256-cbc"));
}

#[test]
fn hash_with_bcrypt() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .args(["hash", "--bcrypt", "--cost", "4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$2y$04$"));
}

#[test]
fn hash_with_argon2id() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .args([
            "hash",
            "--argon-variant",
            "argon2id",
            "--argon-mem",
            "256",
            "--argon-time",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$argon2id$v=19$m=256,t=1,p=1$"));
}

#[test]
fn hash_rejects_low_bcrypt_cost() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .args(["hash", "--bcrypt", "--cost", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be >= 4"));
}

#[test]
fn hash_rejects_long_bcrypt_password() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .env("SEALKIT_PASSWORD", "x".repeat(73))
        .args(["hash", "--bcrypt", "--cost", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("longer than 72 bytes"));
}

#[test]
fn hash_reads_password_from_stdin() {
    let dir = tempdir().unwrap();

    bin(dir.path())
        .env_remove("SEALKIT_PASSWORD")
        .args(["hash", "--bcrypt", "--cost", "4"])
        .write_stdin("piped password\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$2y$04$"));
}
