//! Loading the bundled reference module through `CipherModule`

mod common;

use std::fs;

use caesarbox::{CipherModule, ErrorCategory, ErrorKind, Operation, file_ops};
use tempfile::TempDir;

fn load() -> CipherModule {
    CipherModule::load(&common::reference_module()).expect("failed to load reference module")
}

#[test]
fn test_module_exports_free_text() {
    let module = load();
    assert!(module.releases_results());
    assert_eq!(module.path(), common::reference_module().as_path());
}

#[test]
fn test_roundtrip_through_module() {
    let module = load();
    let plaintext = b"Hello, World!";

    let encrypted = module.encrypt(plaintext, 1).unwrap();
    assert_eq!(encrypted, b"Ifmmp, Xpsme!");

    let decrypted = module.decrypt(&encrypted, 1).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_apply_dispatches_on_operation() {
    let module = load();
    assert_eq!(module.apply(Operation::Encrypt, b"abc", 2).unwrap(), b"cde");
    assert_eq!(module.apply(Operation::Decrypt, b"cde", 2).unwrap(), b"abc");
}

#[test]
fn test_interior_nul_rejected() {
    let module = load();
    let err = module
        .encrypt(b"before\0after", 1)
        .expect_err("expected NUL rejection");
    assert_eq!(err.kind, Some(ErrorKind::InvalidText));
    assert_eq!(err.category, ErrorCategory::User);
    assert!(err.message().contains("offset 6"));
}

#[test]
fn test_module_reloads_independently() {
    let first = load();
    let second = load();
    drop(first);
    assert_eq!(second.encrypt(b"z", 1).unwrap(), b"a");
}

#[test]
fn test_encrypt_decrypt_file_roundtrip() {
    let module = load();
    let temp_dir = TempDir::new().unwrap();
    let plain_path = temp_dir.path().join("plain.txt");
    let crypt_path = temp_dir.path().join("plain.txt.caesar");
    let decrypted_path = temp_dir.path().join("decrypted.txt");

    let plaintext = b"Meet me at the usual place.\nBring snacks.\n";
    fs::write(&plain_path, plaintext).unwrap();

    file_ops::encrypt_file(&module, &plain_path, &crypt_path, 7).unwrap();
    let ciphertext = fs::read(&crypt_path).unwrap();
    assert_ne!(ciphertext, plaintext);
    assert_eq!(ciphertext.len(), plaintext.len());

    file_ops::decrypt_file(&module, &crypt_path, &decrypted_path, 7).unwrap();
    assert_eq!(fs::read(&decrypted_path).unwrap(), plaintext);
}

#[test]
fn test_decrypt_known_file() {
    let module = load();
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("hello.txt");

    file_ops::decrypt_file(
        &module,
        &common::testdata_path("hello.txt.caesar"),
        &output,
        3,
    )
    .unwrap();

    let expected = fs::read(common::testdata_path("hello.txt")).unwrap();
    assert_eq!(fs::read(&output).unwrap(), expected);
}

#[test]
fn test_missing_input_leaves_no_output() {
    let module = load();
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("nonexistent.txt");
    let output = temp_dir.path().join("output.txt");

    let err = file_ops::encrypt_file(&module, &input, &output, 1).expect_err("expected failure");
    assert_eq!(err.kind, Some(ErrorKind::Io));
    assert_eq!(err.category, ErrorCategory::User);
    assert!(!output.exists());
}

#[test]
fn test_nul_input_leaves_no_output() {
    let module = load();
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("binary.bin");
    let output = temp_dir.path().join("output.bin");
    fs::write(&input, [b'a', 0, b'b']).unwrap();

    let err = file_ops::encrypt_file(&module, &input, &output, 1).expect_err("expected failure");
    assert_eq!(err.kind, Some(ErrorKind::InvalidText));
    assert_eq!(err.message(), "encrypt failed");
    assert!(!output.exists());
}

#[test]
fn test_empty_file_roundtrip() {
    let module = load();
    let temp_dir = TempDir::new().unwrap();
    let plain_path = temp_dir.path().join("empty.txt");
    let crypt_path = temp_dir.path().join("empty.txt.caesar");
    fs::write(&plain_path, b"").unwrap();

    file_ops::encrypt_file(&module, &plain_path, &crypt_path, 4).unwrap();
    assert_eq!(fs::read(&crypt_path).unwrap(), b"");
}

#[test]
#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn test_library_without_cipher_symbols() {
    let err = CipherModule::load(std::path::Path::new("libm.so.6"))
        .expect_err("libm does not export the cipher functions");
    assert_eq!(err.kind, Some(ErrorKind::MissingSymbol));
    assert!(err.message().contains("'encrypt'"));
}

fn load_fixture() -> CipherModule {
    CipherModule::load(&common::fixture_module()).expect("failed to load fixture module")
}

#[test]
fn test_fixture_has_no_free_text() {
    assert!(!load_fixture().releases_results());
}

#[test]
fn test_in_place_result() {
    let module = load_fixture();
    assert_eq!(module.encrypt(b"Hello, World!", 1).unwrap(), b"Ifmmp, Xpsme!");
    // The caller's slice is copied before the call and stays untouched.
    let text = b"xyz".to_vec();
    assert_eq!(module.encrypt(&text, 3).unwrap(), b"abc");
    assert_eq!(text, b"xyz");
}

#[test]
fn test_null_result() {
    let module = load_fixture();
    let err = module.decrypt(b"Ifmmp", 0).expect_err("expected null result");
    assert_eq!(err.kind, Some(ErrorKind::NullResult));
    assert_eq!(err.category, ErrorCategory::Internal);
    assert!(err.message().contains("returned no result for decrypt"));
}

#[test]
fn test_result_without_free_text() {
    let module = load_fixture();
    assert_eq!(module.decrypt(b"Ifmmp", 1).unwrap(), b"Hello");
}

#[test]
fn test_null_result_leaves_no_output() {
    let module = load_fixture();
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.txt");
    let output = temp_dir.path().join("out.txt");
    fs::write(&input, b"Ifmmp").unwrap();

    let err = file_ops::decrypt_file(&module, &input, &output, 0).expect_err("expected failure");
    assert_eq!(err.kind, Some(ErrorKind::NullResult));
    assert_eq!(err.message(), "decrypt failed");
    assert!(!output.exists());
}
