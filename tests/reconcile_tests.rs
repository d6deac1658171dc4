//! # Reconciliation Scenario Tests
//!
//! Exercises the decryption step and sync planning against a mock
//! decryption service: the happy path, the all-or-nothing failure
//! guarantee, and the create/update/steady-state decisions.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use kms_secrets_controller::controller::reconciler::checksum::secrets_sum;
use kms_secrets_controller::controller::reconciler::{
    decrypt_data, plan_sync, DecryptError, SyncAction,
};
use kms_secrets_controller::provider::Decryptor;
use std::collections::BTreeMap;

/// Mock decryption service mapping known ciphertexts to plaintexts.
/// Unknown ciphertexts fail, standing in for a KMS error.
struct MapDecryptor {
    plaintexts: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MapDecryptor {
    fn new(entries: &[(&[u8], &[u8])]) -> Self {
        Self {
            plaintexts: entries
                .iter()
                .map(|(c, p)| (c.to_vec(), p.to_vec()))
                .collect(),
        }
    }
}

#[async_trait]
impl Decryptor for MapDecryptor {
    async fn decrypt(&self, ciphertext: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.plaintexts
            .get(ciphertext)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("InvalidCiphertextException"))
    }
}

fn encoded(raw: &[u8]) -> String {
    BASE64.encode(raw)
}

#[tokio::test]
async fn test_decrypt_data_produces_plaintext_mapping() {
    let decryptor = MapDecryptor::new(&[
        (b"cipher-api-key", b"hoge"),
        (b"cipher-password", b"fuga"),
    ]);
    let encrypted_data = BTreeMap::from([
        ("API_KEY".to_string(), encoded(b"cipher-api-key")),
        ("PASSWORD".to_string(), encoded(b"cipher-password")),
    ]);

    let decrypted = decrypt_data(&decryptor, &encrypted_data).await.unwrap();

    assert_eq!(decrypted.len(), 2);
    assert_eq!(decrypted["API_KEY"], b"hoge");
    assert_eq!(decrypted["PASSWORD"], b"fuga");

    // The digest of "API_KEY,PASSWORD:hoge,fuga"
    assert_eq!(
        secrets_sum(&decrypted),
        "b6b66b55b6b03c6ee6abc0027095d38a35937eb3e6ff2dc9f2aafa846c704e3b"
    );
}

#[tokio::test]
async fn test_decrypt_data_normalizes_wrapped_scalars() {
    // One value is a YAML-quoted scalar, the other raw bytes; both styles
    // must converge to the same plaintext form
    let decryptor = MapDecryptor::new(&[
        (b"cipher-wrapped", b"\"apikey\""),
        (b"cipher-raw", b"apikey"),
    ]);
    let encrypted_data = BTreeMap::from([
        ("WRAPPED".to_string(), encoded(b"cipher-wrapped")),
        ("RAW".to_string(), encoded(b"cipher-raw")),
    ]);

    let decrypted = decrypt_data(&decryptor, &encrypted_data).await.unwrap();

    assert_eq!(decrypted["WRAPPED"], b"apikey");
    assert_eq!(decrypted["RAW"], b"apikey");
}

#[tokio::test]
async fn test_decrypt_data_is_all_or_nothing() {
    // PASSWORD's ciphertext is unknown to the service and fails to decrypt
    let decryptor = MapDecryptor::new(&[(b"cipher-api-key", b"hoge")]);
    let encrypted_data = BTreeMap::from([
        ("API_KEY".to_string(), encoded(b"cipher-api-key")),
        ("PASSWORD".to_string(), encoded(b"cipher-bad")),
    ]);

    let result = decrypt_data(&decryptor, &encrypted_data).await;

    match result {
        Err(DecryptError::DecryptFailed { key, .. }) => assert_eq!(key, "PASSWORD"),
        other => panic!("expected DecryptFailed for PASSWORD, got {other:?}"),
    }
}

#[tokio::test]
async fn test_decrypt_data_rejects_invalid_base64() {
    let decryptor = MapDecryptor::new(&[]);
    let encrypted_data = BTreeMap::from([("API_KEY".to_string(), "not base64!!".to_string())]);

    let result = decrypt_data(&decryptor, &encrypted_data).await;

    match result {
        Err(DecryptError::InvalidCiphertext { key, .. }) => assert_eq!(key, "API_KEY"),
        other => panic!("expected InvalidCiphertext for API_KEY, got {other:?}"),
    }
}

#[tokio::test]
async fn test_decrypt_data_empty_mapping() {
    let decryptor = MapDecryptor::new(&[]);
    let decrypted = decrypt_data(&decryptor, &BTreeMap::new()).await.unwrap();
    assert!(decrypted.is_empty());
}

#[tokio::test]
async fn test_create_path_then_steady_state() {
    let decryptor = MapDecryptor::new(&[(b"cipher", b"hoge")]);
    let encrypted_data = BTreeMap::from([("API_KEY".to_string(), encoded(b"cipher"))]);

    let decrypted = decrypt_data(&decryptor, &encrypted_data).await.unwrap();
    let sum = secrets_sum(&decrypted);

    // First pass: no Secret exists yet
    assert_eq!(plan_sync(false, None, &sum), SyncAction::Create);

    // Re-run with unchanged ciphertext after the create recorded the sum:
    // zero writes
    let decrypted_again = decrypt_data(&decryptor, &encrypted_data).await.unwrap();
    let sum_again = secrets_sum(&decrypted_again);
    assert_eq!(plan_sync(true, Some(&sum), &sum_again), SyncAction::Noop);
}

#[tokio::test]
async fn test_update_path_on_changed_ciphertext() {
    let decryptor = MapDecryptor::new(&[(b"cipher-v1", b"hoge"), (b"cipher-v2", b"piyo")]);

    let old_data = BTreeMap::from([("API_KEY".to_string(), encoded(b"cipher-v1"))]);
    let old_sum = secrets_sum(&decrypt_data(&decryptor, &old_data).await.unwrap());

    // The operator re-encrypts a new value; the recorded sum is now stale
    let new_data = BTreeMap::from([("API_KEY".to_string(), encoded(b"cipher-v2"))]);
    let new_sum = secrets_sum(&decrypt_data(&decryptor, &new_data).await.unwrap());

    assert_ne!(old_sum, new_sum);
    assert_eq!(plan_sync(true, Some(&old_sum), &new_sum), SyncAction::Update);

    // A subsequent pass with the same ciphertext is a no-op
    let repeat_sum = secrets_sum(&decrypt_data(&decryptor, &new_data).await.unwrap());
    assert_eq!(plan_sync(true, Some(&new_sum), &repeat_sum), SyncAction::Noop);
}
