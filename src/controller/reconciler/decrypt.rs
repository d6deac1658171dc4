//! # Decryption Step
//!
//! Turns `spec.encryptedData` into a plaintext mapping through a
//! [`Decryptor`]. All-or-nothing: a failure on any entry aborts the whole
//! step so a partially decrypted mapping can never reach the Secret.

use crate::controller::reconciler::normalize::normalize_value;
use crate::provider::Decryptor;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Failure of the decryption step. Always retryable: no writes have
/// happened when this surfaces, so the pass can be re-run wholesale.
#[derive(Debug, Error)]
pub enum DecryptError {
    /// The ciphertext for a key was not valid base64
    #[error("ciphertext for key {key:?} is not valid base64: {source}")]
    InvalidCiphertext {
        key: String,
        #[source]
        source: base64::DecodeError,
    },
    /// The external decrypt call failed for a key
    #[error("failed to decrypt key {key:?}: {source}")]
    DecryptFailed {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Decrypt every entry of `encrypted_data` and normalize each plaintext.
///
/// Entries are decrypted independently but the step fails as a whole on the
/// first error; no partial mapping is returned.
pub async fn decrypt_data(
    decryptor: &dyn Decryptor,
    encrypted_data: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, Vec<u8>>, DecryptError> {
    let mut decrypted_data = BTreeMap::new();

    for (key, ciphertext) in encrypted_data {
        let blob = BASE64
            .decode(ciphertext)
            .map_err(|source| DecryptError::InvalidCiphertext {
                key: key.clone(),
                source,
            })?;

        let plaintext =
            decryptor
                .decrypt(&blob)
                .await
                .map_err(|source| DecryptError::DecryptFailed {
                    key: key.clone(),
                    source,
                })?;

        debug!("decrypted key {}", key);
        decrypted_data.insert(key.clone(), normalize_value(&plaintext));
    }

    Ok(decrypted_data)
}
