//! # AWS KMS Client
//!
//! Client for the AWS KMS `Decrypt` API.
//!
//! This module provides functionality to:
//! - Decrypt ciphertext blobs against a configured region
//! - Support IRSA (IAM Roles for Service Accounts) authentication

mod auth;

use aws_sdk_kms::primitives::Blob;
use aws_sdk_kms::Client as KmsClient;

use crate::provider::Decryptor;
use anyhow::{Context, Result};
use async_trait::async_trait;

use self::auth::create_sdk_config;

/// AWS KMS decryption provider
pub struct KmsDecryptor {
    client: KmsClient,
    region: String,
}

impl std::fmt::Debug for KmsDecryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KmsDecryptor")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl KmsDecryptor {
    /// Create a new KMS client for the given region.
    /// Uses the default AWS credential chain, which supports IRSA.
    ///
    /// # Errors
    ///
    /// Returns an error if the AWS SDK configuration cannot be assembled
    /// from the environment.
    pub async fn new(region: &str) -> Result<Self> {
        let sdk_config = create_sdk_config(region).await?;
        let client = KmsClient::new(&sdk_config);

        Ok(Self {
            client,
            region: region.to_string(),
        })
    }
}

#[async_trait]
impl Decryptor for KmsDecryptor {
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let output = self
            .client
            .decrypt()
            .ciphertext_blob(Blob::new(ciphertext))
            .send()
            .await
            .with_context(|| format!("KMS Decrypt call failed in region {}", self.region))?;

        let plaintext = output
            .plaintext
            .context("KMS Decrypt returned no plaintext")?;

        Ok(plaintext.into_inner())
    }
}
