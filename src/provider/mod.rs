//! # Decryption Providers
//!
//! External key-management integrations. The controller only ever talks to a
//! provider through the [`Decryptor`] trait, which keeps the reconciler
//! testable without AWS credentials.

pub mod aws;

use anyhow::Result;
use async_trait::async_trait;

pub use aws::kms::KmsDecryptor;

/// A remote decryption service scoped to a single region.
///
/// Implementations perform no retry or caching; a failed call fails the
/// whole reconciliation pass and the pass is retried wholesale.
#[async_trait]
pub trait Decryptor: Send + Sync {
    /// Decrypt one ciphertext blob, returning the plaintext bytes.
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}
