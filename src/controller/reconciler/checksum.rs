//! # Content Fingerprinting
//!
//! Produces the `status.secretsSum` fingerprint over a decrypted data
//! mapping. The fingerprint changes if and only if the key set or any value
//! changes, which is what drives the create/update/no-op decision.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Compute the SHA-256 fingerprint of a plaintext mapping.
///
/// Canonical form: keys sorted ascending bytewise and joined with `,`, a
/// single `:` separator, then the values in the same key order joined with
/// `,`. The `BTreeMap` ordering makes the result independent of insertion
/// order.
#[must_use]
pub fn secrets_sum(data: &BTreeMap<String, Vec<u8>>) -> String {
    let mut canonical: Vec<u8> = Vec::new();

    for (i, key) in data.keys().enumerate() {
        if i > 0 {
            canonical.push(b',');
        }
        canonical.extend_from_slice(key.as_bytes());
    }
    canonical.push(b':');
    for (i, value) in data.values().enumerate() {
        if i > 0 {
            canonical.push(b',');
        }
        canonical.extend_from_slice(value);
    }

    format!("{:x}", Sha256::digest(&canonical))
}
