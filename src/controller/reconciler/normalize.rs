//! # Value Normalization
//!
//! Decrypted payloads arrive in two shapes: raw bytes, or a YAML string
//! scalar produced by CLI encryption tooling that frames its output as a
//! one-document YAML file. Both must converge to the same plaintext bytes,
//! otherwise the content fingerprint would flap between the two encodings.

/// Unwrap a YAML string scalar to its decoded content.
///
/// Anything that does not parse as a YAML document whose root is a plain
/// string scalar (maps, sequences, numbers, invalid UTF-8, malformed YAML)
/// is passed through unchanged. Parse failure is deliberately silent: it is
/// the normal case for values that are not document-wrapped.
#[must_use]
pub fn normalize_value(raw: &[u8]) -> Vec<u8> {
    match serde_yaml::from_slice::<String>(raw) {
        Ok(scalar) => scalar.into_bytes(),
        Err(_) => raw.to_vec(),
    }
}
