//! # AWS Providers
//!
//! AWS integrations used by the controller. Only KMS is needed: the
//! ciphertexts in a `KMSSecret` are raw KMS `Encrypt` output.

pub mod kms;
