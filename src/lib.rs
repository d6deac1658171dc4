//! # KMS Secrets Controller
//!
//! A Kubernetes controller that materializes plaintext `Secret` resources from
//! `KMSSecret` custom resources holding AWS KMS ciphertext.
//!
//! ## Overview
//!
//! This controller keeps a generated `Secret` convergent with its `KMSSecret`
//! owner by:
//!
//! 1. **Watching KMSSecret resources** - One reconciliation pass per change,
//!    plus re-reconciliation when the owned `Secret` is modified externally
//! 2. **AWS KMS decryption** - Each `spec.encryptedData` value is decrypted
//!    through the KMS `Decrypt` API in `spec.region`
//! 3. **Value normalization** - Plaintexts that are YAML string scalars are
//!    unwrapped, so raw values and CLI-framed values converge to the same bytes
//! 4. **Change detection** - A SHA-256 fingerprint of the decrypted mapping is
//!    compared against `status.secretsSum`; the `Secret` is only written when
//!    the fingerprint changes
//!
//! ## Features
//!
//! - **Idempotent reconciliation**: steady state performs zero writes
//! - **Crash-safe ordering**: the `Secret` write always lands before the
//!   fingerprint is recorded, so a half-completed pass is repaired by retry
//! - **Owner references**: generated `Secret`s are garbage-collected with
//!   their `KMSSecret`
//! - **Prometheus metrics**: reconciliation and decryption counters exposed
//!   over HTTP together with liveness/readiness probes
//!
//! ## Usage
//!
//! See the [README.md](../README.md) for deployment instructions and examples.

mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod provider;
pub mod runtime;
