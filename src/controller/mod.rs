//! # Controller Module
//!
//! Reconciliation logic and the HTTP server for metrics and probes.

pub mod reconciler;
pub mod server;
