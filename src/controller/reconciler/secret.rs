//! # Secret Construction and Sync Planning
//!
//! Builds the generated `Secret` from a `KMSSecret` and its decrypted data,
//! and decides whether a pass needs to create, update, or leave the Secret
//! alone. The decision is a pure function of the observed state so it can
//! be tested without a cluster.

use crate::controller::reconciler::ReconcilerError;
use crate::crd::KMSSecret;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::core::ObjectMeta;
use kube::Resource;
use std::collections::BTreeMap;

/// What a reconciliation pass has to do to the generated Secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// No Secret exists yet for this KMSSecret
    Create,
    /// A Secret exists but the recorded fingerprint is stale
    Update,
    /// The recorded fingerprint matches the freshly decrypted data
    Noop,
}

/// Decide the sync action from the observed Secret presence, the owner's
/// recorded fingerprint, and the fingerprint of the freshly decrypted data.
///
/// The comparison is keyed on the re-decrypted content rather than the
/// observed Secret data, so external tampering with the Secret is corrected
/// on the next pass without the controller caching any plaintext.
#[must_use]
pub fn plan_sync(secret_exists: bool, recorded_sum: Option<&str>, new_sum: &str) -> SyncAction {
    if !secret_exists {
        return SyncAction::Create;
    }
    if recorded_sum == Some(new_sum) {
        SyncAction::Noop
    } else {
        SyncAction::Update
    }
}

/// Build the generated Secret for a KMSSecret.
///
/// The Secret carries a controller owner reference so the cluster
/// garbage-collects it when the KMSSecret is deleted, and the template
/// labels/annotations from the owner's spec.
pub fn build_secret(
    kind: &KMSSecret,
    decrypted_data: &BTreeMap<String, Vec<u8>>,
) -> Result<Secret, ReconcilerError> {
    let owner_ref = kind.controller_owner_ref(&()).ok_or_else(|| {
        ReconcilerError::InvalidResource("KMSSecret has no metadata.name or uid".to_string())
    })?;

    let data = decrypted_data
        .iter()
        .map(|(key, value)| (key.clone(), ByteString(value.clone())))
        .collect();

    Ok(Secret {
        metadata: ObjectMeta {
            name: kind.metadata.name.clone(),
            namespace: kind.metadata.namespace.clone(),
            owner_references: Some(vec![owner_ref]),
            labels: kind.spec.template.metadata.labels.clone(),
            annotations: kind.spec.template.metadata.annotations.clone(),
            ..ObjectMeta::default()
        },
        data: Some(data),
        type_: Some("Opaque".to_string()),
        ..Secret::default()
    })
}
