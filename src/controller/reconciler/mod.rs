//! # Reconciliation Logic
//!
//! One reconciliation pass per invocation: fetch the KMSSecret, decrypt its
//! data through KMS, fingerprint the result, and create or update the
//! generated Secret only when the fingerprint differs from the recorded
//! `status.secretsSum`.
//!
//! Within a pass the Secret write always happens before the status write.
//! A crash in between leaves a stale recorded sum; the next pass re-derives
//! the same fingerprint from the ciphertext and re-issues an idempotent
//! write, so no transaction is needed.

pub mod checksum;
pub mod decrypt;
pub mod normalize;
pub mod secret;
pub mod status;

use crate::constants;
use crate::crd::KMSSecret;
use crate::observability;
use crate::provider::KmsDecryptor;
use k8s_openapi::api::core::v1::Secret;
use kube::api::PostParams;
use kube::{Api, Client, Resource, ResourceExt};
use kube_runtime::controller::Action;
use kube_runtime::events::{Event, EventType, Recorder, Reporter};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn, Instrument};

pub use decrypt::{decrypt_data, DecryptError};
pub use secret::{build_secret, plan_sync, SyncAction};

/// Reconciliation failure. Every variant is retryable: no pass leaves
/// partial state that a blind retry cannot repair, so the error policy
/// simply requeues.
#[derive(Debug, Error)]
pub enum ReconcilerError {
    /// A Kubernetes API call (fetch, create, update, status patch) failed
    #[error("Kubernetes API request failed: {0}")]
    KubeApi(#[from] kube::Error),
    /// The decryption step failed; no writes were performed
    #[error("failed to decrypt encryptedData: {0}")]
    Decryption(#[from] DecryptError),
    /// The KMS client could not be constructed for the requested region
    #[error("failed to initialize KMS client for region {region}: {source}")]
    Provider {
        region: String,
        #[source]
        source: anyhow::Error,
    },
    /// The KMSSecret is missing identity fields required to own a Secret
    #[error("invalid KMSSecret resource: {0}")]
    InvalidResource(String),
}

/// Shared context for reconciliation passes.
///
/// Holds no mutable state: everything a pass needs beyond this context
/// lives on the two managed objects, which are the system of record.
pub struct Reconciler {
    /// Kubernetes client
    pub client: Client,
    recorder: Recorder,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler").finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Create the reconciler context with an event recorder reporting as
    /// this controller.
    #[must_use]
    pub fn new(client: Client) -> Self {
        let reporter = Reporter {
            controller: constants::CONTROLLER_NAME.to_string(),
            instance: std::env::var("POD_NAME").ok(),
        };
        let recorder = Recorder::new(client.clone(), reporter);
        Self { client, recorder }
    }

    /// Publish a Normal event for the KMSSecret. Best-effort: a failed
    /// publish is logged and never fails the pass.
    async fn publish_event(&self, kind: &KMSSecret, reason: &str, note: String) {
        let event = Event {
            type_: EventType::Normal,
            reason: reason.to_string(),
            note: Some(note),
            action: reason.to_string(),
            secondary: None,
        };
        if let Err(e) = self.recorder.publish(&event, &kind.object_ref(&())).await {
            warn!("failed to publish {} event: {}", reason, e);
        }
    }
}

/// Perform one reconciliation pass for a KMSSecret.
///
/// Errors are handled by `error_policy()` in the runtime layer; the pass
/// itself performs no retries and no partial rollback.
pub async fn reconcile(
    object: Arc<KMSSecret>,
    ctx: Arc<Reconciler>,
) -> Result<Action, ReconcilerError> {
    let name = object.name_any();
    let namespace = object.namespace().unwrap_or_else(|| "default".to_string());

    let span = tracing::span!(
        tracing::Level::INFO,
        "reconcile",
        resource.name = name.as_str(),
        resource.namespace = namespace.as_str(),
        resource.kind = "KMSSecret"
    );
    reconcile_inner(object, ctx).instrument(span).await
}

async fn reconcile_inner(
    object: Arc<KMSSecret>,
    ctx: Arc<Reconciler>,
) -> Result<Action, ReconcilerError> {
    let start = Instant::now();
    let name = object.name_any();
    let namespace = object.namespace().unwrap_or_else(|| "default".to_string());

    observability::metrics::increment_reconciliations();
    info!("fetching KMSSecret resource");

    // Re-fetch by identity rather than trusting the watch snapshot: a pass
    // must be a function of current cluster state. Not-found means the
    // resource was deleted; the owned Secret cascades via its owner
    // reference, so there is nothing left to do.
    let kms_secrets: Api<KMSSecret> = Api::namespaced(ctx.client.clone(), &namespace);
    let Some(kind) = kms_secrets.get_opt(&name).await? else {
        info!("KMSSecret {}/{} no longer exists, nothing to do", namespace, name);
        return Ok(Action::await_change());
    };

    let decryptor = KmsDecryptor::new(&kind.spec.region).await.map_err(|source| {
        ReconcilerError::Provider {
            region: kind.spec.region.clone(),
            source,
        }
    })?;

    observability::metrics::increment_decrypt_operations();
    let decrypted_data = match decrypt_data(&decryptor, &kind.spec.encrypted_data).await {
        Ok(data) => data,
        Err(e) => {
            observability::metrics::increment_decrypt_errors();
            return Err(e.into());
        }
    };

    let shasum = checksum::secrets_sum(&decrypted_data);

    info!("checking for an existing Secret for this resource");
    let secrets: Api<Secret> = Api::namespaced(ctx.client.clone(), &namespace);
    let existing = secrets.get_opt(&name).await?;

    let recorded_sum = kind.status.as_ref().and_then(|s| s.secrets_sum.as_deref());

    match plan_sync(existing.is_some(), recorded_sum, &shasum) {
        SyncAction::Create => {
            info!("no existing Secret for KMSSecret, creating one");
            let secret = build_secret(&kind, &decrypted_data)?;
            secrets.create(&PostParams::default(), &secret).await?;
            observability::metrics::increment_secrets_created();
            ctx.publish_event(
                &kind,
                "Created",
                format!("Created Secret {namespace}/{name}"),
            )
            .await;

            // Secret write first, fingerprint second. Reversing this would
            // record "converged" for data that was never written.
            status::record_secrets_sum(&ctx.client, &kind, &shasum).await?;
            info!("created Secret {}/{}", namespace, name);
        }
        SyncAction::Update => {
            info!(
                old_secrets_sum = recorded_sum.unwrap_or(""),
                "encryptedData changed, updating Secret resource"
            );
            let mut secret = build_secret(&kind, &decrypted_data)?;
            secret.metadata.resource_version =
                existing.and_then(|s| s.metadata.resource_version);
            secrets.replace(&name, &PostParams::default(), &secret).await?;
            observability::metrics::increment_secrets_updated();
            ctx.publish_event(
                &kind,
                "Updated",
                format!("Updated Secret {namespace}/{name}"),
            )
            .await;

            status::record_secrets_sum(&ctx.client, &kind, &shasum).await?;
            info!("updated Secret {}/{}", namespace, name);
        }
        SyncAction::Noop => {
            debug!("secretsSum unchanged, no writes needed");
        }
    }

    observability::metrics::observe_reconcile_duration(start.elapsed().as_secs_f64());
    info!("resource status synced");

    Ok(Action::requeue(Duration::from_secs(
        constants::DEFAULT_RESYNC_SECS,
    )))
}
