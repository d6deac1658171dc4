//! # Status Management
//!
//! Records the content fingerprint on the KMSSecret after a successful
//! Secret write. This is the only status field the controller owns.

use crate::constants;
use crate::crd::KMSSecret;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client};
use tracing::debug;

/// Persist `status.secretsSum` on the KMSSecret.
///
/// Must only be called after the generated Secret has been written: the
/// recorded sum asserts that the Secret holds exactly this content.
pub async fn record_secrets_sum(
    client: &Client,
    kind: &KMSSecret,
    secrets_sum: &str,
) -> Result<(), kube::Error> {
    let api: Api<KMSSecret> = Api::namespaced(
        client.clone(),
        kind.metadata.namespace.as_deref().unwrap_or("default"),
    );

    let patch = serde_json::json!({
        "status": {
            "secretsSum": secrets_sum,
        }
    });

    api.patch_status(
        kind.metadata.name.as_deref().unwrap_or("unknown"),
        &PatchParams::apply(constants::CONTROLLER_NAME),
        &Patch::Merge(patch),
    )
    .await?;

    debug!("recorded secretsSum {}", secrets_sum);
    Ok(())
}
