//! # Watch Loop
//!
//! Drives reconciliation from the cluster watch. The controller watches
//! KMSSecret resources and owns the generated Secrets, so an external
//! modification of a Secret immediately triggers a repair pass on its
//! owner.

use crate::controller::reconciler::{reconcile, Reconciler};
use crate::controller::server::ServerState;
use crate::crd::KMSSecret;
use crate::runtime::error_policy::handle_reconciliation_error;
use anyhow::Result;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::Api;
use kube_runtime::controller::Controller;
use kube_runtime::watcher;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Run the controller until shutdown is signalled.
///
/// The runtime serializes passes per object identity; passes for different
/// KMSSecrets may run concurrently.
pub async fn run_watch_loop(
    kms_secrets: Api<KMSSecret>,
    reconciler: Arc<Reconciler>,
    server_state: Arc<ServerState>,
) -> Result<()> {
    let secrets: Api<Secret> = Api::all(reconciler.client.clone());

    info!("starting KMSSecret watch loop");
    Controller::new(kms_secrets, watcher::Config::default())
        .owns(secrets, watcher::Config::default())
        .shutdown_on_signal()
        .run(reconcile, handle_reconciliation_error, reconciler)
        .for_each(|result| async {
            match result {
                Ok((object, _action)) => debug!("reconciled {}", object),
                Err(e) => warn!("controller stream error: {}", e),
            }
        })
        .await;

    server_state.is_ready.store(false, Ordering::Relaxed);
    info!("watch loop ended, shutting down");
    Ok(())
}
