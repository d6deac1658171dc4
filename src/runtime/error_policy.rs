//! # Error Policy
//!
//! Error handling for the controller watch loop. Every reconciliation
//! failure is retryable (the pass performs no partial writes that a retry
//! cannot repair), so the policy is a plain requeue with a fixed delay.

use crate::constants;
use crate::controller::reconciler::{Reconciler, ReconcilerError};
use crate::crd::KMSSecret;
use crate::observability;
use kube::ResourceExt;
use kube_runtime::controller::Action;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// Handle a failed reconciliation pass.
///
/// Called by the controller runtime whenever `reconcile()` returns an
/// error. The failed pass left either no writes or an idempotently
/// re-derivable half-write, so requeueing wholesale is always safe.
pub fn handle_reconciliation_error(
    object: Arc<KMSSecret>,
    err: &ReconcilerError,
    _ctx: Arc<Reconciler>,
) -> Action {
    let name = object.name_any();
    let namespace = object.namespace().unwrap_or_else(|| "default".to_string());

    error!(
        resource.name = name.as_str(),
        resource.namespace = namespace.as_str(),
        "reconciliation failed, requeueing in {}s: {}",
        constants::DEFAULT_ERROR_REQUEUE_SECS,
        err
    );
    observability::metrics::increment_reconciliation_errors();

    Action::requeue(Duration::from_secs(constants::DEFAULT_ERROR_REQUEUE_SECS))
}
