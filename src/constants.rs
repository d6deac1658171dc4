//! Controller-wide constants.

/// Field manager / event reporter name used for all API writes.
pub const CONTROLLER_NAME: &str = "kms-secrets-controller";

/// Default port for the metrics and probe HTTP server.
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// How long to wait for the HTTP server to bind before giving up.
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 30;

/// Poll interval while waiting for the HTTP server to become ready.
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 100;

/// Requeue delay after a failed reconciliation pass.
pub const DEFAULT_ERROR_REQUEUE_SECS: u64 = 60;

/// Periodic resync interval for successfully reconciled resources.
/// Drift on the owned Secret is also caught immediately via the owns() watch;
/// this interval covers KMS-side changes such as rotated ciphertexts.
pub const DEFAULT_RESYNC_SECS: u64 = 300;
