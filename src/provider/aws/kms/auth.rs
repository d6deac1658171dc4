//! # AWS KMS Authentication
//!
//! Handles AWS SDK configuration and authentication setup.

use anyhow::Result;
use aws_config::SdkConfig;
use tracing::info;

/// Create AWS SDK config using the default credential chain.
///
/// The default chain supports IRSA (IAM Roles for Service Accounts):
/// the pod's service account annotation `eks.amazonaws.com/role-arn`
/// is discovered automatically by the SDK.
pub async fn create_sdk_config(region: &str) -> Result<SdkConfig> {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    // Support mock server integration via environment variable
    // When PACT_MODE=true, route requests to the mock server instead of real AWS
    if std::env::var("PACT_MODE").is_ok() {
        if let Ok(endpoint) = std::env::var("AWS_KMS_ENDPOINT") {
            info!("Pact mode enabled: routing AWS KMS requests to {}", endpoint);
            builder = builder.endpoint_url(&endpoint);
        } else {
            info!("Pact mode enabled but AWS_KMS_ENDPOINT not set, using default AWS endpoint");
        }
    }

    let sdk_config = builder.load().await;

    Ok(sdk_config)
}
