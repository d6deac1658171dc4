//! # Custom Resource Definitions
//!
//! CRD types for the KMS Secrets Controller.
//!
//! A `KMSSecret` declares a mapping of named AWS KMS ciphertexts and the
//! region to decrypt them in. The controller materializes the decrypted
//! values as a `Secret` with the same namespace/name, owned by the
//! `KMSSecret` so the cluster garbage-collects it on deletion.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// KMSSecret Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: secret.h3poteto.dev/v1beta1
/// kind: KMSSecret
/// metadata:
///   name: my-service-secrets
///   namespace: default
/// spec:
///   region: ap-northeast-1
///   encryptedData:
///     API_KEY: AQICAHj...  # base64 KMS ciphertext blob
///     PASSWORD: AQICAHg...
///   template:
///     metadata:
///       labels:
///         app: my-service
/// ```
#[derive(CustomResource, Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "KMSSecret",
    group = "secret.h3poteto.dev",
    version = "v1beta1",
    namespaced,
    status = "KMSSecretStatus",
    shortname = "kms",
    printcolumn = r#"{"name":"Region", "type":"string", "jsonPath":".spec.region"}, {"name":"SecretsSum", "type":"string", "jsonPath":".status.secretsSum"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct KMSSecretSpec {
    /// Metadata template copied onto the generated Secret at build time
    #[serde(default)]
    pub template: SecretTemplateSpec,
    /// Mapping of Secret key to KMS ciphertext blob.
    /// Values are standard base64, exactly as produced by
    /// `aws kms encrypt --query CiphertextBlob --output text`.
    /// May be empty, in which case an empty Secret is materialized.
    pub encrypted_data: BTreeMap<String, String>,
    /// AWS region to decrypt the ciphertexts in
    pub region: String,
}

/// Metadata template for the generated Secret
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretTemplateSpec {
    /// Labels and annotations applied to the generated Secret
    #[serde(default)]
    pub metadata: SecretTemplateMetadata,
}

/// Labels and annotations for the generated Secret
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretTemplateMetadata {
    /// Labels copied to the generated Secret
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
    /// Annotations copied to the generated Secret
    #[serde(default)]
    pub annotations: Option<BTreeMap<String, String>>,
}

/// Status of the KMSSecret resource
///
/// `secrets_sum` is the fingerprint of the plaintext mapping that was last
/// successfully written to the generated Secret. It is only ever updated
/// immediately after a successful Secret write, which is what makes the
/// two-step write crash-safe: a pass that dies between the Secret write and
/// the status write is repaired by the next pass re-deriving the same sum.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KMSSecretStatus {
    /// SHA-256 fingerprint of the decrypted data last written to the Secret
    #[serde(default)]
    pub secrets_sum: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kms_secret_spec_deserializes_camel_case() {
        let manifest = serde_json::json!({
            "region": "ap-northeast-1",
            "encryptedData": {
                "API_KEY": "QVFJQ0FIag=="
            },
            "template": {
                "metadata": {
                    "labels": { "app": "my-service" }
                }
            }
        });

        let spec: KMSSecretSpec = serde_json::from_value(manifest).unwrap();
        assert_eq!(spec.region, "ap-northeast-1");
        assert_eq!(
            spec.encrypted_data.get("API_KEY").map(String::as_str),
            Some("QVFJQ0FIag==")
        );
        let labels = spec.template.metadata.labels.unwrap();
        assert_eq!(labels.get("app").map(String::as_str), Some("my-service"));
    }

    #[test]
    fn test_template_defaults_to_empty() {
        let manifest = serde_json::json!({
            "region": "us-east-1",
            "encryptedData": {}
        });

        let spec: KMSSecretSpec = serde_json::from_value(manifest).unwrap();
        assert!(spec.encrypted_data.is_empty());
        assert!(spec.template.metadata.labels.is_none());
        assert!(spec.template.metadata.annotations.is_none());
    }

    #[test]
    fn test_status_serializes_secrets_sum() {
        let status = KMSSecretStatus {
            secrets_sum: Some("abc123".to_string()),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["secretsSum"], "abc123");
    }
}
