//! CRD manifest generator.
//!
//! Prints the KMSSecret CustomResourceDefinition as YAML:
//! `cargo run --bin crdgen > config/crd/kmssecret.yaml`

use kms_secrets_controller::crd::KMSSecret;
use kube::CustomResourceExt;

fn main() {
    let crd = KMSSecret::crd();
    print!(
        "{}",
        serde_yaml::to_string(&crd).expect("Failed to serialize KMSSecret CRD to YAML")
    );
}
