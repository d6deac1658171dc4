use anyhow::Result;

use kms_secrets_controller::runtime::initialization::initialize;
use kms_secrets_controller::runtime::watch_loop::run_watch_loop;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the controller runtime
    let init_result = initialize().await?;

    // Run the watch loop until shutdown
    run_watch_loop(
        init_result.kms_secrets,
        init_result.reconciler,
        init_result.server_state,
    )
    .await?;

    Ok(())
}
