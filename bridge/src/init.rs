//! Backend verification for the `kitten-bridge init` CLI command.
//!
//! The command loads the configured KittenTTS model once against the
//! inference server, so deployment problems (no backend URL, unreachable
//! server, unknown model id) surface before the bridge starts taking traffic.
//!
//! Typical usage from the CLI:
//!
//! ```text
//! $ KITTEN_BACKEND_URL=http://127.0.0.1:8081 kitten-bridge init
//! ```

use anyhow::Result;
use anyhow::anyhow;

use crate::config::ServerConfig;
use crate::core::model::ModelAdapter;

/// Load the configured model once and report the outcome.
pub async fn run(config: &ServerConfig) -> Result<()> {
    let adapter = ModelAdapter::new(config.model_config());

    if !adapter.is_available() {
        return Err(anyhow!(
            "KITTEN_BACKEND_URL must be set to run `kitten-bridge init`"
        ));
    }

    tracing::info!("Loading model '{}'", config.kitten_model);

    let model = adapter
        .ensure_loaded()
        .await
        .map_err(|e| anyhow!("Model load failed: {e}"))?;

    tracing::info!("Model '{}' loaded successfully", model.model_id());

    Ok(())
}
