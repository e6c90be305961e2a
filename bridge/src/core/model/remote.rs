//! KittenTTS backend served by an HTTP inference server.
//!
//! # Protocol
//!
//! - Load: `POST {base}/v1/models/load` with `{"model": "<id>"}`. Any 2xx
//!   response means the model is resident and ready.
//! - Generate: `POST {base}/v1/generate` with
//!   `{"model": "<id>", "text": "...", "voice": "..."}`. The response is
//!   `{"samples": [f32, ...]}` holding mono 24 kHz audio.
//!
//! When an API key is configured it is sent as `Authorization: Bearer <key>`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::backend::{BackendError, BackendResult, ModelLoader, SpeechModel};
use super::config::ModelConfig;

/// Path of the model load endpoint, relative to the backend base URL
pub const LOAD_PATH: &str = "v1/models/load";

/// Path of the generation endpoint, relative to the backend base URL
pub const GENERATE_PATH: &str = "v1/generate";

#[derive(Debug, Serialize)]
struct LoadRequest<'a> {
    model: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    text: &'a str,
    voice: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    samples: Vec<f32>,
}

/// Shared HTTP plumbing for the loader and the loaded model
#[derive(Clone)]
struct RemoteEndpoint {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RemoteEndpoint {
    fn new(config: &ModelConfig) -> BackendResult<Self> {
        let raw = config
            .backend_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                BackendError::InvalidConfiguration("backend URL is not configured".to_string())
            })?;

        let base_url = parse_base_url(raw)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                BackendError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> BackendResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| {
                BackendError::InvalidConfiguration(format!("invalid endpoint {path}: {e}"))
            })
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.client.post(url);
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

impl Drop for RemoteEndpoint {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.api_key {
            key.zeroize();
        }
    }
}

/// Parse a backend base URL, normalizing it to end with `/` so relative
/// endpoint paths are appended rather than replacing the last segment.
pub fn parse_base_url(raw: &str) -> BackendResult<Url> {
    let mut url = Url::parse(raw).map_err(|e| {
        BackendError::InvalidConfiguration(format!("invalid backend URL '{raw}': {e}"))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(BackendError::InvalidConfiguration(format!(
            "backend URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Read the body of a failed response for the error message
async fn error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => format!("{status}: {}", body.trim()),
        _ => status.to_string(),
    }
}

/// Loads KittenTTS models on a remote inference server
pub struct RemoteKittenLoader {
    endpoint: RemoteEndpoint,
}

impl RemoteKittenLoader {
    pub fn new(config: &ModelConfig) -> BackendResult<Self> {
        Ok(Self {
            endpoint: RemoteEndpoint::new(config)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.endpoint.base_url
    }
}

#[async_trait]
impl ModelLoader for RemoteKittenLoader {
    fn name(&self) -> &str {
        "remote-kitten"
    }

    async fn load(&self, model_id: &str) -> BackendResult<Arc<dyn SpeechModel>> {
        let url = self.endpoint.endpoint(LOAD_PATH)?;
        debug!("Requesting model load at {}", url);

        let response = self
            .endpoint
            .post(url)
            .json(&LoadRequest { model: model_id })
            .send()
            .await
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::LoadFailed(error_detail(response).await));
        }

        Ok(Arc::new(RemoteKittenModel {
            endpoint: self.endpoint.clone(),
            model_id: model_id.to_string(),
        }))
    }
}

/// A model resident on the remote inference server
pub struct RemoteKittenModel {
    endpoint: RemoteEndpoint,
    model_id: String,
}

#[async_trait]
impl SpeechModel for RemoteKittenModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, text: &str, voice: &str) -> BackendResult<Vec<f32>> {
        let url = self.endpoint.endpoint(GENERATE_PATH)?;

        let response = self
            .endpoint
            .post(url)
            .json(&GenerateRequest {
                model: &self.model_id,
                text,
                voice,
            })
            .send()
            .await
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::GenerationFailed(error_detail(response).await));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        debug!(
            "Remote model '{}' returned {} samples",
            self.model_id,
            body.samples.len()
        );

        Ok(body.samples)
    }
}
