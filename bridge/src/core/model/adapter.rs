use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::backend::{ModelLoader, SpeechModel};
use super::config::{KITTEN_SAMPLE_RATE, ModelConfig};
use super::remote::RemoteKittenLoader;
use crate::core::audio::PcmBuffer;
use crate::errors::synthesis_error::{SynthesisError, SynthesisResult};

/// Outcome of probing for a real synthesis backend.
///
/// Detection runs once when the adapter is built; an unavailable backend is
/// reported without touching the network.
#[derive(Clone)]
pub enum BackendCapability {
    /// A backend is installed and can be loaded through this loader
    Available(Arc<dyn ModelLoader>),
    /// No backend is installed; carries the reason for logs
    Unavailable(String),
}

impl BackendCapability {
    /// Inspect the configuration for an installed backend
    pub fn detect(config: &ModelConfig) -> Self {
        match config.backend_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => match RemoteKittenLoader::new(config) {
                Ok(loader) => BackendCapability::Available(Arc::new(loader)),
                Err(e) => BackendCapability::Unavailable(e.to_string()),
            },
            _ => BackendCapability::Unavailable("KITTEN_BACKEND_URL is not configured".to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, BackendCapability::Available(_))
    }
}

impl std::fmt::Debug for BackendCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendCapability::Available(loader) => {
                f.debug_tuple("Available").field(&loader.name()).finish()
            }
            BackendCapability::Unavailable(reason) => {
                f.debug_tuple("Unavailable").field(reason).finish()
            }
        }
    }
}

/// Owner of the process-wide speech model handle.
///
/// The handle is built lazily on first use and shared by every later request.
/// Concurrent first callers wait on the same initialization, so at most one
/// model instance is ever constructed. A failed load leaves the slot empty and
/// the next call retries.
pub struct ModelAdapter {
    config: ModelConfig,
    capability: BackendCapability,
    handle: OnceCell<Arc<dyn SpeechModel>>,
}

impl ModelAdapter {
    /// Build an adapter, detecting the backend from `config`
    pub fn new(config: ModelConfig) -> Self {
        let capability = BackendCapability::detect(&config);
        match &capability {
            BackendCapability::Available(loader) => info!(
                "Speech backend available via {} (model: {})",
                loader.name(),
                config.model_id
            ),
            BackendCapability::Unavailable(reason) => {
                info!("Speech backend unavailable: {}", reason)
            }
        }
        Self::with_capability(config, capability)
    }

    /// Build an adapter around a specific loader
    pub fn with_loader(config: ModelConfig, loader: Arc<dyn ModelLoader>) -> Self {
        Self::with_capability(config, BackendCapability::Available(loader))
    }

    pub fn with_capability(config: ModelConfig, capability: BackendCapability) -> Self {
        Self {
            config,
            capability,
            handle: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn capability(&self) -> &BackendCapability {
        &self.capability
    }

    pub fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    /// Whether the model handle has been constructed
    pub fn is_loaded(&self) -> bool {
        self.handle.initialized()
    }

    /// Return the shared model handle, loading it on first use.
    ///
    /// # Errors
    /// - `BackendUnavailable` when no backend is installed
    /// - `SynthesisFailure` when the backend fails to load the model
    pub async fn ensure_loaded(&self) -> SynthesisResult<Arc<dyn SpeechModel>> {
        let loader = match &self.capability {
            BackendCapability::Available(loader) => loader,
            BackendCapability::Unavailable(reason) => {
                debug!("Refusing model load: {}", reason);
                return Err(SynthesisError::backend_unavailable());
            }
        };

        let model = self
            .handle
            .get_or_try_init(|| async {
                info!(
                    "Loading speech model '{}' via {}",
                    self.config.model_id,
                    loader.name()
                );
                loader.load(&self.config.model_id).await.map_err(|e| {
                    warn!("Failed to load speech model '{}': {}", self.config.model_id, e);
                    SynthesisError::from(e)
                })
            })
            .await?;

        Ok(Arc::clone(model))
    }

    /// Synthesize `text` with the real model and convert it to 16-bit PCM.
    ///
    /// Output is always mono at the model's native 24 kHz.
    pub async fn generate(&self, text: &str, voice: Option<&str>) -> SynthesisResult<PcmBuffer> {
        let model = self.ensure_loaded().await?;
        let voice = self.config.resolve_voice(voice);

        debug!(
            "Generating speech with model '{}' voice '{}'",
            model.model_id(),
            voice
        );
        let samples = model.generate(text, voice).await?;

        Ok(PcmBuffer::from_f32(&samples, KITTEN_SAMPLE_RATE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::backend::{BackendError, BackendResult};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedModel {
        samples: Vec<f32>,
        last_voice: Mutex<Option<String>>,
    }

    impl FixedModel {
        fn last_voice(&self) -> Option<String> {
            self.last_voice.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpeechModel for FixedModel {
        fn model_id(&self) -> &str {
            "test-model"
        }

        async fn generate(&self, _text: &str, voice: &str) -> BackendResult<Vec<f32>> {
            *self.last_voice.lock().unwrap() = Some(voice.to_string());
            Ok(self.samples.clone())
        }
    }

    /// Loader that counts constructions and sleeps to widen the race window
    struct CountingLoader {
        loads: AtomicUsize,
        fail_first: bool,
        model: Arc<FixedModel>,
    }

    impl CountingLoader {
        fn new(samples: Vec<f32>) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail_first: false,
                model: Arc::new(FixedModel {
                    samples,
                    last_voice: Mutex::new(None),
                }),
            }
        }
    }

    #[async_trait]
    impl ModelLoader for CountingLoader {
        fn name(&self) -> &str {
            "counting"
        }

        async fn load(&self, _model_id: &str) -> BackendResult<Arc<dyn SpeechModel>> {
            let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail_first && attempt == 0 {
                return Err(BackendError::LoadFailed("weights missing".into()));
            }
            Ok(self.model.clone() as Arc<dyn SpeechModel>)
        }
    }

    #[tokio::test]
    async fn test_unavailable_without_backend_url() {
        let adapter = ModelAdapter::new(ModelConfig::default());
        assert!(!adapter.is_available());

        let err = adapter.ensure_loaded().await.err().unwrap();
        assert_eq!(err, SynthesisError::backend_unavailable());
        assert!(!adapter.is_loaded());
    }

    #[tokio::test]
    async fn test_detect_available_with_backend_url() {
        let config = ModelConfig::default().with_backend_url("http://127.0.0.1:9");
        assert!(BackendCapability::detect(&config).is_available());
    }

    #[tokio::test]
    async fn test_concurrent_loads_construct_once() {
        let loader = Arc::new(CountingLoader::new(vec![0.0]));
        let adapter = Arc::new(ModelAdapter::with_loader(
            ModelConfig::default(),
            loader.clone(),
        ));

        let a = tokio::spawn({
            let adapter = adapter.clone();
            async move { adapter.ensure_loaded().await }
        });
        let b = tokio::spawn({
            let adapter = adapter.clone();
            async move { adapter.ensure_loaded().await }
        });

        let first = a.await.unwrap().unwrap();
        let second = b.await.unwrap().unwrap();

        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(adapter.is_loaded());
    }

    #[tokio::test]
    async fn test_repeated_loads_reuse_handle() {
        let loader = Arc::new(CountingLoader::new(vec![0.0]));
        let adapter = ModelAdapter::with_loader(ModelConfig::default(), loader.clone());

        for _ in 0..5 {
            adapter.ensure_loaded().await.unwrap();
        }
        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let mut loader = CountingLoader::new(vec![0.0]);
        loader.fail_first = true;
        let loader = Arc::new(loader);
        let adapter = ModelAdapter::with_loader(ModelConfig::default(), loader.clone());

        let err = adapter.ensure_loaded().await.err().unwrap();
        assert_eq!(
            err,
            SynthesisError::SynthesisFailure("Model load failed: weights missing".into())
        );
        assert!(!adapter.is_loaded());

        adapter.ensure_loaded().await.unwrap();
        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_generate_clamps_and_converts() {
        let loader = Arc::new(CountingLoader::new(vec![0.0, 0.5, -0.5, 1.7, -3.0]));
        let adapter = ModelAdapter::with_loader(ModelConfig::default(), loader.clone());

        let pcm = adapter.generate("Hola", Some("expr-voice-3-m")).await.unwrap();
        assert_eq!(pcm.sample_rate(), 24000);
        assert_eq!(pcm.samples(), &[0, 16384, -16384, 32767, -32767]);
        assert_eq!(loader.model.last_voice().as_deref(), Some("expr-voice-3-m"));
    }

    #[tokio::test]
    async fn test_generate_uses_default_voice() {
        let loader = Arc::new(CountingLoader::new(vec![0.1]));
        let adapter = ModelAdapter::with_loader(ModelConfig::default(), loader.clone());

        adapter.generate("Hola", Some("default")).await.unwrap();
        assert_eq!(loader.model.last_voice().as_deref(), Some("expr-voice-2-f"));
    }
}
