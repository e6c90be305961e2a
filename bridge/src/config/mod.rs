//! Configuration module for the Kitten bridge
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use kitten_bridge::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

pub use utils::parse_bool;

use crate::core::audio::ToneConfig;
use crate::core::dispatcher::{DispatcherConfig, PlaceholderConfig};
use crate::core::model::ModelConfig;

/// TLS configuration for HTTPS
#[derive(Debug, Clone, PartialEq)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Server configuration
///
/// Contains all configuration needed to run the bridge, including:
/// - Server settings (host, port, TLS)
/// - Synthesis dispatch (placeholder mode, sample rate, tone shape)
/// - KittenTTS model and backend endpoint
/// - Security settings (CORS)
#[derive(Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Synthesis dispatch
    /// Serve the placeholder tone instead of the real model
    pub mock_audio: bool,
    /// Sample rate used when a request omits `sample_rate`
    pub default_sample_rate: u32,
    pub placeholder_base_secs: f64,
    pub placeholder_secs_per_char: f64,
    pub placeholder_max_secs: f64,
    pub tone_frequency_hz: f64,
    /// Peak amplitude as a fraction of full scale
    pub tone_volume: f64,

    // KittenTTS model
    pub kitten_model: String,
    /// Voice used when a request sends none or "default"
    pub kitten_voice: String,
    /// Base URL of the inference server; real synthesis is unavailable without it
    pub kitten_backend_url: Option<String>,
    pub kitten_backend_api_key: Option<String>,
    pub kitten_backend_timeout_seconds: u64,
    /// Load the model at startup instead of on the first request
    pub kitten_warmup: bool,

    // Security settings
    /// "*" or a comma-separated list of allowed origins
    pub cors_allowed_origins: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("mock_audio", &self.mock_audio)
            .field("default_sample_rate", &self.default_sample_rate)
            .field("placeholder_base_secs", &self.placeholder_base_secs)
            .field("placeholder_secs_per_char", &self.placeholder_secs_per_char)
            .field("placeholder_max_secs", &self.placeholder_max_secs)
            .field("tone_frequency_hz", &self.tone_frequency_hz)
            .field("tone_volume", &self.tone_volume)
            .field("kitten_model", &self.kitten_model)
            .field("kitten_voice", &self.kitten_voice)
            .field("kitten_backend_url", &self.kitten_backend_url)
            .field(
                "kitten_backend_api_key",
                &self.kitten_backend_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "kitten_backend_timeout_seconds",
                &self.kitten_backend_timeout_seconds,
            )
            .field("kitten_warmup", &self.kitten_warmup)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

/// Zeroize the backend API key when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.kitten_backend_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable base
    ///
    /// Merges environment variables (with defaults) and applies YAML overrides on top.
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// After loading and merging, performs validation on the final configuration.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        // Note: .env file is loaded in main.rs at application startup
        let yaml_config = yaml::YamlConfig::from_file(path)?;

        let config = merge::merge_config(Some(yaml_config))?;

        validation::validate_config(&config)?;

        Ok(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    ///
    /// Returns true if TLS configuration is present
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Whether CORS is open to every origin
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.trim() == "*"
    }

    /// Explicitly allowed CORS origins; empty when every origin is allowed
    pub fn cors_origin_list(&self) -> Vec<String> {
        if self.allows_any_origin() {
            return Vec::new();
        }
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Settings for the synthesis dispatcher
    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            mock_audio: self.mock_audio,
            default_sample_rate: self.default_sample_rate,
            placeholder: PlaceholderConfig {
                base_secs: self.placeholder_base_secs,
                secs_per_char: self.placeholder_secs_per_char,
                max_secs: self.placeholder_max_secs,
            },
            tone: ToneConfig {
                frequency_hz: self.tone_frequency_hz,
                volume: self.tone_volume,
            },
        }
    }

    /// Settings for the KittenTTS model adapter
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model_id: self.kitten_model.clone(),
            default_voice: self.kitten_voice.clone(),
            backend_url: self.kitten_backend_url.clone(),
            api_key: self.kitten_backend_api_key.clone(),
            timeout: Duration::from_secs(self.kitten_backend_timeout_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    /// Helper function to create a test ServerConfig with defaults
    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "localhost".to_string(),
            port: 8000,
            tls: None,
            mock_audio: true,
            default_sample_rate: 24000,
            placeholder_base_secs: 0.5,
            placeholder_secs_per_char: 0.05,
            placeholder_max_secs: 2.5,
            tone_frequency_hz: 440.0,
            tone_volume: 0.2,
            kitten_model: "KittenML/kitten-tts-nano-0.1".to_string(),
            kitten_voice: "expr-voice-2-f".to_string(),
            kitten_backend_url: None,
            kitten_backend_api_key: None,
            kitten_backend_timeout_seconds: 60,
            kitten_warmup: false,
            cors_allowed_origins: "*".to_string(),
        }
    }

    fn cleanup_env_vars() {
        unsafe {
            env::remove_var("HOST");
            env::remove_var("PORT");
            env::remove_var("MOCK_AUDIO");
            env::remove_var("KITTEN_MODEL");
            env::remove_var("KITTEN_BACKEND_URL");
            env::remove_var("CORS_ALLOWED_ORIGINS");
        }
    }

    #[test]
    fn test_address() {
        let mut config = test_config();
        assert_eq!(config.address(), "localhost:8000");
        config.host = "0.0.0.0".to_string();
        config.port = 9443;
        assert_eq!(config.address(), "0.0.0.0:9443");
    }

    #[test]
    fn test_is_tls_enabled() {
        let mut config = test_config();
        assert!(!config.is_tls_enabled());
        config.tls = Some(TlsConfig {
            cert_path: PathBuf::from("/tmp/cert.pem"),
            key_path: PathBuf::from("/tmp/key.pem"),
        });
        assert!(config.is_tls_enabled());
    }

    #[test]
    fn test_cors_origin_list() {
        let mut config = test_config();
        assert!(config.allows_any_origin());
        assert!(config.cors_origin_list().is_empty());

        config.cors_allowed_origins = "https://a.example.com, https://b.example.com,".to_string();
        assert!(!config.allows_any_origin());
        assert_eq!(
            config.cors_origin_list(),
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }

    #[test]
    fn test_dispatcher_config() {
        let mut config = test_config();
        config.mock_audio = false;
        config.default_sample_rate = 16000;
        config.tone_volume = 0.5;

        let dispatcher = config.dispatcher_config();
        assert!(!dispatcher.mock_audio);
        assert_eq!(dispatcher.default_sample_rate, 16000);
        assert_eq!(dispatcher.placeholder, PlaceholderConfig::default());
        assert_eq!(dispatcher.tone.volume, 0.5);
        assert_eq!(dispatcher.tone.frequency_hz, 440.0);
    }

    #[test]
    fn test_model_config() {
        let mut config = test_config();
        config.kitten_backend_url = Some("http://localhost:8081".to_string());
        config.kitten_backend_timeout_seconds = 5;

        let model = config.model_config();
        assert_eq!(model.model_id, "KittenML/kitten-tts-nano-0.1");
        assert_eq!(model.default_voice, "expr-voice-2-f");
        assert_eq!(model.backend_url.as_deref(), Some("http://localhost:8081"));
        assert_eq!(model.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = test_config();
        config.kitten_backend_api_key = Some("super-secret-token".to_string());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_overrides_env() {
        cleanup_env_vars();
        unsafe {
            env::set_var("PORT", "9000");
            env::set_var("KITTEN_MODEL", "env-model");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(
            &config_path,
            r#"
server:
  host: "127.0.0.1"
synthesis:
  mock_audio: false
model:
  id: "yaml-model"
  backend_url: "http://localhost:8081"
"#,
        )
        .unwrap();

        let config = ServerConfig::from_file(&config_path).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert!(!config.mock_audio);
        assert_eq!(config.kitten_model, "yaml-model");
        assert_eq!(
            config.kitten_backend_url,
            Some("http://localhost:8081".to_string())
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_invalid_yaml() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "server: [unclosed").unwrap();

        let err = ServerConfig::from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }

    #[test]
    #[serial]
    fn test_from_file_validation_failure() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(
            &config_path,
            "security:\n  cors_allowed_origins: \"app.example.com\"\n",
        )
        .unwrap();

        let err = ServerConfig::from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGINS"));
    }
}
