use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// This structure represents the full configuration that can be loaded from a YAML file.
/// All fields are optional to allow partial configuration. Values present here override
/// environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8000
///   tls:
///     enabled: true
///     cert_path: "/etc/kitten-bridge/cert.pem"
///     key_path: "/etc/kitten-bridge/key.pem"
///
/// synthesis:
///   mock_audio: false
///   default_sample_rate: 24000
///   placeholder:
///     base_secs: 0.5
///     secs_per_char: 0.05
///     max_secs: 2.5
///   tone:
///     frequency_hz: 440.0
///     volume: 0.2
///
/// model:
///   id: "KittenML/kitten-tts-nano-0.1"
///   voice: "expr-voice-2-f"
///   backend_url: "http://127.0.0.1:8081"
///   api_key: "backend-token"
///   timeout_seconds: 60
///   warmup: true
///
/// security:
///   cors_allowed_origins: "*"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub synthesis: Option<SynthesisYaml>,
    pub model: Option<ModelYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Synthesis dispatch settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SynthesisYaml {
    /// Serve the placeholder tone instead of the real model
    pub mock_audio: Option<bool>,
    pub default_sample_rate: Option<u32>,
    pub placeholder: Option<PlaceholderYaml>,
    pub tone: Option<ToneYaml>,
}

/// Placeholder duration heuristic from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PlaceholderYaml {
    pub base_secs: Option<f64>,
    pub secs_per_char: Option<f64>,
    pub max_secs: Option<f64>,
}

/// Placeholder tone from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ToneYaml {
    pub frequency_hz: Option<f64>,
    pub volume: Option<f64>,
}

/// Real model backend settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ModelYaml {
    pub id: Option<String>,
    pub voice: Option<String>,
    pub backend_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    /// Load the model at startup instead of on the first request
    pub warmup: Option<bool>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*")
    pub cors_allowed_origins: Option<String>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Returns
    /// * `Result<Self, Box<dyn std::error::Error>>` - The loaded YAML config or an error
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
