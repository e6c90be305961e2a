use std::env;
use std::path::PathBuf;

use super::utils::{bool_setting, parsed_setting};
use super::yaml::YamlConfig;
use super::{ServerConfig, TlsConfig};
use crate::core::audio::tone::{DEFAULT_FREQUENCY_HZ, DEFAULT_VOLUME};
use crate::core::dispatcher::PlaceholderConfig;
use crate::core::model::config::{DEFAULT_BACKEND_TIMEOUT_SECS, DEFAULT_MODEL_ID, DEFAULT_VOICE};
use crate::core::request::DEFAULT_SAMPLE_RATE;

/// Merge YAML configuration with environment variables
///
/// Priority order (highest to lowest):
/// 1. YAML configuration values
/// 2. Environment variables
/// 3. Default values
///
/// # Arguments
/// * `yaml_config` - Optional YAML configuration to use as overrides
///
/// # Returns
/// * `Result<ServerConfig, Box<dyn std::error::Error>>` - The merged configuration or an error
pub fn merge_config(
    yaml_config: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let yaml = yaml_config.unwrap_or_default();

    // Helper macro to get value with priority: YAML > ENV > Default
    macro_rules! get_value {
        ($env_var:expr, $yaml_value:expr, $default:expr) => {
            $yaml_value
                .or_else(|| env::var($env_var).ok())
                .unwrap_or_else(|| $default.to_string())
        };
    }

    // Helper macro for optional values: YAML > ENV, empty strings count as unset
    macro_rules! get_optional {
        ($env_var:expr, $yaml_value:expr) => {
            $yaml_value
                .or_else(|| env::var($env_var).ok())
                .filter(|v: &String| !v.trim().is_empty())
        };
    }

    let server = yaml.server.as_ref();
    let synthesis = yaml.synthesis.as_ref();
    let placeholder = synthesis.and_then(|s| s.placeholder.as_ref());
    let tone = synthesis.and_then(|s| s.tone.as_ref());
    let model = yaml.model.as_ref();

    // Server configuration
    let host = get_value!("HOST", server.and_then(|s| s.host.clone()), "0.0.0.0");

    let port = if let Some(yaml_port) = server.and_then(|s| s.port) {
        yaml_port
    } else if let Ok(port_str) = env::var("PORT") {
        port_str
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT environment variable: {e}"))?
    } else {
        8000
    };

    // TLS: a YAML `enabled: false` switches it off even if paths are present
    let yaml_tls = server.and_then(|s| s.tls.as_ref());
    let tls_enabled = yaml_tls.and_then(|t| t.enabled).unwrap_or(true);
    let tls_cert_path = get_optional!(
        "TLS_CERT_PATH",
        yaml_tls.and_then(|t| t.cert_path.clone())
    );
    let tls_key_path = get_optional!("TLS_KEY_PATH", yaml_tls.and_then(|t| t.key_path.clone()));

    let tls = if !tls_enabled {
        None
    } else {
        match (tls_cert_path, tls_key_path) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err("TLS_KEY_PATH is required when TLS_CERT_PATH is set".into());
            }
            (None, Some(_)) => {
                return Err("TLS_CERT_PATH is required when TLS_KEY_PATH is set".into());
            }
        }
    };

    // Synthesis dispatch
    let mock_audio = bool_setting("MOCK_AUDIO", synthesis.and_then(|s| s.mock_audio), true)?;
    let default_sample_rate = parsed_setting(
        "DEFAULT_SAMPLE_RATE",
        synthesis.and_then(|s| s.default_sample_rate),
        DEFAULT_SAMPLE_RATE,
    )?;

    let placeholder_defaults = PlaceholderConfig::default();
    let placeholder_base_secs = parsed_setting(
        "PLACEHOLDER_BASE_SECONDS",
        placeholder.and_then(|p| p.base_secs),
        placeholder_defaults.base_secs,
    )?;
    let placeholder_secs_per_char = parsed_setting(
        "PLACEHOLDER_SECONDS_PER_CHAR",
        placeholder.and_then(|p| p.secs_per_char),
        placeholder_defaults.secs_per_char,
    )?;
    let placeholder_max_secs = parsed_setting(
        "PLACEHOLDER_MAX_SECONDS",
        placeholder.and_then(|p| p.max_secs),
        placeholder_defaults.max_secs,
    )?;

    let tone_frequency_hz = parsed_setting(
        "TONE_FREQUENCY_HZ",
        tone.and_then(|t| t.frequency_hz),
        DEFAULT_FREQUENCY_HZ,
    )?;
    let tone_volume = parsed_setting("TONE_VOLUME", tone.and_then(|t| t.volume), DEFAULT_VOLUME)?;

    // Model backend
    let kitten_model = get_value!(
        "KITTEN_MODEL",
        model.and_then(|m| m.id.clone()),
        DEFAULT_MODEL_ID
    );
    let kitten_voice = get_value!(
        "KITTEN_VOICE",
        model.and_then(|m| m.voice.clone()),
        DEFAULT_VOICE
    );
    let kitten_backend_url = get_optional!(
        "KITTEN_BACKEND_URL",
        model.and_then(|m| m.backend_url.clone())
    );
    let kitten_backend_api_key = get_optional!(
        "KITTEN_BACKEND_API_KEY",
        model.and_then(|m| m.api_key.clone())
    );
    let kitten_backend_timeout_seconds = parsed_setting(
        "KITTEN_BACKEND_TIMEOUT_SECONDS",
        model.and_then(|m| m.timeout_seconds),
        DEFAULT_BACKEND_TIMEOUT_SECS,
    )?;
    let kitten_warmup = bool_setting("KITTEN_WARMUP", model.and_then(|m| m.warmup), false)?;

    // Security
    let cors_allowed_origins = get_value!(
        "CORS_ALLOWED_ORIGINS",
        yaml.security
            .as_ref()
            .and_then(|s| s.cors_allowed_origins.clone()),
        "*"
    );

    Ok(ServerConfig {
        host,
        port,
        tls,
        mock_audio,
        default_sample_rate,
        placeholder_base_secs,
        placeholder_secs_per_char,
        placeholder_max_secs,
        tone_frequency_hz,
        tone_volume,
        kitten_model,
        kitten_voice,
        kitten_backend_url,
        kitten_backend_api_key,
        kitten_backend_timeout_seconds,
        kitten_warmup,
        cors_allowed_origins,
    })
}
