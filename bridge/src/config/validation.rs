use super::ServerConfig;
use crate::core::dispatcher::MAX_PLACEHOLDER_SECS;
use crate::core::model::remote::parse_base_url;
use crate::core::request::MAX_SAMPLE_RATE;

/// Run every validation rule against a merged configuration
pub fn validate_config(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_backend_url(&config.kitten_backend_url)?;
    validate_sample_rate(config.default_sample_rate)?;
    validate_tone(config.tone_frequency_hz, config.tone_volume)?;
    validate_placeholder(
        config.placeholder_base_secs,
        config.placeholder_secs_per_char,
        config.placeholder_max_secs,
    )?;
    validate_cors_origins(&config.cors_allowed_origins)?;
    Ok(())
}

/// Validate the KittenTTS backend URL
///
/// The URL is optional; when present it must be an absolute http(s) URL.
pub fn validate_backend_url(
    backend_url: &Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(url) = backend_url {
        parse_base_url(url).map_err(|e| format!("Invalid KITTEN_BACKEND_URL: {e}"))?;
    }
    Ok(())
}

/// Validate the default output sample rate
pub fn validate_sample_rate(sample_rate: u32) -> Result<(), Box<dyn std::error::Error>> {
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(format!(
            "DEFAULT_SAMPLE_RATE must be between 1 and {MAX_SAMPLE_RATE}, got {sample_rate}"
        )
        .into());
    }
    Ok(())
}

/// Validate placeholder tone parameters
///
/// Volume is a fraction of full scale in (0, 1]; frequency must be positive.
pub fn validate_tone(frequency_hz: f64, volume: f64) -> Result<(), Box<dyn std::error::Error>> {
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return Err(format!("TONE_FREQUENCY_HZ must be positive, got {frequency_hz}").into());
    }
    if !(volume > 0.0 && volume <= 1.0) {
        return Err(format!("TONE_VOLUME must be in (0, 1], got {volume}").into());
    }
    Ok(())
}

/// Validate the placeholder duration heuristic
///
/// The cap bounds every clip, so it alone limits the tone buffer size.
pub fn validate_placeholder(
    base_secs: f64,
    secs_per_char: f64,
    max_secs: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    for (name, value) in [
        ("PLACEHOLDER_BASE_SECONDS", base_secs),
        ("PLACEHOLDER_SECONDS_PER_CHAR", secs_per_char),
        ("PLACEHOLDER_MAX_SECONDS", max_secs),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(format!("{name} must be a non-negative number, got {value}").into());
        }
    }
    if max_secs < base_secs {
        return Err(format!(
            "PLACEHOLDER_MAX_SECONDS ({max_secs}) must not be smaller than PLACEHOLDER_BASE_SECONDS ({base_secs})"
        )
        .into());
    }
    if max_secs > MAX_PLACEHOLDER_SECS {
        return Err(format!(
            "PLACEHOLDER_MAX_SECONDS must not exceed {MAX_PLACEHOLDER_SECS}, got {max_secs}"
        )
        .into());
    }
    Ok(())
}

/// Validate the CORS origin setting
///
/// Accepts "*" or a comma-separated list of origins with an http(s) scheme.
pub fn validate_cors_origins(origins: &str) -> Result<(), Box<dyn std::error::Error>> {
    let trimmed = origins.trim();
    if trimmed == "*" {
        return Ok(());
    }

    let entries: Vec<&str> = trimmed
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();

    if entries.is_empty() {
        return Err("CORS_ALLOWED_ORIGINS must be '*' or a comma-separated list of origins".into());
    }

    for origin in entries {
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(format!(
                "CORS_ALLOWED_ORIGINS entry must start with http:// or https://: {origin}"
            )
            .into());
        }
    }
    Ok(())
}
