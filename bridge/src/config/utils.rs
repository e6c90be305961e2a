use std::env;
use std::str::FromStr;

/// Parse a boolean value from a string, supporting multiple formats
///
/// Accepts: "true", "false", "1", "0", "yes", "no" (case insensitive)
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Resolve a boolean with priority YAML > environment variable > default.
///
/// An environment value that is not a recognized boolean is an error rather
/// than a silent fallback.
pub fn bool_setting(
    env_var: &str,
    yaml_value: Option<bool>,
    default: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if let Some(value) = yaml_value {
        return Ok(value);
    }
    match env::var(env_var) {
        Ok(raw) => parse_bool(&raw)
            .ok_or_else(|| format!("Invalid {env_var} value '{raw}': expected true/false").into()),
        Err(_) => Ok(default),
    }
}

/// Resolve a parsed value with priority YAML > environment variable > default.
pub fn parsed_setting<T>(
    env_var: &str,
    yaml_value: Option<T>,
    default: T,
) -> Result<T, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(value) = yaml_value {
        return Ok(value);
    }
    match env::var(env_var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("Invalid {env_var} environment variable: {e}").into()),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_bool_true_variants() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool(" Yes "), Some(true));
    }

    #[test]
    fn test_parse_bool_false_variants() {
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("NO"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert_eq!(parse_bool("invalid"), None);
        assert_eq!(parse_bool("2"), None);
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    #[serial]
    fn test_bool_setting_priority() {
        unsafe {
            env::set_var("KITTEN_TEST_FLAG", "0");
        }
        assert!(bool_setting("KITTEN_TEST_FLAG", Some(true), false).unwrap());
        assert!(!bool_setting("KITTEN_TEST_FLAG", None, true).unwrap());

        unsafe {
            env::set_var("KITTEN_TEST_FLAG", "sometimes");
        }
        assert!(bool_setting("KITTEN_TEST_FLAG", None, true).is_err());

        unsafe {
            env::remove_var("KITTEN_TEST_FLAG");
        }
        assert!(bool_setting("KITTEN_TEST_FLAG", None, true).unwrap());
    }

    #[test]
    #[serial]
    fn test_parsed_setting_priority() {
        unsafe {
            env::set_var("KITTEN_TEST_NUMBER", "16000");
        }
        assert_eq!(
            parsed_setting::<u32>("KITTEN_TEST_NUMBER", Some(8000), 24000).unwrap(),
            8000
        );
        assert_eq!(
            parsed_setting::<u32>("KITTEN_TEST_NUMBER", None, 24000).unwrap(),
            16000
        );

        unsafe {
            env::set_var("KITTEN_TEST_NUMBER", "fast");
        }
        let err = parsed_setting::<u32>("KITTEN_TEST_NUMBER", None, 24000).unwrap_err();
        assert!(err.to_string().contains("KITTEN_TEST_NUMBER"));

        unsafe {
            env::remove_var("KITTEN_TEST_NUMBER");
        }
        assert_eq!(
            parsed_setting::<u32>("KITTEN_TEST_NUMBER", None, 24000).unwrap(),
            24000
        );
    }
}
