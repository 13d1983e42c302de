use std::env;
use crate::error::{Result, GnomexError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const EXTENSIONS_HOME: &'static str = "GNOMEX_EXTENSIONS_HOME";
    pub const SEARCH_URL: &'static str = "GNOMEX_SEARCH_URL";
    pub const DOWNLOAD_URL_TEMPLATE: &'static str = "GNOMEX_DOWNLOAD_URL_TEMPLATE";
    pub const USER_AGENT: &'static str = "GNOMEX_USER_AGENT";
    pub const REQUEST_TIMEOUT_SECS: &'static str = "GNOMEX_REQUEST_TIMEOUT_SECS";
    pub const DOWNLOAD_TIMEOUT_SECS: &'static str = "GNOMEX_DOWNLOAD_TIMEOUT_SECS";
    pub const SHELL_COMMAND: &'static str = "GNOMEX_SHELL_COMMAND";
    pub const EXTENSIONS_COMMAND: &'static str = "GNOMEX_EXTENSIONS_COMMAND";
    pub const SHELL_VERSION: &'static str = "GNOMEX_SHELL_VERSION";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(GnomexError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name, None)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                GnomexError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(GnomexError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Get all GNOMEX environment variables for debugging
    pub fn get_all_gnomex_vars() -> Vec<(String, String)> {
        env::vars()
            .filter(|(key, _)| key.starts_with("GNOMEX_"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_string() {
        env::set_var("TEST_GNOMEX_STRING", "  gnome-extensions  ");
        env::set_var("TEST_GNOMEX_BLANK", "   ");

        assert_eq!(
            EnvParser::parse_string("TEST_GNOMEX_STRING", None).unwrap(),
            Some("gnome-extensions".to_string())
        );
        assert_eq!(EnvParser::parse_string("TEST_GNOMEX_BLANK", None).unwrap(), None);
        assert_eq!(EnvParser::parse_string("TEST_GNOMEX_NOT_SET", None).unwrap(), None);

        fn reject(_: &str) -> Result<()> {
            Err(GnomexError::Validation("rejected".to_string()))
        }
        assert!(EnvParser::parse_string("TEST_GNOMEX_STRING", Some(reject)).is_err());

        env::remove_var("TEST_GNOMEX_STRING");
        env::remove_var("TEST_GNOMEX_BLANK");
    }

    #[test]
    fn test_parse_u64() {
        env::set_var("TEST_GNOMEX_U64_VALID", "42");
        env::set_var("TEST_GNOMEX_U64_OUT_OF_RANGE", "150");
        env::set_var("TEST_GNOMEX_U64_INVALID", "not_a_number");

        assert_eq!(EnvParser::parse_u64("TEST_GNOMEX_U64_VALID", 1, 100).unwrap(), Some(42));
        assert!(EnvParser::parse_u64("TEST_GNOMEX_U64_OUT_OF_RANGE", 1, 100).is_err());
        assert!(EnvParser::parse_u64("TEST_GNOMEX_U64_INVALID", 1, 100).is_err());
        assert_eq!(EnvParser::parse_u64("TEST_GNOMEX_U64_NOT_SET", 1, 100).unwrap(), None);

        env::remove_var("TEST_GNOMEX_U64_VALID");
        env::remove_var("TEST_GNOMEX_U64_OUT_OF_RANGE");
        env::remove_var("TEST_GNOMEX_U64_INVALID");
    }
}
