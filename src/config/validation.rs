use url::Url;
use crate::core::shell::ShellVersion;
use crate::error::{Result, GnomexError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        Url::parse(url).map_err(|e| {
            GnomexError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(GnomexError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// The template must be a URL carrying both placeholders
    pub fn validate_download_template(template: &str) -> Result<()> {
        for placeholder in ["UUID", "VERSION"] {
            if !template.contains(placeholder) {
                return Err(GnomexError::Validation(format!(
                    "download_url_template must contain the {} placeholder, got: {}",
                    placeholder, template
                )));
            }
        }

        Self::validate_url(template, "download_url_template")
    }

    pub fn validate_shell_version(version: &str) -> Result<()> {
        ShellVersion::parse(version).map(|_| ()).map_err(|_| {
            GnomexError::Validation(format!(
                "shell_version must look like \"major.minor\", got: {}",
                version
            ))
        })
    }
}
