//! Utility functions and helpers

use crate::error::{BridgeError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use url::Url;

/// URL validation and parsing utilities
pub struct UrlUtils;

impl UrlUtils {
    /// Parse the backend base URL.
    ///
    /// Adds `http://` when no scheme is given and a trailing slash so that
    /// endpoint paths are appended rather than replacing the last segment.
    pub fn parse_base_url(input: &str) -> Result<Url> {
        let url_str = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };

        let mut url = Url::parse(&url_str)
            .map_err(|e| BridgeError::InvalidUrl(format!("Invalid URL '{}': {}", input, e)))?;

        if url.cannot_be_a_base() {
            return Err(BridgeError::InvalidUrl(format!(
                "Backend URL '{}' cannot be used as a base",
                input
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    /// Append an endpoint path to a base URL
    pub fn join(base: &Url, path: &str) -> Result<Url> {
        base.join(path.trim_start_matches('/'))
            .map_err(|e| BridgeError::InvalidUrl(format!("Invalid endpoint '{}': {}", path, e)))
    }
}

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        if let Some(rest) = path.strip_prefix('~') {
            let home_dir = dirs::home_dir().ok_or_else(|| {
                BridgeError::Config("Cannot determine home directory".to_string())
            })?;
            Ok(home_dir.join(rest.trim_start_matches('/')))
        } else {
            Ok(PathBuf::from(path))
        }
    }

    /// Check if file exists and is readable
    pub fn check_file_readable(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(BridgeError::CookieSource(format!(
                "File not found: {:?}",
                path
            )));
        }

        if !path.is_file() {
            return Err(BridgeError::CookieSource(format!(
                "Path is not a file: {:?}",
                path
            )));
        }

        std::fs::File::open(path).map_err(|e| {
            BridgeError::CookieSource(format!("Cannot read file {:?}: {}", path, e))
        })?;

        Ok(())
    }
}

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// Parse a `key=value` option.
    ///
    /// The value is read as JSON when it parses (`true`, `3`, `"x"`, `[1]`),
    /// otherwise it is kept as a plain string.
    pub fn parse_option(input: &str) -> Result<(String, Value)> {
        match input.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                let value = serde_json::from_str(value)
                    .unwrap_or_else(|_| Value::String(value.to_string()));
                Ok((key.trim().to_string(), value))
            }
            _ => Err(BridgeError::Config(format!(
                "Invalid option format: '{}'. Expected 'key=value'",
                input
            ))),
        }
    }

    /// Parse timeout values (supports suffixes like 's', 'm', 'h')
    pub fn parse_timeout(input: &str) -> Result<std::time::Duration> {
        if let Ok(seconds) = input.parse::<u64>() {
            return Ok(std::time::Duration::from_secs(seconds));
        }

        let (number_part, suffix) = if let Some(stripped) = input.strip_suffix('s') {
            (stripped, 1)
        } else if let Some(stripped) = input.strip_suffix('m') {
            (stripped, 60)
        } else if let Some(stripped) = input.strip_suffix('h') {
            (stripped, 3600)
        } else {
            return Err(BridgeError::Config(format!(
                "Invalid timeout format: '{}'. Use number with optional suffix (s/m/h)",
                input
            )));
        };

        let number: u64 = number_part
            .parse()
            .map_err(|_| BridgeError::Config(format!("Invalid timeout number: '{}'", number_part)))?;

        let seconds = number.checked_mul(suffix).ok_or_else(|| {
            BridgeError::Config(format!("Timeout out of range: '{}'", input))
        })?;

        Ok(std::time::Duration::from_secs(seconds))
    }
}
