//! Cookie header sources
//!
//! A source hands the collector the raw `Cookie` header for the target site.
//! Sources are read fresh on every collection; nothing is cached.

use crate::error::{BridgeError, Result};
use crate::utils::FileUtils;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Capability that exposes the current cookie header for the target site.
#[async_trait]
pub trait CookieSource: Send + Sync {
    /// Whether this source can provide cookies at all in the current context.
    fn is_available(&self) -> bool {
        true
    }

    /// Read the raw header. `Ok(None)` means the capability exists but holds no cookies.
    async fn read_header(&self) -> Result<Option<String>>;

    /// Short label used in log messages.
    fn describe(&self) -> String;
}

/// A header supplied up front, e.g. from `--cookie` or the environment.
#[derive(Debug, Clone)]
pub struct StaticCookieSource {
    header: String,
}

impl StaticCookieSource {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

#[async_trait]
impl CookieSource for StaticCookieSource {
    async fn read_header(&self) -> Result<Option<String>> {
        Ok(Some(self.header.clone()))
    }

    fn describe(&self) -> String {
        "inline cookie header".to_string()
    }
}

/// A header stored in a file, as copied from the browser's devtools.
///
/// The path `-` reads standard input. Surrounding whitespace and line breaks
/// are trimmed.
#[derive(Debug, Clone)]
pub struct FileCookieSource {
    path: PathBuf,
}

impl FileCookieSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

#[async_trait]
impl CookieSource for FileCookieSource {
    fn is_available(&self) -> bool {
        self.is_stdin() || self.path.is_file()
    }

    async fn read_header(&self) -> Result<Option<String>> {
        let raw = if self.is_stdin() {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .map_err(|e| BridgeError::CookieSource(format!("Cannot read stdin: {}", e)))?;
            buffer
        } else {
            FileUtils::check_file_readable(&self.path)?;
            tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                BridgeError::CookieSource(format!("Cannot read {:?}: {}", self.path, e))
            })?
        };

        let header = raw.trim();
        if header.is_empty() {
            Ok(None)
        } else {
            Ok(Some(header.to_string()))
        }
    }

    fn describe(&self) -> String {
        if self.is_stdin() {
            "standard input".to_string()
        } else {
            format!("file {}", self.path.display())
        }
    }
}

/// Stand-in used when no cookie source was configured.
#[derive(Debug, Clone, Default)]
pub struct UnavailableCookieSource;

#[async_trait]
impl CookieSource for UnavailableCookieSource {
    fn is_available(&self) -> bool {
        false
    }

    async fn read_header(&self) -> Result<Option<String>> {
        Err(BridgeError::CookieSource(
            "no cookie source configured".to_string(),
        ))
    }

    fn describe(&self) -> String {
        "no cookie source".to_string()
    }
}
