//! Configuration management for cookiebridge

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cookies::{CookieSource, FileCookieSource, StaticCookieSource, UnavailableCookieSource};

/// Backend used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Where the cookie header comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CookieSourceConfig {
    /// No source; requests are sent without cookies
    #[default]
    Unavailable,
    /// A literal `name=value; name2=value2` header
    Header(String),
    /// A file holding the header, `-` for stdin
    File(PathBuf),
}

impl CookieSourceConfig {
    /// Instantiate the configured source.
    pub fn build(&self) -> Arc<dyn CookieSource> {
        match self {
            CookieSourceConfig::Unavailable => Arc::new(UnavailableCookieSource),
            CookieSourceConfig::Header(header) => Arc::new(StaticCookieSource::new(header.clone())),
            CookieSourceConfig::File(path) => Arc::new(FileCookieSource::new(path.clone())),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub file: Option<PathBuf>,
    pub silent: bool,
    pub show_progress: bool,
    pub format_json: bool,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub user_agent: Option<String>,
    /// `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub cookie_source: CookieSourceConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            user_agent: Some(format!("cookiebridge/{}", crate::VERSION)),
            timeout: None,
            connect_timeout: None,
            cookie_source: CookieSourceConfig::Unavailable,
            output: OutputConfig {
                file: None,
                silent: false,
                show_progress: true,
                format_json: true,
            },
        }
    }
}
