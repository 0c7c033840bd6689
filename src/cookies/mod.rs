//! Cookie collection module
//!
//! Reads the cookie header from a [`CookieSource`] and renders it as a
//! Netscape cookie file. Every failure collapses into an absent result so
//! callers can still send their request without cookies.

use log::{debug, error, warn};
use std::fmt;
use std::sync::Arc;

pub mod netscape;
pub mod source;

pub use netscape::{convert, CookiePair, NetscapeCookieFile};
pub use source::{CookieSource, FileCookieSource, StaticCookieSource, UnavailableCookieSource};

/// Why no cookie file could be produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// The source cannot read cookies in this context
    Unavailable,
    /// The source works but the header is empty
    NoCookies,
    /// Reading the source failed
    Failed(String),
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsentReason::Unavailable => write!(f, "cookies are not available in this context"),
            AbsentReason::NoCookies => write!(f, "no cookies found"),
            AbsentReason::Failed(detail) => write!(f, "failed to extract cookies: {}", detail),
        }
    }
}

/// Outcome of a single collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Present(NetscapeCookieFile),
    Absent(AbsentReason),
}

impl Collection {
    /// Rendered cookie file, if any
    pub fn into_content(self) -> Option<String> {
        match self {
            Collection::Present(file) => Some(file.to_string()),
            Collection::Absent(_) => None,
        }
    }
}

/// Collects cookies from a source on demand
#[derive(Clone)]
pub struct CookieCollector {
    source: Arc<dyn CookieSource>,
}

impl CookieCollector {
    pub fn new(source: Arc<dyn CookieSource>) -> Self {
        Self { source }
    }

    /// Collector with no source; every collection is absent.
    pub fn unavailable() -> Self {
        Self::new(Arc::new(UnavailableCookieSource))
    }

    /// Collect and render cookies, or `None` when none could be obtained.
    pub async fn collect(&self) -> Option<String> {
        self.collect_detailed().await.into_content()
    }

    /// Collect cookies keeping the reason for an absent result.
    ///
    /// Unavailable and empty sources log one warning; read failures log one error.
    pub async fn collect_detailed(&self) -> Collection {
        if !self.source.is_available() {
            warn!(
                "Cookies are not available in this context ({})",
                self.source.describe()
            );
            return Collection::Absent(AbsentReason::Unavailable);
        }

        let header = match self.source.read_header().await {
            Ok(Some(header)) if !header.is_empty() => header,
            Ok(_) => {
                warn!("No cookies found in {}", self.source.describe());
                return Collection::Absent(AbsentReason::NoCookies);
            }
            Err(e) => {
                error!("Failed to extract cookies: {}", e);
                return Collection::Absent(AbsentReason::Failed(e.to_string()));
            }
        };

        let file = convert(&header);
        debug!(
            "Converted {} cookie(s) from {}",
            file.pairs().len(),
            self.source.describe()
        );
        Collection::Present(file)
    }
}

impl fmt::Debug for CookieCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieCollector")
            .field("source", &self.source.describe())
            .finish()
    }
}
