//! cookiebridge - hand a site's cookies to a local video backend
//!
//! Reads the `Cookie` header for the video site from a configurable source,
//! renders it as a Netscape cookie file and posts it together with a video
//! URL to the backend's info and download endpoints.

pub mod cli;
pub mod config;
pub mod cookies;
pub mod error;
pub mod exit_code;
pub mod http;
pub mod logging;
pub mod output;
pub mod utils;

pub use cookies::{CookieCollector, CookieSource};
pub use error::{BridgeError, Result};
pub use http::{BackendClient, RequestOptions};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
