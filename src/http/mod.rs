//! Backend request client
//!
//! Sends the collected cookie file and a video URL to the local backend. The
//! returned responses are handed back untouched; status codes are the
//! caller's business.

use crate::config::Config;
use crate::cookies::CookieCollector;
use crate::error::{BridgeError, Result};
use crate::utils::UrlUtils;
use log::debug;
use reqwest::{Client, ClientBuilder, Response};
use url::Url;

pub mod progress;
pub mod request;
pub mod response;

pub use request::{DownloadOptions, DownloadPayload, RequestOptions};

pub const INFO_PATH: &str = "video/info";
pub const DOWNLOAD_STREAM_PATH: &str = "video/download-stream";

/// Client for the video backend
pub struct BackendClient {
    client: Client,
    base_url: Url,
    collector: CookieCollector,
}

impl BackendClient {
    /// Create a client from configuration, using the configured cookie source
    pub fn new(config: &Config) -> Result<Self> {
        let collector = CookieCollector::new(config.cookie_source.build());
        Self::with_collector(config, collector)
    }

    /// Create a client with an explicit collector
    pub fn with_collector(config: &Config, collector: CookieCollector) -> Result<Self> {
        let mut builder = ClientBuilder::new();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder.build().map_err(BridgeError::Http)?;
        let base_url = UrlUtils::parse_base_url(&config.backend_url)?;

        Ok(Self {
            client,
            base_url,
            collector,
        })
    }

    /// Full URL of an endpoint below the backend base
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        UrlUtils::join(&self.base_url, path)
    }

    /// `POST /video/info` with the cookies and every caller option at top level
    pub async fn fetch_video_info(&self, url: &str, options: &RequestOptions) -> Result<Response> {
        let cookies = self.collector.collect().await;
        let body = request::info_payload(url, cookies.as_deref(), options);
        let endpoint = self.endpoint(INFO_PATH)?;
        debug!("POST {} (cookies: {})", endpoint, cookies.is_some());
        self.post_json(endpoint, &body).await
    }

    /// `POST /video/download-stream` with quality, format and audio flag resolved
    pub async fn download_video(&self, url: &str, options: &RequestOptions) -> Result<Response> {
        let cookies = self.collector.collect().await;
        let payload = DownloadPayload::new(url, cookies.as_deref(), options);
        let endpoint = self.endpoint(DOWNLOAD_STREAM_PATH)?;
        debug!(
            "POST {} (quality={}, format={}, audio_only={}, cookies: {})",
            endpoint,
            payload.options.quality,
            payload.options.format,
            payload.options.audio_only,
            cookies.is_some()
        );
        self.post_json(endpoint, &payload).await
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: Url,
        body: &T,
    ) -> Result<Response> {
        self.client
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(BridgeError::Http)
    }
}
