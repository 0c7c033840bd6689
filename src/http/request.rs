//! Request bodies sent to the backend

use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_QUALITY: &str = "best";
pub const DEFAULT_FORMAT: &str = "mp4";

/// Options supplied by the caller
///
/// Unset fields are left out of the info body and replaced by defaults in the
/// download body. `extra` holds arbitrary keys that only the info request
/// forwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub quality: Option<String>,
    pub format: Option<String>,
    pub audio_only: Option<bool>,
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = Some(audio_only);
        self
    }

    /// Add a pass-through key for the info request.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// All set options as a flat JSON object. Extras win over named fields.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(quality) = &self.quality {
            map.insert("quality".to_string(), Value::from(quality.as_str()));
        }
        if let Some(format) = &self.format {
            map.insert("format".to_string(), Value::from(format.as_str()));
        }
        if let Some(audio_only) = self.audio_only {
            map.insert("audio_only".to_string(), Value::from(audio_only));
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        map
    }
}

/// Download settings with defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOptions {
    pub quality: String,
    pub format: String,
    pub audio_only: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            audio_only: false,
        }
    }
}

impl From<&RequestOptions> for DownloadOptions {
    fn from(options: &RequestOptions) -> Self {
        let defaults = DownloadOptions::default();
        Self {
            quality: options.quality.clone().unwrap_or(defaults.quality),
            format: options.format.clone().unwrap_or(defaults.format),
            audio_only: options.audio_only.unwrap_or(defaults.audio_only),
        }
    }
}

/// Body of `POST /video/info`: url and cookies, then every option at top level.
///
/// Options are applied last, so an extra named `url` or `cookies_content`
/// replaces the value set before it.
pub fn info_payload(url: &str, cookies_content: Option<&str>, options: &RequestOptions) -> Value {
    let mut body = Map::new();
    body.insert("url".to_string(), Value::from(url));
    body.insert(
        "cookies_content".to_string(),
        cookies_content.map_or(Value::Null, Value::from),
    );
    for (key, value) in options.to_map() {
        body.insert(key, value);
    }
    Value::Object(body)
}

/// Body of `POST /video/download-stream`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadPayload<'a> {
    pub url: &'a str,
    pub cookies_content: Option<&'a str>,
    #[serde(flatten)]
    pub options: DownloadOptions,
}

impl<'a> DownloadPayload<'a> {
    pub fn new(url: &'a str, cookies_content: Option<&'a str>, options: &RequestOptions) -> Self {
        Self {
            url,
            cookies_content,
            options: DownloadOptions::from(options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{info_payload, DownloadOptions, DownloadPayload, RequestOptions};
    use serde_json::json;

    #[test]
    fn info_payload_merges_options_at_top_level() {
        let options = RequestOptions::new().quality("720p").extra("lang", "pt");
        let body = info_payload("https://x/y", Some("jar"), &options);
        assert_eq!(
            body,
            json!({
                "url": "https://x/y",
                "cookies_content": "jar",
                "quality": "720p",
                "lang": "pt"
            })
        );
    }

    #[test]
    fn info_payload_omits_unset_options() {
        let body = info_payload("https://x/y", None, &RequestOptions::new());
        assert_eq!(body, json!({ "url": "https://x/y", "cookies_content": null }));
    }

    #[test]
    fn info_payload_extras_override_earlier_keys() {
        let options = RequestOptions::new().extra("url", "https://other");
        let body = info_payload("https://x/y", None, &options);
        assert_eq!(body["url"], "https://other");
    }

    #[test]
    fn download_options_apply_defaults() {
        assert_eq!(
            DownloadOptions::from(&RequestOptions::new()),
            DownloadOptions {
                quality: "best".to_string(),
                format: "mp4".to_string(),
                audio_only: false,
            }
        );
    }

    #[test]
    fn download_payload_drops_extras() {
        let options = RequestOptions::new()
            .format("webm")
            .audio_only(true)
            .extra("lang", "pt");
        let payload = DownloadPayload::new("https://x/y", Some("jar"), &options);
        assert_eq!(
            serde_json::to_value(&payload).expect("serialize"),
            json!({
                "url": "https://x/y",
                "cookies_content": "jar",
                "quality": "best",
                "format": "webm",
                "audio_only": true
            })
        );
    }
}
