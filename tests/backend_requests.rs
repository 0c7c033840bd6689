use cookiebridge::config::{Config, CookieSourceConfig};
use cookiebridge::error::BridgeError;
use cookiebridge::http::{BackendClient, RequestOptions};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COOKIE_FILE: &str = "# Netscape HTTP Cookie File\n\
                           .youtube.com\tTRUE\t/\tFALSE\t0\tsid\t1\n\
                           .youtube.com\tTRUE\t/\tFALSE\t0\ttoken\t2";

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn config_for(server: &MockServer, cookie_source: CookieSourceConfig) -> Config {
    Config {
        backend_url: server.uri(),
        cookie_source,
        ..Config::default()
    }
}

async fn single_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    requests[0].body_json::<Value>().expect("json body")
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_fetch_video_info_merges_options() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/info"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "url": "https://x/y",
            "cookies_content": COOKIE_FILE,
            "quality": "720p"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Clip" })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(
        &server,
        CookieSourceConfig::Header("sid=1; token=2".to_string()),
    );
    let client = BackendClient::new(&config).expect("client should build");
    let response = client
        .fetch_video_info("https://x/y", &RequestOptions::new().quality("720p"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_fetch_video_info_passes_extras_through() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/info"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config_for(&server, CookieSourceConfig::Unavailable);
    let client = BackendClient::new(&config).expect("client should build");
    let options = RequestOptions::new()
        .audio_only(true)
        .extra("playlist", false)
        .extra("lang", "pt");
    client
        .fetch_video_info("not even a url", &options)
        .await
        .expect("request should succeed");

    assert_eq!(
        single_body(&server).await,
        json!({
            "url": "not even a url",
            "cookies_content": null,
            "audio_only": true,
            "playlist": false,
            "lang": "pt"
        })
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_download_video_applies_defaults() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/download-stream"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config_for(
        &server,
        CookieSourceConfig::Header("sid=1; token=2".to_string()),
    );
    let client = BackendClient::new(&config).expect("client should build");
    client
        .download_video("https://x/y", &RequestOptions::default())
        .await
        .expect("request should succeed");

    assert_eq!(
        single_body(&server).await,
        json!({
            "url": "https://x/y",
            "cookies_content": COOKIE_FILE,
            "quality": "best",
            "format": "mp4",
            "audio_only": false
        })
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_download_video_drops_unknown_options() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/download-stream"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config_for(&server, CookieSourceConfig::Unavailable);
    let client = BackendClient::new(&config).expect("client should build");
    let options = RequestOptions::new().quality("480p").extra("lang", "pt");
    client
        .download_video("https://x/y", &options)
        .await
        .expect("request should succeed");

    let body = single_body(&server).await;
    assert_eq!(body["quality"], "480p");
    assert_eq!(body["cookies_content"], Value::Null);
    assert!(body.get("lang").is_none());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_error_status_is_returned_untouched() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/info"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "bad url" })))
        .mount(&server)
        .await;

    let config = config_for(&server, CookieSourceConfig::Unavailable);
    let client = BackendClient::new(&config).expect("client should build");
    let response = client
        .fetch_video_info("https://x/y", &RequestOptions::new())
        .await
        .expect("status codes are not errors");
    assert_eq!(response.status(), 400);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_connection_failure_propagates() {
    let listener = match std::net::TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(_) => return,
    };
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let config = Config {
        backend_url: format!("http://{}", addr),
        ..Config::default()
    };
    let client = BackendClient::new(&config).expect("client should build");
    let err = client
        .download_video("https://x/y", &RequestOptions::new())
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, BridgeError::Http(_)));
}

#[test]
fn test_endpoints_follow_backend_base() {
    let config = Config::default();
    let client = BackendClient::new(&config).expect("client should build");
    assert_eq!(
        client.endpoint("video/info").expect("endpoint").as_str(),
        "http://localhost:8000/video/info"
    );
    assert_eq!(
        client
            .endpoint("video/download-stream")
            .expect("endpoint")
            .as_str(),
        "http://localhost:8000/video/download-stream"
    );
}

#[test]
fn test_invalid_backend_is_rejected() {
    let config = Config {
        backend_url: "http://".to_string(),
        ..Config::default()
    };
    let err = BackendClient::new(&config).err().expect("invalid backend");
    assert!(matches!(err, BridgeError::InvalidUrl(_)));
}
