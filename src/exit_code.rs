use crate::error::BridgeError;

pub fn exit_code_for_error(err: &BridgeError) -> i32 {
    match err {
        BridgeError::InvalidUrl(_) => 3,
        BridgeError::Config(_) => 2,
        BridgeError::Io(_) => 23,
        BridgeError::Json(_) => 26,
        BridgeError::BackendStatus { .. } | BridgeError::Backend(_) => 22,
        BridgeError::Http(err) => http_exit_code(err),
        BridgeError::CookieSource(_) | BridgeError::NoCookies => 1,
    }
}

fn http_exit_code(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        return 28;
    }
    if err.is_connect() {
        return 7;
    }
    if err.is_request() {
        return 2;
    }
    if err.is_decode() || err.is_body() {
        return 56;
    }
    43
}
