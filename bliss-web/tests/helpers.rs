//! Shared helpers for driving the portal router in tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use bliss_web::{create_app, AppState, WebConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over a fresh seeded community
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_state(AppState::new(WebConfig::default()))
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        create_app(self.state.clone())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        self.request("GET", uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> Response {
        self.request("POST", uri, cookie, Some(body)).await
    }

    /// Sign in through the API and return the `Cookie` header value
    pub async fn login(&self, role: &str) -> String {
        let response = self
            .post("/api/auth/login", None, json!({ "role": role }))
            .await;
        assert!(response.status().is_success(), "login as {} failed", role);
        session_cookie(&response).expect("login sets the session cookie")
    }
}

/// `name=value` of the session cookie set by a response
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("village_user="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Text of the page's `<h1>`, with HTML entities for `&` decoded
///
/// The template engine may write `&` as `&amp;` or `&#38;`.
pub fn page_heading(html: &str) -> Option<String> {
    let start = html.find("<h1>")? + "<h1>".len();
    let end = start + html[start..].find("</h1>")?;
    Some(
        html[start..end]
            .replace("&#38;", "&")
            .replace("&amp;", "&")
            .trim()
            .to_string(),
    )
}
