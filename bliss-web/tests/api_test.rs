//! JSON API driven through the full router

mod helpers;

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use bliss_portal::{Assistant, ConversationTurn, ImagePayload, PortalResult};
use bliss_web::{AppState, WebConfig};
use helpers::{json_body, location, session_cookie, text_body, TestApp};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_health_and_openapi() {
    let app = TestApp::new();

    let response = app.get("/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");

    let response = app.get("/api/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["info"]["title"], "Bliss III Portal API");
}

#[tokio::test]
async fn test_login_session_logout_cycle() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/auth/login",
            None,
            json!({ "role": "RESIDENT", "email": "alex@example.com" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();
    let body = json_body(response).await;
    assert_eq!(body["identity"]["id"], "res_1");
    assert_eq!(body["identity"]["email"], "alex@example.com");
    assert_eq!(body["redirect"], "/welcome");

    let body = json_body(app.get("/api/auth/session", Some(&cookie)).await).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["identity"]["houseNumber"], "Block B, #104");
    assert_eq!(body["landing"], "/welcome");

    // signing out twice is the same as once
    for _ in 0..2 {
        let response = app
            .request("POST", "/api/auth/logout", Some(&cookie), None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let removal = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(removal.starts_with("village_user="));
        assert!(removal.contains("Max-Age=0"));
        assert_eq!(json_body(response).await["redirect"], "/login");
    }

    let body = json_body(app.get("/api/auth/session", None).await).await;
    assert_eq!(body["authenticated"], false);
    println!("✅ Session cookie set, read and cleared");
}

#[tokio::test]
async fn test_malformed_cookie_is_signed_out() {
    let app = TestApp::new();

    for cookie in ["village_user=e30", "village_user=%%%", "village_user="] {
        let body = json_body(app.get("/api/auth/session", Some(cookie)).await).await;
        assert_eq!(body["authenticated"], false, "{}", cookie);

        let response = app.get("/api/announcements", Some(cookie)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_resolve_reports_decisions() {
    let app = TestApp::new();
    let resident = app.login("RESIDENT").await;

    let body = json_body(app.get("/api/resolve?path=/announcements", None).await).await;
    assert_eq!(body["outcome"], json!({ "kind": "redirect", "path": "/login" }));
    assert_eq!(body["denial"]["reason"], "unauthenticated");

    let body = json_body(
        app.get("/api/resolve?path=/admin/payments", Some(&resident))
            .await,
    )
    .await;
    assert_eq!(body["outcome"], json!({ "kind": "redirect", "path": "/welcome" }));
    assert_eq!(body["denial"]["reason"], "unauthorized");
    assert_eq!(body["denial"]["role"], "RESIDENT");

    let body = json_body(
        app.get("/api/resolve?path=/resident/history", Some(&resident))
            .await,
    )
    .await;
    assert_eq!(
        body["outcome"],
        json!({ "kind": "render", "path": "/resident/history" })
    );
    assert!(body["denial"].is_null());
}

#[tokio::test]
async fn test_layout_endpoint() {
    let app = TestApp::new();
    let admin = app.login("ADMIN").await;

    let response = app.get("/api/layout?path=/admin/payments", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["page"]["page"], "paymentLedger");
    assert_eq!(body["mobileNav"], json!([]));
    assert_eq!(body["sideNav"].as_array().unwrap().len(), 6);

    let response = app
        .get("/api/layout?path=/resident/profile", Some(&admin))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["redirect"], "/admin/dashboard");
}

#[tokio::test]
async fn test_layout_for_root_and_login_is_a_plain_redirect() {
    let app = TestApp::new();
    let admin = app.login("ADMIN").await;
    let resident = app.login("RESIDENT").await;

    for (cookie, path, landing) in [
        (&admin, "/", "/admin/dashboard"),
        (&admin, "/login", "/admin/dashboard"),
        (&resident, "/", "/welcome"),
    ] {
        let uri = format!("/api/layout?path={}", path);
        let response = app.get(&uri, Some(cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response), Some(landing), "{}", path);

        let body = json_body(response).await;
        assert_eq!(body["error"], "redirect");
        assert_eq!(body["redirect"], landing);
    }
    println!("✅ Routine redirects are not reported as denials");
}

#[tokio::test]
async fn test_denials_carry_redirect_targets() {
    let app = TestApp::new();
    let resident = app.login("RESIDENT").await;
    let admin = app.login("ADMIN").await;

    let response = app.get("/api/payments", Some(&resident)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "permission_denied");
    assert_eq!(body["redirect"], "/welcome");

    let response = app.get("/api/profile", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["redirect"], "/admin/dashboard");

    let response = app.get("/api/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["redirect"], "/login");
}

#[tokio::test]
async fn test_resident_sees_only_own_payments() {
    let app = TestApp::new();
    let resident = app.login("RESIDENT").await;

    let response = app.get("/api/payments/mine", Some(&resident)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payments = json_body(response).await;
    let payments = payments.as_array().unwrap();
    assert!(!payments.is_empty());
    assert!(payments.iter().all(|p| p["residentId"] == "res_1"));
}

#[tokio::test]
async fn test_request_flows_from_resident_to_admin() {
    let app = TestApp::new();
    let resident = app.login("RESIDENT").await;
    let admin = app.login("ADMIN").await;

    let response = app
        .post(
            "/api/requests",
            Some(&resident),
            json!({
                "title": "Clogged drain",
                "description": "Water pools in front of the gate after rain.",
                "category": "UTILITIES"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["status"], "PENDING");
    let id = created["id"].as_str().unwrap().to_string();

    // administrators cannot file requests
    let response = app
        .post(
            "/api/requests",
            Some(&admin),
            json!({ "title": "x", "description": "y" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let queue = json_body(app.get("/api/requests", Some(&admin)).await).await;
    assert_eq!(queue[0]["id"], id.as_str());

    let response = app
        .request(
            "PUT",
            &format!("/api/requests/{}/status", id),
            Some(&admin),
            Some(json!({ "status": "IN_PROGRESS" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "IN_PROGRESS");

    let mine = json_body(app.get("/api/requests/mine", Some(&resident)).await).await;
    assert!(mine
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == id.as_str() && r["status"] == "IN_PROGRESS"));
}

#[tokio::test]
async fn test_empty_request_is_rejected() {
    let app = TestApp::new();
    let resident = app.login("RESIDENT").await;

    let response = app
        .post(
            "/api/requests",
            Some(&resident),
            json!({ "title": "  ", "description": "Something broke" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "validation_failed");
}

#[tokio::test]
async fn test_payment_administration() {
    let app = TestApp::new();
    let admin = app.login("ADMIN").await;

    let before = json_body(app.get("/api/payments", Some(&admin)).await).await;
    let count = before["payments"].as_array().unwrap().len();

    let response = app
        .post(
            "/api/payments/dues",
            Some(&admin),
            json!({ "date": "2023-11-01" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await;
    let billed = created.as_array().unwrap().len();
    assert!(billed > 0);
    assert!(created[0]["description"]
        .as_str()
        .unwrap()
        .ends_with("November 2023"));

    // a second run for the same month bills nobody
    let again = json_body(
        app.post(
            "/api/payments/dues",
            Some(&admin),
            json!({ "date": "2023-11-15" }),
        )
        .await,
    )
    .await;
    assert_eq!(again, json!([]));

    let response = app
        .post(
            "/api/payments",
            Some(&admin),
            json!({
                "residentId": "res_1",
                "amount": 75.5,
                "date": "2023-11-02",
                "method": "GCash",
                "description": "Clubhouse reservation"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let recorded = json_body(response).await;
    assert_eq!(recorded["status"], "PAID");
    let id = recorded["id"].as_str().unwrap().to_string();

    let cycled = json_body(
        app.request("POST", &format!("/api/payments/{}/cycle", id), Some(&admin), None)
            .await,
    )
    .await;
    assert_eq!(cycled["status"], "PENDING");

    let response = app
        .request("DELETE", &format!("/api/payments/{}", id), Some(&admin), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request("DELETE", &format!("/api/payments/{}", id), Some(&admin), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let after = json_body(app.get("/api/payments", Some(&admin)).await).await;
    assert_eq!(after["payments"].as_array().unwrap().len(), count + billed);
}

#[tokio::test]
async fn test_bulletin_capabilities() {
    let app = TestApp::new();
    let resident = app.login("RESIDENT").await;
    let admin = app.login("ADMIN").await;
    let notice = json!({
        "title": "Water interruption",
        "content": "Maintenance on the main line from 9AM to 3PM.",
        "category": "URGENT"
    });

    let board = json_body(app.get("/api/announcements", Some(&resident)).await).await;
    assert_eq!(board["canManage"], false);

    let response = app
        .post("/api/announcements", Some(&resident), notice.clone())
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.post("/api/announcements", Some(&admin), notice).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["author"], "Head Administrator");

    let board = json_body(app.get("/api/announcements", Some(&resident)).await).await;
    assert_eq!(board["announcements"][0]["title"], "Water interruption");

    let contact = json!({ "name": "Barangay Hall", "number": "8123-4567", "category": "ADMIN" });
    let response = app.post("/api/emergency", Some(&resident), contact.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = app.post("/api/emergency", Some(&admin), contact).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_directory_search_and_export() {
    let app = TestApp::new();
    let admin = app.login("ADMIN").await;

    let page = json_body(
        app.get("/api/residents?q=alex&page=1", Some(&admin))
            .await,
    )
    .await;
    assert!(page["residents"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == "res_1"));

    let response = app.get("/api/residents/export", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .starts_with("text/csv"));
    let csv = text_body(response).await;
    assert!(csv.starts_with("ID,Name,Email,House,Type,Phone,Status,Joined"));
}

struct EchoAssistant;

#[async_trait]
impl Assistant for EchoAssistant {
    async fn chat(&self, history: &[ConversationTurn], message: &str) -> PortalResult<String> {
        Ok(format!("[{}] {}", history.len(), message))
    }

    async fn analyze_image(&self, _image: &ImagePayload, _instruction: &str) -> PortalResult<String> {
        Ok("Title: Leaking faucet\nThe kitchen faucet drips constantly.".to_string())
    }
}

#[tokio::test]
async fn test_assistant_requires_configuration() {
    let app = TestApp::new();
    let resident = app.login("RESIDENT").await;
    let chat = json!({ "message": "When is trash pickup?" });

    let response = app.post("/api/assistant/chat", None, chat.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post("/api/assistant/chat", Some(&resident), chat)
        .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_assistant_with_provider() {
    let state = AppState::new(WebConfig::default()).with_assistant(Arc::new(EchoAssistant));
    let app = TestApp::with_state(state);
    let resident = app.login("RESIDENT").await;

    let response = app
        .post(
            "/api/assistant/chat",
            Some(&resident),
            json!({
                "history": [{ "speaker": "model", "text": "Hello!" }],
                "message": "Pool hours?"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["reply"], "[1] Pool hours?");

    let response = app
        .post(
            "/api/assistant/analyze-image",
            Some(&resident),
            json!({ "image": { "data": "aGVsbG8=", "mimeType": "image/png" } }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Leaking faucet");

    let response = app
        .post(
            "/api/assistant/analyze-image",
            Some(&resident),
            json!({ "image": { "data": "aGVsbG8=", "mimeType": "text/plain" } }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
