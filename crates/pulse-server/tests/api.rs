use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::TimeDelta;
use pretty_assertions::assert_eq;
use pulse_auth::{Authenticator, TokenSigner};
use pulse_config::{GeneralConfig, ServerConfig};
use pulse_db::MemoryStore;
use pulse_server::{ServerState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let auth = Authenticator::new(TokenSigner::new("api-test-secret", TimeDelta::hours(1)), 4);
    let state = Arc::new(ServerState::new(
        MemoryStore::new(),
        auth,
        GeneralConfig::default(),
    ));
    build_router(state, &ServerConfig::default())
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, name: &str, email: &str) -> (String, Value) {
    let (status, body) = call(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": name, "email": email, "password": "correct-horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    (body["token"].as_str().unwrap().to_string(), body["business"].clone())
}

async fn published_form(app: &Router, token: &str) -> String {
    let (status, form) = call(
        app,
        "POST",
        "/api/forms",
        Some(token),
        Some(json!({
            "title": "How was your visit?",
            "fields": [
                {"id": "stars", "type": "rating", "label": "Overall", "required": true, "field_category": "rating"},
                {"id": "comments", "type": "textarea", "label": "Comments", "field_category": "feedback_text"},
                {"id": "email", "type": "email", "label": "Email"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{form}");
    assert_eq!(form["status"], "draft");
    let form_id = form["id"].as_str().unwrap().to_string();

    let (status, published) = call(
        app,
        "POST",
        "/api/forms/publish",
        Some(token),
        Some(json!({"form_id": form_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{published}");
    assert_eq!(published["status"], "published");
    form_id
}

#[tokio::test]
async fn health_reports_backend() {
    let app = app();
    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = app();
    let (status, body) = call(&app, "GET", "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn feedback_round_trip() {
    let app = app();
    let (token, business) = register(&app, "Harbor Coffee", "owner@harbor.test").await;
    assert_eq!(business["slug"], "harbor-coffee");
    assert!(business.get("password_hash").is_none());

    published_form(&app, &token).await;

    let (status, page) = call(&app, "GET", "/api/page/harbor-coffee", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["business"]["name"], "Harbor Coffee");
    assert_eq!(page["form"]["fields"].as_array().unwrap().len(), 3);

    let (status, _) = call(
        &app,
        "POST",
        "/api/analytics/harbor-coffee",
        None,
        Some(json!({"event_type": "page_view"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, submission) = call(
        &app,
        "POST",
        "/api/feedback/harbor-coffee",
        None,
        Some(json!({"data": {"stars": 4, "comments": "Great flat white", "email": "ann@example.com"}})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{submission}");
    assert_eq!(submission["rating"], json!(4.0));
    assert_eq!(submission["feedback_text"], "Great flat white");
    assert_eq!(submission["user_id"], Value::Null);

    let (status, dashboard) = call(&app, "GET", "/api/dashboard?days=7", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["stats"]["total_submissions"], 1);
    assert_eq!(dashboard["stats"]["total_page_views"], 1);
    assert_eq!(dashboard["stats"]["conversion_rate"], json!(100.0));
    assert_eq!(dashboard["trends"].as_array().unwrap().len(), 7);
    assert_eq!(dashboard["recent_submissions"].as_array().unwrap().len(), 1);

    let (status, audience) = call(&app, "GET", "/api/audience", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(audience["profiles"][0]["customer_key"], "email:ann@example.com");

    let (status, insights) = call(&app, "GET", "/api/insights", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(insights["sentiment"]["positive"], 1);

    let (status, ai) = call(&app, "GET", "/api/ai-insights", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ai["highlights"][0]["title"], "Customers are happy");
}

#[tokio::test]
async fn missing_required_answer_is_rejected() {
    let app = app();
    let (token, _) = register(&app, "Harbor Coffee", "owner@harbor.test").await;
    published_form(&app, &token).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/feedback/harbor-coffee",
        None,
        Some(json!({"data": {"comments": "no stars given"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn customer_token_is_attached_to_feedback() {
    let app = app();
    let (business_token, _) = register(&app, "Harbor Coffee", "owner@harbor.test").await;
    published_form(&app, &business_token).await;

    let (status, customer) = call(
        &app,
        "POST",
        "/api/auth/register-customer",
        None,
        Some(json!({"email": "Ann@Example.com", "password": "another-secret", "name": "Ann"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(customer["user"]["email"], "ann@example.com");

    let (status, login) = call(
        &app,
        "POST",
        "/api/auth/login-customer",
        None,
        Some(json!({"email": "ann@example.com", "password": "another-secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let customer_token = login["token"].as_str().unwrap();

    let (status, submission) = call(
        &app,
        "POST",
        "/api/feedback/harbor-coffee",
        Some(customer_token),
        Some(json!({"data": {"stars": 5}})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submission["user_id"], customer["user"]["id"]);

    let (status, body) = call(&app, "GET", "/api/dashboard", Some(customer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = app();
    let (status, body) = call(&app, "GET", "/api/forms", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = call(&app, "GET", "/api/forms", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = TokenSigner::new("api-test-secret", TimeDelta::hours(1))
        .issue_at(
            "biz-00000000",
            pulse_core::identity::TokenKind::Business,
            "owner@harbor.test",
            chrono::Utc::now() - TimeDelta::hours(3),
        )
        .unwrap();
    let (status, body) = call(&app, "GET", "/api/forms", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn login_and_conflicts() {
    let app = app();
    register(&app, "Harbor Coffee", "owner@harbor.test").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "Harbor Coffee", "email": "other@harbor.test", "password": "correct-horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "owner@harbor.test", "password": "wrong-horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid email or password");

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "OWNER@harbor.test", "password": "correct-horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["business"]["name"], "Harbor Coffee");
}

#[tokio::test]
async fn products_are_scoped_to_their_business() {
    let app = app();
    let (harbor, _) = register(&app, "Harbor Coffee", "owner@harbor.test").await;
    let (bakery, _) = register(&app, "Dune Bakery", "owner@dune.test").await;

    let (status, product) = call(
        &app,
        "POST",
        "/api/products",
        Some(&harbor),
        Some(json!({"name": "  Flat White ", "category": "drinks"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["name"], "Flat White");
    let uri = format!("/api/products/{}", product["id"].as_str().unwrap());

    let (status, _) = call(&app, "GET", &uri, Some(&bakery), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = call(&app, "PUT", &uri, Some(&harbor), Some(json!({"active": false}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["active"], false);

    let (_, active) = call(&app, "GET", "/api/products", Some(&harbor), None).await;
    assert_eq!(active.as_array().unwrap().len(), 0);
    let (_, all) = call(
        &app,
        "GET",
        "/api/products?include_inactive=true",
        Some(&harbor),
        None,
    )
    .await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, body) = call(&app, "POST", "/api/products", Some(&harbor), Some(json!({"name": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn archived_forms_are_read_only() {
    let app = app();
    let (token, _) = register(&app, "Harbor Coffee", "owner@harbor.test").await;
    let form_id = published_form(&app, &token).await;

    let (status, archived) = call(
        &app,
        "PUT",
        &format!("/api/forms/status/{form_id}"),
        Some(&token),
        Some(json!({"status": "archived"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived["status"], "archived");

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/forms/{form_id}"),
        Some(&token),
        Some(json!({"title": "Renamed"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE");

    let (_, page) = call(&app, "GET", "/api/page/harbor-coffee", None, None).await;
    assert_eq!(page["form"], Value::Null);
}

#[tokio::test]
async fn profile_and_social_links() {
    let app = app();
    let (token, _) = register(&app, "Harbor Coffee", "owner@harbor.test").await;

    let (status, business) = call(
        &app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({"brand_color": "#0a7", "welcome_message": "Tell us everything"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(business["brand_color"], "#0a7");

    let (status, body) = call(
        &app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({"brand_color": "teal"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");

    let (status, links) = call(
        &app,
        "PUT",
        "/api/profile/social-links",
        Some(&token),
        Some(json!([
            {"platform": "Instagram", "url": "https://instagram.com/harbor"},
            {"platform": "website", "url": "https://harbor.test"}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(links[0]["platform"], "instagram");
    assert_eq!(links[1]["display_order"], 1);

    let (_, profile) = call(&app, "GET", "/api/profile", Some(&token), None).await;
    assert_eq!(profile["business"]["welcome_message"], "Tell us everything");
    assert_eq!(profile["social_links"].as_array().unwrap().len(), 2);

    let (_, page) = call(&app, "GET", "/api/page/harbor-coffee", None, None).await;
    assert_eq!(page["social_links"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_business_gets_a_hint() {
    let app = app();
    let (token, _) = register(&app, "Harbor Coffee", "owner@harbor.test").await;
    let (status, body) = call(&app, "GET", "/api/ai-insights", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["highlights"][0]["title"], "No feedback yet");

    let (status, page) = call(&app, "GET", "/api/page/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(page["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unreadable_requests_are_validation_errors() {
    let app = app();
    let (token, _) = register(&app, "Harbor Coffee", "owner@harbor.test").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/analytics/harbor-coffee",
        None,
        Some(json!({"event_type": "bogus"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
    assert!(body["error"].as_str().unwrap().contains("bogus"), "{body}");

    let request = Request::builder()
        .method("POST")
        .uri("/api/feedback/harbor-coffee")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "VALIDATION");

    let (status, body) = call(&app, "GET", "/api/dashboard?days=abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}
