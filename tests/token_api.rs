//! HTTP-level tests for `/api/token` and `/health`, driven through the router
//! with `tower::ServiceExt::oneshot`.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use axum::routing::post;
use axum::Router;
use roomgate::api::cors;
use roomgate::auth::TokenService;
use roomgate::config::{CorsPolicy, SigningKeys};
use roomgate::error::AppError;
use tower::ServiceExt;

use common::test_app;

fn post_token(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

fn verifier() -> TokenService {
    TokenService::new(&SigningKeys::insecure_development(), 21600)
}

fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_valid_request_returns_verifiable_token() {
    let response = test_app(CorsPolicy::Open)
        .oneshot(post_token(r#"{"roomId":"test-room","username":"test-user"}"#))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let token = body["token"].as_str().expect("token should be a string");
    let claims = verifier().verify(token).expect("token should verify");

    assert_eq!(claims.sub, "test-user");
    assert_eq!(claims.name, "test-user");
    assert_eq!(claims.iss, "devkey");
    assert_eq!(claims.video.room, "test-room");
    assert!(claims.video.room_join);
    assert!(claims.video.can_publish);
    assert!(claims.video.can_subscribe);
    assert!(!claims.video.room_admin);
    assert!(!claims.video.room_create);
    assert_eq!(claims.exp - claims.nbf, 21600);
}

#[tokio::test]
async fn test_fields_are_signed_as_submitted() {
    let response = test_app(CorsPolicy::Open)
        .oneshot(post_token(r#"{"roomId":"  standup ","username":" alice "}"#))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let claims = verifier()
        .verify(body["token"].as_str().expect("token"))
        .expect("token should verify");
    assert_eq!(claims.sub, " alice ");
    assert_eq!(claims.name, " alice ");
    assert_eq!(claims.video.room, "  standup ");
}

#[tokio::test]
async fn test_missing_or_blank_fields_return_400() {
    let cases = [
        r#"{"roomId":"test-room"}"#,
        r#"{"username":"test-user"}"#,
        r#"{}"#,
        r#"{"roomId":"   ","username":"\t"}"#,
        r#"{"roomId":"test-room","username":""}"#,
        r#"{"roomId":42,"username":"test-user"}"#,
        "not json",
    ];

    for case in cases {
        let response = test_app(CorsPolicy::Open)
            .oneshot(post_token(case))
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {case}");
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "roomId and username are required" }),
            "body: {case}"
        );
    }
}

#[tokio::test]
async fn test_sequential_requests_both_validate() {
    let app = test_app(CorsPolicy::Open);
    let mut tokens = Vec::new();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_token(r#"{"roomId":"test-room","username":"test-user"}"#))
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        tokens.push(body["token"].as_str().expect("token").to_string());
    }

    for token in &tokens {
        let claims = verifier().verify(token).expect("token should verify");
        assert_eq!(claims.video.room, "test-room");
        assert_eq!(claims.sub, "test-user");
    }
}

#[tokio::test]
async fn test_options_returns_200_with_open_cors() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/token")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = test_app(CorsPolicy::Open)
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_HEADERS),
        Some("Content-Type, Authorization")
    );

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_browser_preflight_is_answered() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/token")
        .header(header::ORIGIN, "http://192.168.1.100:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = test_app(CorsPolicy::Open)
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_HEADERS),
        Some("Content-Type, Authorization")
    );

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_open_cors_headers_on_success_and_error() {
    let app = test_app(CorsPolicy::Open);

    for body in [r#"{"roomId":"r","username":"u"}"#, r#"{"roomId":"r"}"#] {
        let response = app
            .clone()
            .oneshot(post_token(body))
            .await
            .expect("Failed to execute request");

        assert_eq!(
            header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some("*")
        );
        assert_eq!(
            header_value(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
            Some("POST, OPTIONS")
        );
        assert_eq!(
            header_value(&response, header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some("Content-Type, Authorization")
        );
    }
}

#[tokio::test]
async fn test_signing_failure_returns_opaque_500_with_open_cors() {
    let failing = Router::new().route(
        "/api/token",
        post(|| async { Err::<(), AppError>(AppError::TokenSigning("secret detail".into())) }),
    );
    let app = cors::apply(failing, &CorsPolicy::Open);

    let response = app
        .oneshot(post_token(r#"{"roomId":"r","username":"u"}"#))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_HEADERS),
        Some("Content-Type, Authorization")
    );

    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({ "error": "Failed to generate token" }));
    assert!(!body.to_string().contains("secret detail"));
}

#[tokio::test]
async fn test_no_cors_policy() {
    let app = test_app(CorsPolicy::None);

    let response = app
        .clone()
        .oneshot(post_token(r#"{"roomId":"r","username":"u"}"#))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/token")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app.oneshot(request).await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_allow_list_echoes_known_origins_only() {
    let app = test_app(CorsPolicy::AllowList(vec!["http://app.test".to_string()]));

    let allowed = Request::builder()
        .method(Method::POST)
        .uri("/api/token")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://app.test")
        .body(Body::from(r#"{"roomId":"r","username":"u"}"#))
        .expect("Failed to build request");
    let response = app
        .clone()
        .oneshot(allowed)
        .await
        .expect("Failed to execute request");
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("http://app.test")
    );

    let denied = Request::builder()
        .method(Method::POST)
        .uri("/api/token")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://evil.test")
        .body(Body::from(r#"{"roomId":"r","username":"u"}"#))
        .expect("Failed to build request");
    let response = app.oneshot(denied).await.expect("Failed to execute request");
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = test_app(CorsPolicy::Open)
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}
