//! Common test utilities for integration tests.
//!
//! Every test builds its own app over a fresh in-memory store, so tests are
//! independent and need no database.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use domain::models::{NewUser, Role, User, UserStatus};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use persistence::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;
use trea_members_api::app::{create_app, AppState, Storage};
use trea_members_api::config::{
    AdminBootstrapConfig, Config, DatabaseConfig, JwtAuthConfig, LoggingConfig,
    NotificationsConfig, SecurityConfig, ServerConfig, StorageBackend,
};
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Configuration for the in-memory backend with rate limiting off.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            backend: StorageBackend::Memory,
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            cors_origins: vec![],
            rate_limit_per_minute: 0,
            hsts_enabled: false,
        },
        jwt: JwtAuthConfig {
            secret: "integration-test-secret-of-sufficient-length".to_string(),
            access_token_expiry_secs: 3600,
            leeway_secs: 30,
        },
        notifications: NotificationsConfig {
            enabled: false,
            sender: "noreply@trea.test".to_string(),
        },
        admin: AdminBootstrapConfig::default(),
    }
}

/// A running app plus the state behind it, for seeding.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(config, Storage::Memory(MemoryStore::new()))
            .expect("valid test config");
        let router = create_app(state.clone());
        Self { router, state }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Inserts a user directly and returns it with a bearer token.
    pub async fn seed_user(&self, role: Role, status: UserStatus) -> (User, String) {
        let user = self
            .state
            .repos
            .users
            .create(NewUser {
                email: format!("{}@trea.test", Uuid::new_v4()),
                password_hash: "unused".to_string(),
                first_name: FirstName().fake(),
                last_name: LastName().fake(),
                phone: None,
                status,
                role,
            })
            .await
            .unwrap();
        let token = self.state.jwt.issue_access_token(user.id).unwrap().token;
        (user, token)
    }

    pub async fn admin(&self) -> (User, String) {
        self.seed_user(Role::Admin, UserStatus::Active).await
    }

    pub async fn member(&self) -> (User, String) {
        self.seed_user(Role::Member, UserStatus::Active).await
    }

    pub async fn alumni(&self) -> (User, String) {
        self.seed_user(Role::Alumni, UserStatus::Active).await
    }

    /// Registers and logs in through the HTTP surface.
    pub async fn register_and_login(&self, email: &str) -> String {
        let response = self
            .send(json_request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                json!({
                    "email": email,
                    "password": TEST_PASSWORD,
                    "first_name": "Tommy",
                    "last_name": "Trojan"
                }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = self
            .send(json_request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                json!({ "email": email, "password": TEST_PASSWORD }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_response_body(response).await;
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Creates an event as `admin_token` and returns its id.
    pub async fn create_event(&self, admin_token: &str, max_attendees: Option<i32>) -> String {
        let response = self
            .send(json_request(
                Method::POST,
                "/api/v1/admin/events",
                Some(admin_token),
                json!({
                    "title": "Developer Panel",
                    "description": "Ground-up development in LA",
                    "event_date": (chrono::Utc::now() + chrono::Duration::days(10)).to_rfc3339(),
                    "event_type": "panel",
                    "location": "USC Village",
                    "max_attendees": max_attendees
                }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        parse_response_body(response).await["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

/// JSON request, optionally authenticated.
pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Bodiless request, optionally authenticated.
pub fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn parse_response_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

pub fn application_body(interests: &[&str]) -> Value {
    json!({
        "graduation_year": 2026,
        "major": "Real Estate Development",
        "career_interests": interests,
        "gpa": 3.6,
        "interest_reason": "Build a network in LA real estate",
        "experience": "Summer analyst at a REIT",
        "goals": "Acquisitions role after graduation"
    })
}
