//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use gardenhub_api::{AppState, build_app};
use gardenhub_auth::jwt::JwtEncoder;
use gardenhub_core::config::AppConfig;
use gardenhub_database::{MemoryStore, Store};
use gardenhub_entity::user::CreateUser;

const TEST_CONFIG: &str = r#"
[database]
url = "postgres://unused@localhost/gardenhub_test"

[auth]
jwt_secret = "integration-test-secret"
token_ttl_minutes = 5
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store behind the router, for seeding users
    pub store: Arc<dyn Store>,
    encoder: JwtEncoder,
}

/// A registered user and a bearer token for them
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");
        let encoder = JwtEncoder::new(&config.auth);
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let router = build_app(AppState::new(config, Arc::clone(&store)));

        Self {
            router,
            store,
            encoder,
        }
    }

    /// Register a user as `<username>@example.com` and sign a token for them.
    pub async fn create_user(&self, username: &str) -> TestUser {
        let email = format!("{username}@example.com");
        let mut uow = self.store.begin().await.expect("begin");
        let user = uow
            .create_user(&CreateUser {
                username: username.to_string(),
                email: email.clone(),
            })
            .await
            .expect("Failed to create user");
        uow.commit().await.expect("commit");

        let (token, _) = self
            .encoder
            .issue(user.id, &user.email, &user.username)
            .expect("Failed to sign token");

        TestUser {
            id: user.id,
            email,
            token,
        }
    }

    /// Create a garden and return its id.
    pub async fn create_garden(&self, owner: &TestUser, name: &str) -> String {
        let response = self
            .request("POST", "/gardens", Some(json!({ "name": name })), Some(&owner.token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.id()
    }

    /// Invite `invitee` with `role` and accept on their behalf.
    pub async fn add_member(
        &self,
        owner: &TestUser,
        garden_id: &str,
        invitee: &TestUser,
        role: &str,
    ) -> String {
        let response = self
            .request(
                "POST",
                "/garden-invitations",
                Some(json!({ "gardenId": garden_id, "email": invitee.email, "role": role })),
                Some(&owner.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        let invitation_id = response.id();

        let response = self
            .request(
                "PATCH",
                &format!("/garden-invitations/{invitation_id}"),
                Some(json!({ "action": "accept" })),
                Some(&invitee.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["data"]["membership"]["id"]
            .as_str()
            .expect("membership id")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Test response wrapper
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `id` field of a creation response.
    pub fn id(&self) -> String {
        self.body["id"].as_str().expect("id in response").to_string()
    }

    /// The machine-readable error code of a failure response.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
