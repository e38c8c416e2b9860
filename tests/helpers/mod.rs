//! Shared test helpers for integration tests.
//!
//! The app under test runs over the in-memory store, so tests need no
//! external database. Tokens are minted locally with the same secret the
//! router's decoder verifies against.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use wardlink_auth::{TokenDecoder, TokenEncoder};
use wardlink_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, RealtimeConfig, ServerConfig,
};
use wardlink_database::store::{AccountStore, LinkRequestStore, NotificationStore};
use wardlink_database::MemoryStore;
use wardlink_entity::account::{Account, AccountRole};
use wardlink_realtime::{Dispatcher, PresenceRegistry};
use wardlink_service::link::{LinkRequestLedger, LinkService};
use wardlink_service::notification::NotificationService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct seeding and inspection
    pub store: MemoryStore,
    /// Live channel registry
    pub registry: Arc<PresenceRegistry>,
    encoder: TokenEncoder,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store.
    pub fn new() -> Self {
        let config = test_config();
        let store = MemoryStore::new();

        let accounts: Arc<dyn AccountStore> = Arc::new(store.clone());
        let requests: Arc<dyn LinkRequestStore> = Arc::new(store.clone());
        let notifications: Arc<dyn NotificationStore> = Arc::new(store.clone());

        let registry = Arc::new(PresenceRegistry::new());
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&registry)));

        let notification_service = Arc::new(NotificationService::new(notifications));
        let ledger = LinkRequestLedger::new(Arc::clone(&accounts), requests);
        let link_service = Arc::new(LinkService::new(
            accounts,
            ledger,
            Arc::clone(&notification_service),
            dispatcher,
        ));

        let encoder = TokenEncoder::new(&config.auth);
        let token_decoder = Arc::new(TokenDecoder::new(&config.auth));

        let state = wardlink_api::AppState {
            config: Arc::new(config),
            token_decoder,
            registry: Arc::clone(&registry),
            link_service,
            notification_service,
        };

        Self {
            router: wardlink_api::build_router(state),
            store,
            registry,
            encoder,
        }
    }

    /// Seed an account and return it with a valid access token.
    pub async fn seed(&self, name: &str, phone: &str, role: AccountRole) -> (Account, String) {
        let account = self.store.seed_account(name, phone, role).await;
        let token = self
            .encoder
            .mint(account.id, account.role, &account.username)
            .expect("Failed to mint token");
        (account, token)
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

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            access_token_ttl_seconds: 3600,
        },
        realtime: RealtimeConfig::default(),
        logging: LoggingConfig::default(),
    }
}
