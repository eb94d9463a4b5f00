use std::sync::Arc;

use auth::AuthSettings;
use auth::Authenticator;
use auth::HashingCost;
use realty_service::domain::user::ports::AuthServicePort;
use realty_service::domain::user::service::AuthService;
use realty_service::inbound::http::router::create_router;
use realty_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PRODUCT_KEY_SECRET: &str = "test-product-key-secret";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Same secrets as the server, for minting offline product keys
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(true).await
    }

    /// Spawn with product key generation gated by ADMIN or left public
    pub async fn spawn_with(product_key_requires_admin: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::new(AuthSettings {
                jwt_secret: JWT_SECRET.to_string(),
                product_key_secret: PRODUCT_KEY_SECRET.to_string(),
                token_lifetime: chrono::Duration::hours(24),
                // Cheap cost keeps the suite fast
                hashing: HashingCost {
                    memory_kib: 1024,
                    iterations: 1,
                    parallelism: 1,
                },
            })
            .expect("Failed to build authenticator"),
        );

        let repository = Arc::new(InMemoryUserRepository::new());
        let auth_service: Arc<dyn AuthServicePort> =
            Arc::new(AuthService::new(repository, Arc::clone(&authenticator)));

        let router = create_router(auth_service, product_key_requires_admin);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Product key minted with the server's secret, outside HTTP
    pub fn offline_product_key(&self, email: &str, role: &str) -> String {
        self.authenticator
            .generate_product_key(email, role)
            .expect("Failed to generate product key")
    }

    pub async fn signup(&self, role: &str, email: &str, product_key: Option<&str>) -> reqwest::Response {
        let mut body = json!({
            "name": "Jane Doe",
            "email": email,
            "phone": "555-0100",
            "password": "correct horse battery staple"
        });
        if let Some(key) = product_key {
            body["product_key"] = json!(key);
        }

        self.post(&format!("/api/auth/signup/{}", role))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up and return the issued token
    pub async fn signup_token(&self, role: &str, email: &str, product_key: Option<&str>) -> String {
        let response = self.signup(role, email, product_key).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}
