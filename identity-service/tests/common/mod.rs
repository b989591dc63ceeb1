use std::sync::Arc;

use auth::Authenticator;
use auth::CredentialHasher;
use auth::HashingParams;
use auth::TokenConfig;
use identity_service::domain::account::service::AuthenticationService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryAccountDirectory;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by the in-memory directory
pub struct TestApp {
    pub address: String,
    pub directory: Arc<InMemoryAccountDirectory>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

        let token_config = TokenConfig::new(TEST_SECRET.to_vec(), TokenConfig::default_ttl())
            .expect("Invalid test token configuration");

        // Cheap parameters keep the suite fast; hashes stay valid Argon2id digests.
        let hasher = CredentialHasher::with_params(HashingParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Invalid test hashing parameters");

        let authenticator = Arc::new(Authenticator::with_hasher(&token_config, hasher));
        let directory = Arc::new(InMemoryAccountDirectory::new());
        let authentication = Arc::new(AuthenticationService::new(
            Arc::clone(&directory),
            Arc::clone(&authenticator),
        ));

        let router = create_router(authentication, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            directory,
            authenticator,
            api_client: reqwest::Client::new(),
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

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/signup")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn signin(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/signin")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account and sign in, returning the bearer token
    pub async fn signed_in_token(&self, email: &str, password: &str) -> String {
        let response = self.signup("Test Account", email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self.signin(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in signin response")
            .to_string()
    }
}
