#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth::WorkFactor;
use chirp_service::chirp::errors::ChirpError;
use chirp_service::chirp::models::Chirp;
use chirp_service::chirp::models::ChirpId;
use chirp_service::chirp::ports::ChirpRepository;
use chirp_service::domain::auth::service::AuthService;
use chirp_service::domain::chirp::service::ChirpService;
use chirp_service::domain::user::service::UserService;
use chirp_service::inbound::http::router::create_router;
use chirp_service::inbound::http::router::AppState;
use chirp_service::user::errors::UserError;
use chirp_service::user::models::EmailAddress;
use chirp_service::user::models::User;
use chirp_service::user::models::UserId;
use chirp_service::user::ports::UserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Store,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Shared in-memory tables standing in for Postgres
#[derive(Clone, Default)]
pub struct Store {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    chirps: Arc<Mutex<Vec<Chirp>>>,
}

pub struct InMemoryUserRepository {
    store: Store,
}

pub struct InMemoryChirpRepository {
    store: Store,
}

impl TestApp {
    /// Spawn the application on the "dev" platform
    pub async fn spawn() -> Self {
        Self::spawn_on_platform("dev").await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on_platform(platform: &str) -> Self {
        let store = Store::default();

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap work factor keeps the suite fast
        let password_hasher = PasswordHasher::with_work_factor(WorkFactor {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let authenticator = Arc::new(Authenticator::new(
            password_hasher.clone(),
            JwtHandler::new(JWT_SECRET).expect("Failed to build JWT handler"),
        ));

        let user_repository = Arc::new(InMemoryUserRepository {
            store: store.clone(),
        });
        let chirp_repository = Arc::new(InMemoryChirpRepository {
            store: store.clone(),
        });

        let state = AppState::new(
            Arc::new(UserService::new(
                Arc::clone(&user_repository),
                password_hasher,
            )),
            Arc::new(ChirpService::new(chirp_repository)),
            Arc::new(AuthService::new(user_repository, authenticator)),
            platform.to_string(),
        );

        let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");
        let router = create_router(state, static_dir);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET).expect("Failed to build JWT handler"),
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

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn create_user(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log a user in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Login response carries a token")
            .to_string()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.store.users.lock().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn delete_all(&self) -> Result<u64, UserError> {
        let mut users = self.store.users.lock().unwrap();
        let deleted = users.len() as u64;
        users.clear();
        // Mirrors ON DELETE CASCADE
        self.store.chirps.lock().unwrap().clear();
        Ok(deleted)
    }
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.store.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self
            .store
            .chirps
            .lock()
            .unwrap()
            .iter()
            .find(|chirp| &chirp.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps = self.store.chirps.lock().unwrap().clone();
        chirps.sort_by_key(|chirp| chirp.created_at);
        Ok(chirps)
    }
}
