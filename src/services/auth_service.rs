use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};
use validator::Validate;

use crate::events::{DomainEvent, EventPublisher};
use crate::models::auth::{LoginRequest, RegisterRequest, TokenPair};
use crate::models::User;
use crate::repositories::{Repository, StoreError, UserRepository};
use crate::services::jwt_service::JwtService;
use crate::utils::{AppError, AppResult};

const INVALID_CREDENTIALS: &str = "invalid username or password";
const USERNAME_TAKEN: &str = "username already taken";
const DUMMY_PASSWORD: &str = "constat-dummy-password";

/// Servicio de autenticación
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_service: JwtService,
    hash_cost: u32,
    /// Hash contra el que se verifica cuando el usuario no existe
    dummy_hash: OnceCell<String>,
    events: Option<EventPublisher>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_service: JwtService, hash_cost: u32) -> Self {
        Self {
            users,
            jwt_service,
            hash_cost,
            dummy_hash: OnceCell::new(),
            events: None,
        }
    }

    /// Publica una notificación de bienvenida tras cada registro
    pub fn with_events(mut self, events: EventPublisher) -> Self {
        self.events = Some(events);
        self
    }

    /// Registra un usuario y devuelve su primer par de tokens
    pub async fn register(&self, request: RegisterRequest) -> AppResult<TokenPair> {
        request.validate()?;

        // Comprobación orientativa; el índice único decide en el INSERT
        let existing = self
            .users
            .find_by_username(&request.username)
            .await
            .map_err(|e| AppError::from_store("user", e))?;
        if existing.is_some() {
            return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let password_hash = self.hash_password(request.password.clone()).await?;
        let user = User::from_registration(request, password_hash);

        let user = match self.users.create(user).await {
            Ok(user) => user,
            Err(StoreError::Conflict(_)) => {
                return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
            }
            Err(e) => return Err(AppError::from_store("user", e)),
        };

        info!("User {} registered with id {}", user.username, user.meta.id);
        if let Some(events) = &self.events {
            events.publish(&DomainEvent::Notification {
                user_id: user.meta.id,
                kind: "welcome".to_string(),
                message: format!("Welcome {}", user.owner_name),
            });
        }
        self.jwt_service.generate_token_pair(&user)
    }

    /// Usuario inexistente y contraseña incorrecta devuelven el mismo error
    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenPair> {
        request.validate()?;

        let Some(user) = self
            .users
            .find_by_username(&request.username)
            .await
            .map_err(|e| AppError::from_store("user", e))?
        else {
            // Mismo coste de bcrypt que con una contraseña incorrecta
            let dummy_hash = self
                .dummy_hash
                .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD.to_string()))
                .await?;
            self.verify_password(request.password, dummy_hash.clone())
                .await?;
            warn!("Login attempt for unknown user");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !self
            .verify_password(request.password, user.password_hash.clone())
            .await?
        {
            warn!("Failed login for user {}", user.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!("User {} logged in", user.username);
        self.jwt_service.generate_token_pair(&user)
    }

    pub fn validate_token(&self, token: &str) -> bool {
        self.jwt_service.validate_access_token(token)
    }

    pub fn refresh_access_token(&self, refresh_token: &str) -> AppResult<String> {
        self.jwt_service.refresh_access_token(refresh_token)
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.hash_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("hash task failed: {}", e)))?
            .map_err(|e| AppError::Hash(e.to_string()))
    }

    async fn verify_password(&self, password: String, hash: String) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("hash task failed: {}", e)))?
            .map_err(|e| AppError::Hash(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventBus, Queue};
    use crate::models::auth::tests::valid_registration;
    use crate::repositories::MemoryRepository;
    use crate::services::jwt_service::JwtConfig;

    fn service() -> (AuthService, Arc<MemoryRepository<User>>) {
        let users = Arc::new(MemoryRepository::<User>::new());
        let jwt = JwtService::new(JwtConfig::new("access-secret", "refresh-secret"));
        (AuthService::new(users.clone(), jwt, 4), users)
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (auth, users) = service();
        let pair = auth.register(valid_registration()).await.unwrap();
        assert!(auth.validate_token(&pair.access_token));

        let stored = users.find_by_username("karim16").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret-pass");

        let pair = auth.login(login("karim16", "s3cret-pass")).await.unwrap();
        assert!(auth.validate_token(&pair.access_token));
        assert!(auth.refresh_access_token(&pair.refresh_token).is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let (auth, users) = service();
        auth.register(valid_registration()).await.unwrap();

        let err = auth.register(valid_registration()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == "username already taken"));
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_the_same() {
        let (auth, _) = service();
        auth.register(valid_registration()).await.unwrap();

        let wrong_password = auth.login(login("karim16", "not-the-password")).await.unwrap_err();
        let unknown_user = auth.login(login("nobody", "s3cret-pass")).await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, AppError::Unauthorized(ref msg) if msg == INVALID_CREDENTIALS));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_registration_stores_one_user() {
        let (auth, users) = service();

        // Ambas pasan la comprobación previa; el INSERT decide
        let (first, second) = tokio::join!(
            auth.register(valid_registration()),
            auth.register(valid_registration())
        );

        let (ok, err): (Vec<_>, Vec<_>) = [first, second].into_iter().partition(|r| r.is_ok());
        assert_eq!(ok.len(), 1);
        let err = err.into_iter().next().unwrap().unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == USERNAME_TAKEN));
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_user_still_verifies_a_hash() {
        let (auth, _) = service();
        assert!(auth.dummy_hash.get().is_none());

        let err = auth.login(login("nobody", "s3cret-pass")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let dummy_hash = auth.dummy_hash.get().expect("dummy hash");
        assert!(dummy_hash.starts_with("$2b$04$"));
    }

    #[tokio::test]
    async fn test_registration_publishes_notification() {
        let mut bus = EventBus::new();
        let mut notifications = bus.take_receiver(Queue::Notifications).unwrap();
        let (auth, _) = service();
        let auth = auth.with_events(bus.publisher());

        auth.register(valid_registration()).await.unwrap();

        let body = notifications.recv().await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["type"], "notification");
        assert_eq!(payload["kind"], "welcome");
        assert_eq!(payload["user_id"], 1);
    }

    #[tokio::test]
    async fn test_invalid_registration_stores_nothing() {
        let (auth, users) = service();
        let request = RegisterRequest {
            wilaya_number: 0,
            ..valid_registration()
        };

        assert!(matches!(auth.register(request).await, Err(AppError::Validation(_))));
        assert!(users.is_empty().await);
    }
}
