//! Account registration and login.

use chrono::Utc;
use domain::models::{
    normalize_email, LoginRequest, NewUser, RegisterRequest, Role, TokenResponse, User,
    UserResponse, UserStatus,
};
use domain::repositories::UserRepository;
use domain::services::{dispatch, NotificationService};
use domain::DomainError;
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{check_password_policy, hash_password, verify_password, PasswordError};
use std::sync::Arc;
use thiserror::Error;

/// Authentication service errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Password does not meet requirements")]
    WeakPassword(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is disabled")]
    UserDisabled,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::DuplicateEmail => AuthError::EmailAlreadyExists,
            DomainError::InvalidCredentials => AuthError::InvalidCredentials,
            other => AuthError::Domain(other),
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtConfig>,
    notifier: Arc<dyn NotificationService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt: Arc<JwtConfig>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            users,
            jwt,
            notifier,
        }
    }

    /// Creates a pending member account.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        check_password_policy(&request.password)
            .map_err(|e| AuthError::WeakPassword(e.to_string()))?;

        let email = normalize_email(&request.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&request.password)?;

        // The unique index still guards concurrent registrations.
        let user = self
            .users
            .create(NewUser {
                email,
                password_hash,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                phone: request.phone,
                status: UserStatus::Pending,
                role: Role::Member,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        let body = format!(
            "Welcome {}! Your account has been created. Please complete your member application.",
            user.first_name
        );
        dispatch(self.notifier.as_ref(), &user.email, "Welcome to USC TREA", &body).await;

        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AuthError> {
        let email = normalize_email(&request.email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if user.status == UserStatus::Inactive {
            return Err(AuthError::UserDisabled);
        }

        let now = Utc::now();
        self.users.record_login(user.id, now).await?;

        let issued = self.jwt.issue_access_token(user.id)?;
        tracing::info!(user_id = %user.id, jti = %issued.jti, "User logged in");

        let mut user = user;
        user.last_login_at = Some(now);
        Ok(TokenResponse {
            access_token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            user: UserResponse::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::services::MockNotificationService;
    use persistence::MemoryStore;

    const SECRET: &str = "unit-test-secret-with-enough-length!!";

    fn service(store: &MemoryStore, notifier: Arc<MockNotificationService>) -> AuthService {
        let jwt = JwtConfig::new(SECRET, 3600, 30).unwrap();
        AuthService::new(store.repositories().users, Arc::new(jwt), notifier)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "correct horse battery".to_string(),
            first_name: "Avery".to_string(),
            last_name: "Chen".to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_register_creates_pending_member() {
        let store = MemoryStore::new();
        let notifier = Arc::new(MockNotificationService::new());
        let auth = service(&store, notifier.clone());

        let user = auth
            .register(register_request("Avery@TREA.test"))
            .await
            .unwrap();

        assert_eq!(user.email, "avery@trea.test");
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.status, UserStatus::Pending);
        assert_ne!(user.password_hash, "correct horse battery");

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Welcome to USC TREA");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let store = MemoryStore::new();
        let auth = service(&store, Arc::new(MockNotificationService::new()));

        auth.register(register_request("dup@trea.test")).await.unwrap();
        let result = auth.register(register_request("DUP@trea.test")).await;
        assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_login_issues_token() {
        let store = MemoryStore::new();
        let auth = service(&store, Arc::new(MockNotificationService::new()));
        let user = auth
            .register(register_request("login@trea.test"))
            .await
            .unwrap();

        let token = auth
            .login(LoginRequest {
                email: "login@trea.test".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.user.id, user.id);

        let jwt = JwtConfig::new(SECRET, 3600, 30).unwrap();
        let claims = jwt.validate_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let store = MemoryStore::new();
        let auth = service(&store, Arc::new(MockNotificationService::new()));
        auth.register(register_request("wrong@trea.test"))
            .await
            .unwrap();

        let result = auth
            .login(LoginRequest {
                email: "wrong@trea.test".to_string(),
                password: "not the password".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let unknown = auth
            .login(LoginRequest {
                email: "nobody@trea.test".to_string(),
                password: "whatever123".to_string(),
            })
            .await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_rejects_inactive_user() {
        let store = MemoryStore::new();
        let auth = service(&store, Arc::new(MockNotificationService::new()));
        store
            .repositories()
            .users
            .create(NewUser {
                email: "inactive@trea.test".to_string(),
                password_hash: hash_password("correct horse battery").unwrap(),
                first_name: "In".to_string(),
                last_name: "Active".to_string(),
                phone: None,
                status: UserStatus::Inactive,
                role: Role::Member,
            })
            .await
            .unwrap();

        let result = auth
            .login(LoginRequest {
                email: "inactive@trea.test".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::UserDisabled)));
    }
}
