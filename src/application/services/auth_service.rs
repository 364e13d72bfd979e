//! Authentication Service
//!
//! Handles registration, credential login, JWT issuing and refresh token
//! sessions with rotation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::{distr::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::JwtSettings;
use crate::domain::{Session, SessionRepository, User, UserRepository, UserRole};
use crate::shared::error::AppError;
use crate::shared::password::{hash_password, verify_password};
use crate::shared::snowflake::SnowflakeGenerator;

const REFRESH_TOKEN_LENGTH: usize = 64;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and open its first session
    async fn register(&self, request: RegisterUserDto) -> Result<(User, AuthTokens), AuthError>;

    /// Authenticate user with credentials
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, AuthError>;

    /// Exchange a refresh token for a new pair, rotating the stored hash
    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, AuthError>;

    /// Revoke refresh token (logout). Unknown tokens are ignored.
    async fn revoke_token(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Load a user by ID
    async fn get_user(&self, user_id: i64) -> Result<User, AuthError>;
}

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterUserDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: UserRole,
}

/// Authentication tokens response
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user or nucleus user ID)
    pub sub: String,
    /// Authorization tier
    pub role: UserRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailExists,

    #[error("Username already exists")]
    UsernameExists,

    #[error("User with this email or username already exists")]
    AccountExists,

    #[error("Role '{0}' cannot be self-assigned")]
    RoleNotAllowed(UserRole),

    #[error("Invalid or expired refresh token")]
    SessionNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for AuthError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Conflict(_) => AuthError::AccountExists,
            e => AuthError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::SessionNotFound => AppError::Unauthorized(e.to_string()),
            AuthError::UserNotFound => AppError::NotFound(e.to_string()),
            AuthError::EmailExists | AuthError::UsernameExists | AuthError::AccountExists => {
                AppError::Conflict(e.to_string())
            }
            AuthError::RoleNotAllowed(_) => AppError::BadRequest(e.to_string()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Sign an HS256 access token for `subject`. Returns the token and its
/// lifetime in seconds.
pub fn issue_access_token(
    secret: &str,
    subject: i64,
    role: UserRole,
    expiry_minutes: i64,
) -> Result<(String, i64), AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        role,
        exp: (now + Duration::minutes(expiry_minutes)).timestamp(),
        iat: now.timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

    Ok((token, expiry_minutes * 60))
}

/// Decode and validate an access token.
pub fn decode_access_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })
}

/// Hash refresh token for storage
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn generate_refresh_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// AuthService implementation
pub struct AuthServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    id_generator: Arc<SnowflakeGenerator>,
    jwt_settings: JwtSettings,
}

impl AuthServiceImpl {
    /// Create a new AuthServiceImpl
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        id_generator: Arc<SnowflakeGenerator>,
        jwt_settings: JwtSettings,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            id_generator,
            jwt_settings,
        }
    }

    fn generate_tokens(&self, user: &User) -> Result<AuthTokens, AuthError> {
        let (access_token, expires_in) = issue_access_token(
            &self.jwt_settings.secret,
            user.id,
            user.role,
            self.jwt_settings.access_token_expiry_minutes,
        )?;

        Ok(AuthTokens {
            access_token,
            refresh_token: generate_refresh_token(),
            expires_in,
            token_type: "Bearer".to_string(),
        })
    }

    async fn open_session(&self, user: &User) -> Result<AuthTokens, AuthError> {
        let tokens = self.generate_tokens(user)?;
        let session = Session::new(
            user.id,
            hash_refresh_token(&tokens.refresh_token),
            Utc::now() + Duration::days(self.jwt_settings.refresh_token_expiry_days),
        );
        self.session_repo.create(&session).await?;
        Ok(tokens)
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, request: RegisterUserDto) -> Result<(User, AuthTokens), AuthError> {
        if !request.role.is_self_assignable() {
            return Err(AuthError::RoleNotAllowed(request.role));
        }

        if self.user_repo.email_exists(&request.email).await? {
            return Err(AuthError::EmailExists);
        }
        if self.user_repo.username_exists(&request.username).await? {
            return Err(AuthError::UsernameExists);
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let now = Utc::now();
        let user = User {
            id: self.id_generator.generate(),
            username: request.username,
            email: request.email,
            password_hash,
            display_name: request.display_name,
            role: request.role,
            created_at: now,
            updated_at: now,
        };

        let created = self.user_repo.create(&user).await?;
        let tokens = self.open_session(&created).await?;

        tracing::info!(user_id = created.id, role = %created.role, "User registered");
        Ok((created, tokens))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        self.open_session(&user).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, AuthError> {
        let session = self
            .session_repo
            .find_by_token_hash(&hash_refresh_token(refresh_token))
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_revoked() {
            return Err(AuthError::SessionNotFound);
        }
        if session.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        let user = self
            .user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Token rotation: the presented refresh token stops working.
        let tokens = self.generate_tokens(&user)?;
        let expires_at = Utc::now() + Duration::days(self.jwt_settings.refresh_token_expiry_days);
        // A concurrent logout revokes the row between lookup and rotation
        self.session_repo
            .rotate(session.id, &hash_refresh_token(&tokens.refresh_token), expires_at)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AuthError::SessionNotFound,
                e => AuthError::from(e),
            })?;

        Ok(tokens)
    }

    async fn revoke_token(&self, refresh_token: &str) -> Result<(), AuthError> {
        if let Some(session) = self
            .session_repo
            .find_by_token_hash(&hash_refresh_token(refresh_token))
            .await?
        {
            self.session_repo.revoke(session.id).await?;
        }
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<User, AuthError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
