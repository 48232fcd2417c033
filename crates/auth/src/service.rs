//! Registration and login over a user store port.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use stockwise_core::{DomainError, DomainResult, UserId};

use crate::password;
use crate::token::TokenManager;
use crate::user::{Role, User};

/// Persistence port for users. Implemented by the SQLite adapter.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Duplicate email must surface as `Conflict`.
    async fn insert(&self, user: &User) -> DomainResult<()>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;
}

/// A successful login/registration: the user plus a fresh token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Register/login/lookup over the user store.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenManager,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenManager) -> Self {
        AuthService { users, tokens }
    }

    /// Register a new user and issue a token.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> DomainResult<AuthenticatedUser> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email is invalid"));
        }
        if password.len() < 8 {
            return Err(DomainError::validation(
                "password must be at least 8 characters",
            ));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email,
            password_hash: password::hash(password)?,
            role,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(&user).await?;
        info!(user_id = %user.id, role = %user.role, "user registered");

        let token = self.tokens.issue(user.id, user.role)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown email and bad password fail identically so the response does
    /// not reveal which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthenticatedUser> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if !password::verify(password, &user.password_hash)? {
            return Err(DomainError::Unauthorized);
        }

        let token = self.tokens.issue(user.id, user.role)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Look up the user behind a validated token (`/auth/me`).
    pub async fn current_user(&self, id: UserId) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }
}
