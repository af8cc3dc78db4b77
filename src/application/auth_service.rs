use crate::domain::error::DomainError;
use crate::domain::ids::{IdGenerator, IdKind};
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest, PublicUser, User};
use crate::domain::validation::require_text;
use crate::infrastructure::security::{hash_password, issue_token, verify_password};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

/// Access token plus the user it was issued for.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user: PublicUser,
}

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    ids: Arc<dyn IdGenerator>,
    jwt_secret: String,
    token_ttl_secs: i64,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(
        user_repository: Arc<R>,
        ids: Arc<dyn IdGenerator>,
        jwt_secret: String,
        token_ttl_secs: i64,
    ) -> Self {
        Self {
            user_repository,
            ids,
            jwt_secret,
            token_ttl_secs,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register_user(&self, req: CreateUser) -> Result<User> {
        trace!("Starting user registration");

        let email = require_text("email", Some(req.email))?;
        let name = require_text("name", Some(req.name))?;
        if req.password.is_empty() {
            return Err(DomainError::validation("password is required").into());
        }

        if self
            .user_repository
            .find_user_by_email(&email)
            .await?
            .is_some()
        {
            warn!(email = %email, "User already exists");
            return Err(DomainError::validation("User with this email already exists").into());
        }

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = User {
            id: self.ids.next_id(IdKind::User),
            email,
            name,
            password_hash,
        };

        // The lookup above is only a fast path; the insert re-checks under the write lock.
        debug!(user_id = %user.id, "Saving user to repository");
        if !self.user_repository.insert_user(user.clone()).await? {
            warn!(email = %user.email, "User already exists");
            return Err(DomainError::validation("User with this email already exists").into());
        }

        info!(user_id = %user.id, email = %user.email, "User registered successfully");
        Ok(user)
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<Session> {
        trace!("Starting login");

        let email = req.email.trim();
        let user = self
            .user_repository
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| {
                warn!(email = email, "User not found during login");
                DomainError::Unauthorized("Invalid email or password".to_string())
            })?;

        let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::Unauthorized("Invalid email or password".to_string()).into());
        }

        let access_token = issue_token(&user.id, &user.email, &self.jwt_secret, self.token_ttl_secs)
            .map_err(|e| {
                error!(error = %e, "Failed to generate token");
                DomainError::Internal(format!("Failed to generate token: {}", e))
            })?;

        info!(user_id = %user.id, "Login successful");
        Ok(Session {
            access_token,
            user: PublicUser::from(&user),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> Result<PublicUser> {
        let user = self
            .user_repository
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        Ok(PublicUser::from(&user))
    }
}
