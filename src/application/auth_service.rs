use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{Credentials, NewUser, Registration, User};
use crate::infrastructure::security::{hash_password, verify_password};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register_user(&self, req: Registration) -> Result<User> {
        trace!("Starting user registration");

        if self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .is_some()
        {
            warn!(email = %req.email, "User already exists");
            return Err(DomainError::Conflict("Email already registered".to_string()).into());
        }

        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await?
            .map_err(|e| {
                error!(error = %e, "Failed to hash password");
                DomainError::Internal(format!("Failed to hash password: {}", e))
            })?;

        debug!(email = %req.email, "Saving user to repository");
        let user = self
            .user_repository
            .create_user(NewUser {
                email: req.email,
                password_hash,
                name: req.name,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "User registered successfully");
        Ok(user)
    }

    /// Returns the user whose credentials match; unknown email and wrong
    /// password are indistinguishable to the caller.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: Credentials) -> Result<User> {
        trace!("Starting login");

        let user = self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %req.email, "User not found during login");
                DomainError::Unauthorized(INVALID_CREDENTIALS.to_string())
            })?;

        let password = req.password;
        let stored_hash = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await?
            .map_err(|e| {
                error!(user_id = user.id, error = %e, "Failed to verify password");
                DomainError::Internal(format!("Failed to verify password: {}", e))
            })?;

        if !is_valid {
            warn!(user_id = user.id, "Invalid password during login");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }

        info!(user_id = user.id, email = %user.email, "Login successful");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: i64) -> Result<Option<User>> {
        let user = self.user_repository.find_user_by_id(user_id).await?;
        if user.is_none() {
            warn!(user_id = user_id, "Session refers to a missing user");
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteStore;

    fn service() -> AuthService<SqliteStore> {
        AuthService::new(Arc::new(SqliteStore::open_in_memory().unwrap()))
    }

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: password.to_string(),
            name: "Mira".to_string(),
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service();
        let registered = auth
            .register_user(registration("mira@example.com", "s3cret"))
            .await
            .unwrap();
        assert!(registered.password_hash.starts_with("$argon2id$"));

        let logged_in = auth.login(credentials("mira@example.com", "s3cret")).await.unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_conflict() {
        let auth = service();
        auth.register_user(registration("dup@example.com", "one"))
            .await
            .unwrap();

        let err = auth
            .register_user(registration("dup@example.com", "two"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let auth = service();
        auth.register_user(registration("mira@example.com", "right"))
            .await
            .unwrap();

        let err = auth
            .login(credentials("mira@example.com", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Unauthorized(msg)) if msg == INVALID_CREDENTIALS
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthorized() {
        let err = service()
            .login(credentials("ghost@example.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_current_user_for_missing_id() {
        assert!(service().current_user(404).await.unwrap().is_none());
    }
}
