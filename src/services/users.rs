//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Check credentials and issue a JWT for the user
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, UserClaims)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !user.is_active {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        if !verify_password(&user.password, password)? {
            tracing::warn!("Failed login for {:?}", username);
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let claims = self.claims_for(&user).await?;
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("User {} logged in", user.id);
        Ok((token, claims))
    }

    async fn claims_for(&self, user: &User) -> AppResult<UserClaims> {
        let permissions = self.repository.users.get_permissions(user.id).await?;
        let now = Utc::now().timestamp();
        Ok(UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            is_superuser: user.is_superuser,
            permissions,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        })
    }

    pub fn token_lifetime_seconds(&self) -> i64 {
        self.config.jwt_expiration_hours as i64 * 3600
    }

    /// Create the configured bootstrap superuser unless the username is taken
    pub async fn ensure_superuser(&self, username: &str, password: &str) -> AppResult<()> {
        if self.repository.users.get_by_username(username).await?.is_some() {
            return Ok(());
        }

        let hash = hash_password(password)?;
        let user = self.repository.users.create(username, &hash, true).await?;
        tracing::info!("Created superuser {:?} (id={})", user.username, user.id);
        Ok(())
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(stored_hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password(&hash, "s3cret").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("not-a-hash", "s3cret").is_err());
    }
}
