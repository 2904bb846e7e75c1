//! Identity service — registration and login.
//!
//! Email is the login identifier. HTTP handlers stay thin wrappers
//! that delegate here.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::{PaginatedResult, PaginationParams};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repos.users().find_by_email(email).await? else {
            return Err(DomainError::Unauthorized("Invalid email or password".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid email or password".into()));
        }

        let token = create_token(user.id, &user.email, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        info!(user_id = user.id, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account (default role: guest).
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
        phone: Option<String>,
    ) -> DomainResult<User> {
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if name.is_empty() || name.len() > 50 {
            return Err(DomainError::Validation("Name must be 1-50 characters".into()));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }

        if self.repos.users().find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".into()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let mut user = User::new(email, name, password_hash);
        user.phone = phone;
        let user = self.repos.users().insert(user).await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        self.repos.users().find_by_id(id).await
    }

    /// Page of users, newest first (admin surface)
    pub async fn list(&self, params: PaginationParams) -> DomainResult<PaginatedResult<User>> {
        let total = self.repos.users().count().await?;
        let items = self
            .repos
            .users()
            .find_page(params.offset(), params.limit as u64)
            .await?;
        Ok(PaginatedResult::new(items, total, params.page, params.limit))
    }

    /// Promote or demote a user's role (admin surface)
    pub async fn set_role(&self, id: i64, role: UserRole) -> DomainResult<User> {
        let Some(mut user) = self.repos.users().find_by_id(id).await? else {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        };
        user.role = role;
        self.repos.users().update(user.clone()).await?;
        Ok(user)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;

    fn service() -> IdentityService {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let jwt = JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "stayhub-test".into(),
        };
        IdentityService::new(repos, jwt)
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = service();
        let user = svc
            .register("alice@example.com", "Alice", "correct horse", None)
            .await
            .unwrap();
        assert!(user.id > 0);

        let auth = svc.login("alice@example.com", "correct horse").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.user.id, user.id);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = service();
        svc.register("alice@example.com", "Alice", "correct horse", None)
            .await
            .unwrap();
        let err = svc.login("alice@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let svc = service();
        svc.register("alice@example.com", "Alice", "correct horse", None)
            .await
            .unwrap();
        let err = svc
            .register("alice@example.com", "Alice B", "another pass", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let svc = service();
        let err = svc
            .register("bob@example.com", "Bob", "short", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
