//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned ID
    async fn insert(&self, user: User) -> DomainResult<User>;

    /// Update an existing user
    async fn update(&self, user: User) -> DomainResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;

    /// Find user by email (the login identifier)
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Page of users, newest first
    async fn find_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<User>>;

    /// Total number of users
    async fn count(&self) -> DomainResult<u64>;
}
