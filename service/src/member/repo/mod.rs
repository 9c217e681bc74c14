//! Repository layer for member persistence
//!
//! A single [`MemberRepo`] trait with two interchangeable implementations:
//! [`PgMemberRepo`] over the `members` table and [`InMemoryMemberRepo`]
//! over a lock-guarded map. Exactly one backs a running process.

pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

use async_trait::async_trait;

use super::model::Member;

pub use memory::InMemoryMemberRepo;
pub use postgres::{
    create_member, delete_member, get_member, list_members, update_member, PgMemberRepo,
};

/// Error types for member operations
#[derive(Debug, thiserror::Error)]
pub enum MemberRepoError {
    #[error("member not found")]
    NotFound,
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// Storage for member records.
///
/// Updates are full overwrites: every field is replaced, and the stored
/// record is keyed by the `id` argument rather than the body's id.
#[async_trait]
pub trait MemberRepo: Send + Sync {
    /// Fetch one member by id.
    async fn get(&self, id: &str) -> Result<Member, MemberRepoError>;

    /// Fetch every stored member. Order is backend-defined.
    async fn list(&self) -> Result<Vec<Member>, MemberRepoError>;

    /// Store a new member keyed by its own id.
    async fn create(&self, member: &Member) -> Result<Member, MemberRepoError>;

    /// Overwrite an existing member. Returns `NotFound` if `id` is absent.
    async fn update(&self, id: &str, member: &Member) -> Result<Member, MemberRepoError>;

    /// Remove a member. Returns `NotFound` if `id` is absent.
    async fn delete(&self, id: &str) -> Result<(), MemberRepoError>;
}
