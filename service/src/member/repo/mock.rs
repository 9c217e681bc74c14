//! Mock member repo for handler tests.
//!
//! Every operation fails with a database error, which exercises the
//! plain-text 500 path without a running `PostgreSQL`.

use async_trait::async_trait;

use super::{MemberRepo, MemberRepoError};
use crate::member::model::Member;

/// Repo whose backing database is always unreachable.
#[derive(Debug, Default)]
pub struct UnavailableMemberRepo;

impl UnavailableMemberRepo {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn unavailable() -> MemberRepoError {
    MemberRepoError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl MemberRepo for UnavailableMemberRepo {
    async fn get(&self, _id: &str) -> Result<Member, MemberRepoError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<Member>, MemberRepoError> {
        Err(unavailable())
    }

    async fn create(&self, _member: &Member) -> Result<Member, MemberRepoError> {
        Err(unavailable())
    }

    async fn update(&self, _id: &str, _member: &Member) -> Result<Member, MemberRepoError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: &str) -> Result<(), MemberRepoError> {
        Err(unavailable())
    }
}
