//! In-memory member repository
//!
//! Process-local and lost on restart. The map sits behind an async
//! `RwLock` so concurrent handlers can share one instance.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MemberRepo, MemberRepoError};
use crate::member::model::Member;

/// Map-backed implementation of [`MemberRepo`].
#[derive(Default)]
pub struct InMemoryMemberRepo {
    members: RwLock<HashMap<String, Member>>,
}

impl InMemoryMemberRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored members.
    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}

#[async_trait]
impl MemberRepo for InMemoryMemberRepo {
    async fn get(&self, id: &str) -> Result<Member, MemberRepoError> {
        self.members
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(MemberRepoError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Member>, MemberRepoError> {
        Ok(self.members.read().await.values().cloned().collect())
    }

    async fn create(&self, member: &Member) -> Result<Member, MemberRepoError> {
        // Existing ids are overwritten silently.
        self.members
            .write()
            .await
            .insert(member.id.clone(), member.clone());
        Ok(member.clone())
    }

    async fn update(&self, id: &str, member: &Member) -> Result<Member, MemberRepoError> {
        let mut members = self.members.write().await;
        let slot = members.get_mut(id).ok_or(MemberRepoError::NotFound)?;
        *slot = member.clone().with_id(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), MemberRepoError> {
        self.members
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(MemberRepoError::NotFound)
    }
}
