//! Member records: model, storage, and HTTP handlers.

pub mod http;
pub mod model;
pub mod repo;

pub use model::Member;
pub use repo::{InMemoryMemberRepo, MemberRepo, MemberRepoError, PgMemberRepo};
