//! HTTP handlers for member CRUD

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::model::Member;
use super::repo::{MemberRepo, MemberRepoError};
use crate::rest::{messages, EmptyEnvelope, Envelope, MemberEnvelope, MemberListEnvelope};

pub const MEMBERS_PATH: &str = "/api/v1/members";
pub const MEMBER_ITEM_PATH: &str = "/api/v1/members/{id}";

/// Handler failure, rendered either through the envelope or as plain text.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Repo(#[from] MemberRepoError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Decode(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            Self::Repo(MemberRepoError::NotFound) => {
                Envelope::<Member>::new(StatusCode::NOT_FOUND, messages::MEMBER_NOT_FOUND, None)
                    .into_response()
            }
            Self::Repo(MemberRepoError::Database(db_err)) => {
                tracing::error!("member store failure: {db_err}");
                (StatusCode::INTERNAL_SERVER_ERROR, db_err.to_string()).into_response()
            }
        }
    }
}

type MemberResult<T> = Result<Envelope<T>, ApiError>;

/// Create member router
pub fn router() -> Router {
    Router::new()
        .route(MEMBERS_PATH, get(list_members).post(create_member))
        .route(
            MEMBER_ITEM_PATH,
            get(get_member).put(update_member).delete(delete_member),
        )
}

/// Get one member
///
/// # Errors
///
/// 404 envelope when the id is unknown; 500 plain text on store failures.
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = String, Path, description = "Member identifier")),
    responses(
        (status = 200, description = "Member found", body = MemberEnvelope),
        (status = 404, description = "No member with this id", body = EmptyEnvelope),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn get_member(
    Extension(repo): Extension<Arc<dyn MemberRepo>>,
    Path(id): Path<String>,
) -> MemberResult<Member> {
    let member = repo.get(&id).await?;
    Ok(Envelope::new(StatusCode::OK, messages::SUCCESS_OK, Some(member)))
}

/// List all members
///
/// # Errors
///
/// 500 plain text on store failures.
#[utoipa::path(
    get,
    path = "/members",
    tag = "Members",
    responses(
        (status = 200, description = "Every stored member", body = MemberListEnvelope),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn list_members(
    Extension(repo): Extension<Arc<dyn MemberRepo>>,
) -> MemberResult<Vec<Member>> {
    let members = repo.list().await?;
    Ok(Envelope::new(StatusCode::OK, messages::SUCCESS_OK, Some(members)))
}

/// Create a member
///
/// # Errors
///
/// 400 plain text when the body does not decode; 500 plain text on store
/// failures, including a duplicate id in `PostgreSQL`.
#[utoipa::path(
    post,
    path = "/members",
    tag = "Members",
    request_body = Member,
    responses(
        (status = 201, description = "Member stored", body = MemberEnvelope),
        (status = 400, description = "Body is not a member", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn create_member(
    Extension(repo): Extension<Arc<dyn MemberRepo>>,
    body: Bytes,
) -> MemberResult<Member> {
    let member = Member::from_json(&body)?;
    let created = repo.create(&member).await?;
    tracing::debug!(member_id = %created.id, "member created");
    Ok(Envelope::new(
        StatusCode::CREATED,
        messages::MEMBER_CREATED,
        Some(created),
    ))
}

/// Replace a member
///
/// Every field is overwritten; the path id wins over any id in the body.
///
/// # Errors
///
/// 400 plain text when the body does not decode; 404 envelope when the id is
/// unknown; 500 plain text on store failures.
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = String, Path, description = "Member identifier")),
    request_body = Member,
    responses(
        (status = 200, description = "Member replaced", body = MemberEnvelope),
        (status = 400, description = "Body is not a member", body = String, content_type = "text/plain"),
        (status = 404, description = "No member with this id", body = EmptyEnvelope),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn update_member(
    Extension(repo): Extension<Arc<dyn MemberRepo>>,
    Path(id): Path<String>,
    body: Bytes,
) -> MemberResult<Member> {
    let member = Member::from_json(&body)?;
    let updated = repo.update(&id, &member).await?;
    tracing::debug!(member_id = %id, "member updated");
    Ok(Envelope::new(StatusCode::OK, messages::MEMBER_UPDATED, Some(updated)))
}

/// Delete a member
///
/// # Errors
///
/// 404 envelope when the id is unknown; 500 plain text on store failures.
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = String, Path, description = "Member identifier")),
    responses(
        (status = 200, description = "Member deleted", body = EmptyEnvelope),
        (status = 404, description = "No member with this id", body = EmptyEnvelope),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_member(
    Extension(repo): Extension<Arc<dyn MemberRepo>>,
    Path(id): Path<String>,
) -> MemberResult<Member> {
    repo.delete(&id).await?;
    tracing::debug!(member_id = %id, "member deleted");
    Ok(Envelope::new(StatusCode::OK, messages::MEMBER_DELETED, None))
}
