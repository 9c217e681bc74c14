//! Response envelope and `OpenAPI` documentation.
//!
//! Every domain outcome is wrapped as `{code, message, data}`. Decode and
//! infrastructure failures are written as plain text instead, which keeps
//! existing clients working.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::member::{self, Member};

/// Machine-readable message tokens carried in [`Envelope::message`].
pub mod messages {
    pub const SUCCESS_OK: &str = "success_ok";
    pub const MEMBER_CREATED: &str = "member_created";
    pub const MEMBER_UPDATED: &str = "member_updated";
    pub const MEMBER_DELETED: &str = "member_deleted";
    pub const MEMBER_NOT_FOUND: &str = "member_not_found";
}

/// Uniform JSON wrapper. The HTTP status always equals `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn new(status: StatusCode, message: &str, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.to_string(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Envelope carrying one member.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberEnvelope {
    /// HTTP status code
    pub code: u16,
    /// Message token
    pub message: String,
    pub data: Member,
}

/// Envelope carrying every stored member.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberListEnvelope {
    /// HTTP status code
    pub code: u16,
    /// Message token
    pub message: String,
    pub data: Vec<Member>,
}

/// Envelope whose `data` is always `null`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyEnvelope {
    /// HTTP status code
    pub code: u16,
    /// Message token, e.g. `member_not_found` or `member_deleted`
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Members API",
        version = "1.0.0",
        description = "CRUD over member records",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "REST API v1")
    ),
    paths(
        member::http::get_member,
        member::http::list_members,
        member::http::create_member,
        member::http::update_member,
        member::http::delete_member,
    ),
    components(schemas(Member, MemberEnvelope, MemberListEnvelope, EmptyEnvelope)),
    tags(
        (name = "Members", description = "Member records")
    )
)]
pub struct ApiDoc;
