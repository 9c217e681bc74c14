//! `PostgreSQL` member repository

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::{MemberRepo, MemberRepoError};
use crate::member::model::Member;

fn map_member_row(row: &PgRow) -> Result<Member, sqlx::Error> {
    Ok(Member {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        gender: row.try_get("gender")?,
        birth_place: row.try_get("birth_place")?,
        birth_date: row.try_get("birth_date")?,
        phone: row.try_get("phone")?,
        kelurahan: row.try_get("kelurahan")?,
        kecamatan: row.try_get("kecamatan")?,
        job: row.try_get("job")?,
        rt: row.try_get("rt")?,
        rw: row.try_get("rw")?,
        address: row.try_get("address")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Get a member by id.
///
/// # Errors
///
/// Returns `MemberRepoError::NotFound` if no row matches.
/// Returns `MemberRepoError::Database` on query or decode failures.
pub async fn get_member<'e, E>(executor: E, id: &str) -> Result<Member, MemberRepoError>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let row = sqlx::query(
        r"
        SELECT id, name, gender, birth_place, birth_date, phone, kelurahan, kecamatan,
               job, rt, rw, address, status, created_at, updated_at
        FROM members
        WHERE id = $1
        ",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or(MemberRepoError::NotFound)?;

    Ok(map_member_row(&row)?)
}

/// List every member in table order.
///
/// # Errors
///
/// Returns `MemberRepoError::Database` on query or decode failures.
pub async fn list_members<'e, E>(executor: E) -> Result<Vec<Member>, MemberRepoError>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let rows = sqlx::query(
        r"
        SELECT id, name, gender, birth_place, birth_date, phone, kelurahan, kecamatan,
               job, rt, rw, address, status, created_at, updated_at
        FROM members
        ",
    )
    .fetch_all(executor)
    .await?;

    rows.iter()
        .map(|row| map_member_row(row).map_err(MemberRepoError::from))
        .collect()
}

/// Insert a new member row.
///
/// A duplicate id surfaces as the raw unique-violation error.
///
/// # Errors
///
/// Returns `MemberRepoError::Database` on insert failures.
pub async fn create_member<'e, E>(executor: E, member: &Member) -> Result<Member, MemberRepoError>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    sqlx::query(
        r"
        INSERT INTO members (id, name, gender, birth_place, birth_date, phone, kelurahan,
                             kecamatan, job, rt, rw, address, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        ",
    )
    .bind(&member.id)
    .bind(&member.name)
    .bind(&member.gender)
    .bind(&member.birth_place)
    .bind(member.birth_date)
    .bind(member.phone)
    .bind(&member.kelurahan)
    .bind(&member.kecamatan)
    .bind(&member.job)
    .bind(member.rt)
    .bind(member.rw)
    .bind(&member.address)
    .bind(member.status)
    .bind(member.created_at)
    .bind(member.updated_at)
    .execute(executor)
    .await?;

    Ok(member.clone())
}

/// Overwrite every column of the row keyed by `id`.
///
/// The update runs unconditionally; a zero row count is the only signal
/// that the member did not exist. The returned member carries `id`, not the
/// body's `ID`, so the response matches the stored row and the in-memory
/// store. Older clients of the relational service saw the body's `ID` echoed
/// back instead.
///
/// # Errors
///
/// Returns `MemberRepoError::NotFound` if no row was updated.
/// Returns `MemberRepoError::Database` on update failures.
pub async fn update_member<'e, E>(
    executor: E,
    id: &str,
    member: &Member,
) -> Result<Member, MemberRepoError>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let result = sqlx::query(
        r"
        UPDATE members
        SET name = $1, gender = $2, birth_place = $3, birth_date = $4, phone = $5,
            kelurahan = $6, kecamatan = $7, job = $8, rt = $9, rw = $10, address = $11,
            status = $12, created_at = $13, updated_at = $14
        WHERE id = $15
        ",
    )
    .bind(&member.name)
    .bind(&member.gender)
    .bind(&member.birth_place)
    .bind(member.birth_date)
    .bind(member.phone)
    .bind(&member.kelurahan)
    .bind(&member.kecamatan)
    .bind(&member.job)
    .bind(member.rt)
    .bind(member.rw)
    .bind(&member.address)
    .bind(member.status)
    .bind(member.created_at)
    .bind(member.updated_at)
    .bind(id)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(MemberRepoError::NotFound);
    }

    Ok(member.clone().with_id(id))
}

/// Delete the row keyed by `id`.
///
/// # Errors
///
/// Returns `MemberRepoError::NotFound` if no row was deleted.
/// Returns `MemberRepoError::Database` on delete failures.
pub async fn delete_member<'e, E>(executor: E, id: &str) -> Result<(), MemberRepoError>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let result = sqlx::query("DELETE FROM members WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MemberRepoError::NotFound);
    }

    Ok(())
}

/// `PostgreSQL` implementation of [`MemberRepo`].
pub struct PgMemberRepo {
    pool: PgPool,
}

impl PgMemberRepo {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepo for PgMemberRepo {
    async fn get(&self, id: &str) -> Result<Member, MemberRepoError> {
        get_member(&self.pool, id).await
    }

    async fn list(&self) -> Result<Vec<Member>, MemberRepoError> {
        list_members(&self.pool).await
    }

    async fn create(&self, member: &Member) -> Result<Member, MemberRepoError> {
        create_member(&self.pool, member).await
    }

    async fn update(&self, id: &str, member: &Member) -> Result<Member, MemberRepoError> {
        update_member(&self.pool, id, member).await
    }

    async fn delete(&self, id: &str) -> Result<(), MemberRepoError> {
        delete_member(&self.pool, id).await
    }
}
