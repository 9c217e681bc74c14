//! Member record as it travels over the wire and into storage.

use std::fmt;

use serde::{
    de::{self, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use utoipa::ToSchema;

/// A registered member.
///
/// Every field is optional on input: anything missing from the JSON body
/// decodes to its zero value. Keys match field names without regard to case,
/// so `id`, `Id` and `ID` all set [`Member::id`]. Timestamps are
/// caller-supplied and never stamped by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(default)]
pub struct Member {
    /// Caller-supplied identifier, used as the primary key.
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub gender: String,
    pub birth_place: String,
    pub birth_date: i64,
    pub phone: i64,
    /// Village or ward.
    pub kelurahan: String,
    /// District.
    pub kecamatan: String,
    pub job: String,
    /// Neighborhood unit number.
    pub rt: i64,
    /// Community unit number.
    pub rw: i64,
    pub address: String,
    pub status: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Member {
    /// Decode a member from a raw request body.
    ///
    /// Only the first JSON value is read; anything after it is ignored. A
    /// literal `null` decodes to the zero-valued member.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is empty or its first
    /// value is not a JSON object of this shape.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<Self>>();
        match values.next() {
            Some(value) => Ok(value?.unwrap_or_default()),
            None => Err(de::Error::custom("EOF")),
        }
    }

    /// Same record, keyed by `id`.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        id.clone_into(&mut self.id);
        self
    }
}

/// Overwrite `slot` with the next value unless that value is `null`.
fn assign<'de, A, T>(map: &mut A, slot: &mut T) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    if let Some(value) = map.next_value::<Option<T>>()? {
        *slot = value;
    }
    Ok(())
}

struct MemberVisitor;

impl<'de> Visitor<'de> for MemberVisitor {
    type Value = Member;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a member object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Member, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut member = Member::default();
        // Repeated keys overwrite earlier ones; unknown keys are skipped.
        while let Some(key) = map.next_key::<String>()? {
            match key.to_lowercase().as_str() {
                "id" => assign(&mut map, &mut member.id)?,
                "name" => assign(&mut map, &mut member.name)?,
                "gender" => assign(&mut map, &mut member.gender)?,
                "birth_place" => assign(&mut map, &mut member.birth_place)?,
                "birth_date" => assign(&mut map, &mut member.birth_date)?,
                "phone" => assign(&mut map, &mut member.phone)?,
                "kelurahan" => assign(&mut map, &mut member.kelurahan)?,
                "kecamatan" => assign(&mut map, &mut member.kecamatan)?,
                "job" => assign(&mut map, &mut member.job)?,
                "rt" => assign(&mut map, &mut member.rt)?,
                "rw" => assign(&mut map, &mut member.rw)?,
                "address" => assign(&mut map, &mut member.address)?,
                "status" => assign(&mut map, &mut member.status)?,
                "created_at" => assign(&mut map, &mut member.created_at)?,
                "updated_at" => assign(&mut map, &mut member.updated_at)?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(member)
    }
}

impl<'de> Deserialize<'de> for Member {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MemberVisitor)
    }
}
