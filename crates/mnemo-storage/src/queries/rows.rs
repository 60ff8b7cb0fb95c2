//! Row decoding and column encoding shared by the query modules.

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::Row;

use mnemo_core::errors::{MnemoResult, StorageError};
use mnemo_core::graph::{Entity, Relationship};
use mnemo_core::Properties;

pub(crate) const ENTITY_COLUMNS: &str = "entity_id, type, name, properties, created_at, updated_at";

pub(crate) const RELATIONSHIP_COLUMNS: &str = "from_id, to_id, type, properties, created_at";

/// Entity row before JSON and timestamp decoding.
pub(crate) struct RawEntity {
    entity_id: String,
    entity_type: String,
    name: String,
    properties: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl RawEntity {
    /// Read the columns listed in [`ENTITY_COLUMNS`], starting at `offset`.
    pub(crate) fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            entity_id: row.get(offset)?,
            entity_type: row.get(offset + 1)?,
            name: row.get(offset + 2)?,
            properties: row.get(offset + 3)?,
            created_at: row.get(offset + 4)?,
            updated_at: row.get(offset + 5)?,
        })
    }

    pub(crate) fn decode(self) -> MnemoResult<Entity> {
        Ok(Entity {
            properties: decode_properties(self.properties.as_deref())?,
            created_at: decode_timestamp(self.created_at.as_deref())?,
            updated_at: decode_timestamp(self.updated_at.as_deref())?,
            entity_id: self.entity_id,
            entity_type: self.entity_type,
            name: self.name,
        })
    }
}

/// Relationship row before JSON and timestamp decoding.
pub(crate) struct RawRelationship {
    from_id: String,
    to_id: String,
    rel_type: String,
    properties: Option<String>,
    created_at: Option<String>,
}

impl RawRelationship {
    /// Read the columns listed in [`RELATIONSHIP_COLUMNS`], starting at `offset`.
    pub(crate) fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            from_id: row.get(offset)?,
            to_id: row.get(offset + 1)?,
            rel_type: row.get(offset + 2)?,
            properties: row.get(offset + 3)?,
            created_at: row.get(offset + 4)?,
        })
    }

    pub(crate) fn decode(self) -> MnemoResult<Relationship> {
        Ok(Relationship {
            properties: decode_properties(self.properties.as_deref())?,
            created_at: decode_timestamp(self.created_at.as_deref())?,
            from_id: self.from_id,
            to_id: self.to_id,
            rel_type: self.rel_type,
        })
    }
}

pub(crate) fn encode_properties(props: &Properties) -> MnemoResult<String> {
    Ok(serde_json::to_string(props)?)
}

/// NULL or empty text decodes to an empty map.
pub(crate) fn decode_properties(text: Option<&str>) -> MnemoResult<Properties> {
    match text {
        None => Ok(Properties::new()),
        Some(t) if t.trim().is_empty() => Ok(Properties::new()),
        Some(t) => serde_json::from_str(t).map_err(|e| {
            StorageError::InvalidData {
                column: "properties".to_string(),
                details: e.to_string(),
            }
            .into()
        }),
    }
}

pub(crate) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Accepts RFC 3339 and SQLite's `CURRENT_TIMESTAMP` form. NULL decodes
/// to the Unix epoch so legacy rows stay readable.
pub(crate) fn decode_timestamp(text: Option<&str>) -> MnemoResult<DateTime<Utc>> {
    let Some(text) = text else {
        return Ok(DateTime::<Utc>::UNIX_EPOCH);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            StorageError::InvalidData {
                column: "timestamp".to_string(),
                details: format!("{text}: {e}"),
            }
            .into()
        })
}

/// A timestamp strictly later than `previous`, normally "now".
pub(crate) fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if prev >= now => prev + Duration::microseconds(1),
        _ => now,
    }
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
