//! Generic JSON document collections over the SQLite store.
//!
//! # Responsibility
//! - Persist serde-serializable records as JSON bodies grouped by collection.
//! - Assign document ids on insert and re-attach them on read.
//! - Provide exact-match lookups on top-level fields.
//!
//! # Invariants
//! - Every stored document id is unique within its collection.
//! - The id is never part of the stored JSON body.
//! - Lookups that return one document pick the earliest inserted match.
//! - Persisted bodies that fail to decode surface as `InvalidData`.

use crate::db::DbError;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, Params, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use uuid::Uuid;

const ID_FIELD: &str = "id";

const DOCUMENT_SELECT_SQL: &str = "SELECT id, body FROM documents WHERE collection = ?1";

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidCollection(String),
    InvalidField(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "document serialization failed: {err}"),
            Self::InvalidCollection(name) => write!(f, "invalid collection name `{name}`"),
            Self::InvalidField(name) => write!(f, "invalid document field name `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted document: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidCollection(_) | Self::InvalidField(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// A record that can live in a document collection.
pub trait Document: Serialize + DeserializeOwned + Clone {
    /// Collection name used when no override is given.
    const COLLECTION: &'static str;

    /// Store-assigned id, if any.
    fn id(&self) -> Option<Uuid>;

    /// Returns the record carrying `id`.
    fn with_id(self, id: Uuid) -> Self;
}

/// Typed view over one collection of the document store.
pub struct DocumentCollection<'conn, D> {
    conn: &'conn Connection,
    name: String,
    _marker: PhantomData<fn() -> D>,
}

impl<'conn, D: Document> DocumentCollection<'conn, D> {
    /// Opens the collection named after the record type.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            name: D::COLLECTION.to_string(),
            _marker: PhantomData,
        }
    }

    /// Opens a collection under an explicit name.
    ///
    /// # Errors
    /// - Returns `InvalidCollection` when `name` is not a plain identifier.
    pub fn with_name(conn: &'conn Connection, name: impl Into<String>) -> RepoResult<Self> {
        let name = name.into();
        if !IDENTIFIER_RE.is_match(&name) {
            return Err(RepoError::InvalidCollection(name));
        }
        Ok(Self {
            conn,
            name,
            _marker: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores `document` under a freshly generated id.
    ///
    /// Any id already carried by `document` is ignored; every call creates
    /// a new document.
    pub fn insert(&self, document: &D) -> RepoResult<D> {
        let id = Uuid::new_v4();
        let body = encode_body(document)?;

        self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
            params![self.name, id.to_string(), body],
        )?;

        debug!(
            "event=document_insert module=repo status=ok collection={} id={}",
            self.name, id
        );
        Ok(document.clone().with_id(id))
    }

    /// Removes every document of this collection and returns how many were removed.
    pub fn delete_all(&self) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1;",
            [self.name.as_str()],
        )?;

        debug!(
            "event=document_delete_all module=repo status=ok collection={} removed={}",
            self.name, removed
        );
        Ok(removed)
    }

    /// Returns every document of this collection.
    pub fn find_all(&self) -> RepoResult<Vec<D>> {
        self.query_documents(
            &format!("{DOCUMENT_SELECT_SQL} ORDER BY seq ASC;"),
            [self.name.as_str()],
        )
    }

    pub fn find_by_id(&self, id: Uuid) -> RepoResult<Option<D>> {
        let mut documents = self.query_documents(
            &format!("{DOCUMENT_SELECT_SQL} AND id = ?2;"),
            params![self.name, id.to_string()],
        )?;
        Ok(documents.pop())
    }

    pub fn count(&self) -> RepoResult<u64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1;",
            [self.name.as_str()],
            |row| row.get::<_, i64>(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative document count {count}")))
    }

    /// Returns the earliest inserted document whose `field` equals `value`.
    ///
    /// # Errors
    /// - Returns `InvalidField` when `field` is not a plain identifier.
    pub fn find_one_by_field(&self, field: &str, value: &str) -> RepoResult<Option<D>> {
        let path = field_path(field)?;
        let mut documents = self.query_documents(
            &format!(
                "{DOCUMENT_SELECT_SQL}
                   AND json_extract(body, ?2) = ?3
                 ORDER BY seq ASC
                 LIMIT 1;"
            ),
            params![self.name, path, value],
        )?;
        Ok(documents.pop())
    }

    /// Returns all documents whose `field` equals `value`.
    ///
    /// # Errors
    /// - Returns `InvalidField` when `field` is not a plain identifier.
    pub fn find_many_by_field(&self, field: &str, value: &str) -> RepoResult<Vec<D>> {
        let path = field_path(field)?;
        self.query_documents(
            &format!(
                "{DOCUMENT_SELECT_SQL}
                   AND json_extract(body, ?2) = ?3
                 ORDER BY seq ASC;"
            ),
            params![self.name, path, value],
        )
    }

    fn query_documents(&self, sql: &str, params: impl Params) -> RepoResult<Vec<D>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            documents.push(self.parse_document_row(row)?);
        }

        Ok(documents)
    }

    fn parse_document_row(&self, row: &Row<'_>) -> RepoResult<D> {
        let id_text: String = row.get("id")?;
        let id = Uuid::parse_str(&id_text).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid id `{id_text}` in collection `{}`",
                self.name
            ))
        })?;

        let body: String = row.get("body")?;
        let document = serde_json::from_str::<D>(&body).map_err(|err| {
            RepoError::InvalidData(format!(
                "document `{id}` in collection `{}` does not decode: {err}",
                self.name
            ))
        })?;

        Ok(document.with_id(id))
    }
}

fn field_path(field: &str) -> RepoResult<String> {
    if !IDENTIFIER_RE.is_match(field) {
        return Err(RepoError::InvalidField(field.to_string()));
    }
    Ok(format!("$.{field}"))
}

fn encode_body<D: Serialize>(document: &D) -> RepoResult<String> {
    let mut value = serde_json::to_value(document)?;
    match value {
        Value::Object(ref mut fields) => {
            fields.remove(ID_FIELD);
        }
        _ => {
            return Err(RepoError::InvalidData(
                "document must serialize to a JSON object".to_string(),
            ));
        }
    }
    Ok(serde_json::to_string(&value)?)
}

#[cfg(test)]
mod tests {
    use super::{encode_body, field_path, RepoError};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        id: Option<u32>,
        name: &'static str,
    }

    #[test]
    fn field_path_accepts_identifiers() {
        assert_eq!(field_path("firstName").unwrap(), "$.firstName");
        assert_eq!(field_path("_private1").unwrap(), "$._private1");
    }

    #[test]
    fn field_path_rejects_json_path_syntax() {
        for field in ["", "a.b", "a[0]", "1abc", "name') OR 1=1 --"] {
            match field_path(field) {
                Err(RepoError::InvalidField(name)) => assert_eq!(name, field),
                other => panic!("expected InvalidField for `{field}`, got {other:?}"),
            }
        }
    }

    #[test]
    fn encode_body_strips_id() {
        let body = encode_body(&Sample {
            id: Some(7),
            name: "x",
        })
        .unwrap();
        assert_eq!(body, r#"{"name":"x"}"#);
    }

    #[test]
    fn encode_body_rejects_non_objects() {
        let err = encode_body(&"plain string").unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }
}
