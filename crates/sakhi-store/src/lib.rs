//! Sakhi Storage Layer
//!
//! Implements the `ContentStore` and `FeedbackStore` traits over SQLite.
//!
//! # Architecture
//!
//! - One row per record, keyed by the 16-byte UUIDv7 identifier
//! - The type-specific content body is stored as a JSON document; the
//!   verification state is split into its `result` and `notes` columns so
//!   the status index stays queryable
//! - A `UNIQUE (kind, title)` constraint backs the duplicate-key contract
//! - Single-row UPDATE statements provide the per-record atomicity the
//!   verification workflow relies on
//!
//! # Examples
//!
//! ```no_run
//! use sakhi_store::SqliteContentStore;
//!
//! let store = SqliteContentStore::new(":memory:").unwrap();
//! // Store is now ready for content operations
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension};
use sakhi_domain::traits::{ContentQuery, ContentStore, FeedbackStore, UpdateOutcome};
use sakhi_domain::{
    ContentBody, ContentDraft, ContentRecord, ContentStatus, FeedbackDraft, FeedbackRecord,
    RecordId, Verification,
};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Uniqueness constraint violated at creation
    #[error("Duplicate content title: {0}")]
    Duplicate(String),

    /// Stored data could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of `ContentStore` and `FeedbackStore`
///
/// # Thread Safety
///
/// The connection is guarded by a mutex so a single store instance can be
/// shared (behind an `Arc`) between request handlers and detached
/// verification tasks.
pub struct SqliteContentStore {
    conn: Mutex<Connection>,
}

impl SqliteContentStore {
    /// Open a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sakhi_store::SqliteContentStore;
    ///
    /// let store = SqliteContentStore::new("sakhi.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned mutex means a panic mid-statement; nothing sensible to
        // recover, so propagate the panic.
        self.conn.lock().expect("store connection mutex poisoned")
    }

    fn id_to_bytes(id: RecordId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_id(bytes: &[u8]) -> Result<RecordId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for RecordId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(RecordId::from_value(u128::from_be_bytes(arr)))
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn is_constraint_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }

    /// Decode one `contents` row into a record
    ///
    /// Column order: id, body, status, result, notes, created_by,
    /// created_at, updated_at
    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentRecord> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let body_json: String = row.get(1)?;
        let body: ContentBody = serde_json::from_str(&body_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let status_str: String = row.get(2)?;
        let status = ContentStatus::from_str(&status_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;

        let result_str: String = row.get(3)?;
        let notes: String = row.get(4)?;
        let verification = Verification::from_parts(&result_str, notes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;

        Ok(ContentRecord {
            id,
            body,
            status,
            verification,
            created_by: row.get(5)?,
            created_at: row.get::<_, i64>(6)? as u64,
            updated_at: row.get::<_, i64>(7)? as u64,
        })
    }

    fn select_record(
        conn: &Connection,
        id_bytes: &[u8],
    ) -> Result<Option<ContentRecord>, StoreError> {
        let record = conn
            .query_row(
                "SELECT id, body, status, result, notes, created_by, created_at, updated_at
                 FROM contents WHERE id = ?1",
                params![id_bytes],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }
}

impl ContentStore for SqliteContentStore {
    type Error = StoreError;

    fn create(&self, draft: ContentDraft) -> Result<ContentRecord, Self::Error> {
        let id = RecordId::new();
        let now = Self::now();
        let verification = Verification::pending();
        let status = verification.status();

        let body_json = serde_json::to_string(&draft.body)
            .map_err(|e| StoreError::InvalidData(format!("Body serialization failed: {}", e)))?;

        let insert = self.conn().execute(
            "INSERT INTO contents (id, kind, title, body, status, result, notes, created_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                Self::id_to_bytes(id),
                draft.body.kind().as_str(),
                draft.body.display_title(),
                body_json,
                status.as_str(),
                verification.result_str(),
                verification.notes(),
                draft.created_by,
                now as i64,
                now as i64,
            ],
        );

        match insert {
            Ok(_) => Ok(ContentRecord {
                id,
                body: draft.body,
                status,
                verification,
                created_by: draft.created_by,
                created_at: now,
                updated_at: now,
            }),
            Err(e) if Self::is_constraint_violation(&e) => {
                Err(StoreError::Duplicate(draft.body.display_title().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<ContentRecord>, Self::Error> {
        let conn = self.conn();
        Self::select_record(&conn, &Self::id_to_bytes(id))
    }

    fn apply_verdict(
        &self,
        id: RecordId,
        verification: Verification,
    ) -> Result<UpdateOutcome, Self::Error> {
        let id_bytes = Self::id_to_bytes(id);
        let conn = self.conn();

        // Status and result are written together in one statement so no
        // reader can observe a mismatched pair.
        let rows = conn.execute(
            "UPDATE contents SET status = ?1, result = ?2, notes = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                verification.status().as_str(),
                verification.result_str(),
                verification.notes(),
                Self::now() as i64,
                id_bytes,
            ],
        )?;

        if rows == 0 {
            return Ok(UpdateOutcome::NotFound);
        }

        match Self::select_record(&conn, &id_bytes)? {
            Some(record) => Ok(UpdateOutcome::Updated(record)),
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    fn set_status(
        &self,
        id: RecordId,
        status: ContentStatus,
    ) -> Result<UpdateOutcome, Self::Error> {
        let id_bytes = Self::id_to_bytes(id);
        let conn = self.conn();

        let rows = conn.execute(
            "UPDATE contents SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), Self::now() as i64, id_bytes],
        )?;

        if rows == 0 {
            return Ok(UpdateOutcome::NotFound);
        }

        match Self::select_record(&conn, &id_bytes)? {
            Some(record) => Ok(UpdateOutcome::Updated(record)),
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    fn delete_by_id(&self, id: RecordId) -> Result<bool, Self::Error> {
        let rows = self.conn().execute(
            "DELETE FROM contents WHERE id = ?1",
            params![Self::id_to_bytes(id)],
        )?;
        Ok(rows > 0)
    }

    fn query(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, Self::Error> {
        let mut sql = String::from(
            "SELECT id, body, status, result, notes, created_by, created_at, updated_at
             FROM contents WHERE 1=1",
        );
        let mut args: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(kind) = query.kind {
            sql.push_str(&format!(" AND kind = ?{}", args.len() + 1));
            args.push(Box::new(kind.as_str().to_string()));
        }
        if let Some(status) = query.status {
            sql.push_str(&format!(" AND status = ?{}", args.len() + 1));
            args.push(Box::new(status.as_str().to_string()));
        }
        if let Some(created_by) = &query.created_by {
            sql.push_str(&format!(" AND created_by = ?{}", args.len() + 1));
            args.push(Box::new(created_by.clone()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            args.iter().map(|a| a.as_ref()).collect();

        let records = stmt
            .query_map(params_ref.as_slice(), Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

impl FeedbackStore for SqliteContentStore {
    type Error = StoreError;

    fn create_feedback(&self, draft: FeedbackDraft) -> Result<FeedbackRecord, Self::Error> {
        let id = RecordId::new();
        let now = Self::now();

        self.conn().execute(
            "INSERT INTO feedback (id, subject, message, contact, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                Self::id_to_bytes(id),
                draft.subject,
                draft.message,
                draft.contact,
                now as i64,
            ],
        )?;

        Ok(FeedbackRecord {
            id,
            subject: draft.subject,
            message: draft.message,
            contact: draft.contact,
            created_at: now,
        })
    }

    fn list_feedback(&self) -> Result<Vec<FeedbackRecord>, Self::Error> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, subject, message, contact, created_at
             FROM feedback ORDER BY created_at DESC, id DESC",
        )?;

        let entries = stmt
            .query_map([], |row| {
                let id_bytes: Vec<u8> = row.get(0)?;
                let id = Self::bytes_to_id(&id_bytes).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Blob,
                        Box::new(e),
                    )
                })?;

                Ok(FeedbackRecord {
                    id,
                    subject: row.get(1)?,
                    message: row.get(2)?,
                    contact: row.get(3)?,
                    created_at: row.get::<_, i64>(4)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn delete_feedback(&self, id: RecordId) -> Result<bool, Self::Error> {
        let rows = self.conn().execute(
            "DELETE FROM feedback WHERE id = ?1",
            params![Self::id_to_bytes(id)],
        )?;
        Ok(rows > 0)
    }
}
