//! libSQL storage for extraction documents.
//!
//! The [`Storage`] struct wraps a local libSQL database holding one row per
//! stored [`ExtractedData`] document.
//!
//! **Access rules:**
//! - `brandscope extract --save` and `delete`: read-write via [`Storage::open`]
//! - `list`, `get`, `search`: read-only via [`Storage::open_readonly`]

mod migrations;

use std::path::Path;

use brandscope_shared::{BrandscopeError, ExtractedData, ExtractionId, ExtractionRecord, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{Connection, Database, params};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

const RECORD_COLUMNS: &str =
    "id, url, title, data_json, content_hash, created_at, updated_at";

/// Primary storage handle wrapping a libSQL database.
pub struct Storage {
    #[allow(dead_code)]
    db: Database,
    conn: Connection,
    readonly: bool,
}

fn storage_err(e: impl std::fmt::Display) -> BrandscopeError {
    BrandscopeError::Storage(e.to_string())
}

impl Storage {
    /// Open or create a database at `path` in read-write mode.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BrandscopeError::io(parent, e))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(storage_err)?;
        let conn = db.connect().map_err(storage_err)?;

        let storage = Self {
            db,
            conn,
            readonly: false,
        };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Open an existing database at `path` in read-only mode.
    pub async fn open_readonly(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BrandscopeError::Storage(format!(
                "database not found: {}",
                path.display()
            )));
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(storage_err)?;
        let conn = db.connect().map_err(storage_err)?;

        Ok(Self {
            db,
            conn,
            readonly: true,
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        let current_version = self.get_schema_version().await;

        for migration in migrations::all_migrations() {
            if migration.version > current_version {
                info!(
                    version = migration.version,
                    description = migration.description,
                    "applying migration"
                );
                self.conn.execute_batch(migration.sql).await.map_err(|e| {
                    BrandscopeError::Storage(format!(
                        "migration v{} failed: {e}",
                        migration.version
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Current schema version, or 0 before the first migration.
    async fn get_schema_version(&self) -> u32 {
        let result = self
            .conn
            .query("SELECT MAX(version) FROM schema_migrations", params![])
            .await;

        match result {
            Ok(mut rows) => match rows.next().await {
                Ok(Some(row)) => row.get::<u32>(0).unwrap_or(0),
                _ => 0,
            },
            Err(_) => 0,
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.readonly {
            return Err(BrandscopeError::Storage(
                "database is opened in read-only mode".into(),
            ));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Extraction records
    // -----------------------------------------------------------------------

    /// Store a document under a fresh id.
    pub async fn store(&self, data: &ExtractedData) -> Result<ExtractionRecord> {
        self.check_writable()?;

        let data_json = serde_json::to_string(data)
            .map_err(|e| BrandscopeError::Storage(format!("serialize document: {e}")))?;
        let content_hash = compute_hash(&data_json);
        let id = ExtractionId::new();
        let now = Utc::now();
        let stamp = format_timestamp(&now);

        self.conn
            .execute(
                "INSERT INTO extractions
                   (id, url, title, description, data_json, content_hash, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    id.to_string(),
                    data.url.as_str(),
                    data.title.as_str(),
                    data.description.as_str(),
                    data_json.as_str(),
                    content_hash.as_str(),
                    stamp.as_str(),
                    stamp.as_str()
                ],
            )
            .await
            .map_err(storage_err)?;

        info!(id = %id, url = %data.url, "stored extraction");
        Ok(ExtractionRecord {
            id,
            url: data.url.clone(),
            title: data.title.clone(),
            data: data.clone(),
            content_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// All stored extractions, newest first.
    pub async fn list(&self) -> Result<Vec<ExtractionRecord>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM extractions ORDER BY created_at DESC, id DESC"
        );
        let mut rows = self.conn.query(&sql, params![]).await.map_err(storage_err)?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await.map_err(storage_err)? {
            results.push(row_to_record(&row)?);
        }
        Ok(results)
    }

    /// Look up one extraction.
    pub async fn get_by_id(&self, id: &ExtractionId) -> Result<Option<ExtractionRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM extractions WHERE id = ?1");
        let mut rows = self
            .conn
            .query(&sql, params![id.to_string()])
            .await
            .map_err(storage_err)?;

        match rows.next().await.map_err(storage_err)? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete one extraction. Returns whether a row was removed.
    pub async fn delete(&self, id: &ExtractionId) -> Result<bool> {
        self.check_writable()?;
        let affected = self
            .conn
            .execute("DELETE FROM extractions WHERE id = ?1", params![id.to_string()])
            .await
            .map_err(storage_err)?;
        debug!(id = %id, affected, "delete extraction");
        Ok(affected > 0)
    }

    /// Case-insensitive substring match over url, title, and description,
    /// newest first.
    pub async fn search(&self, term: &str) -> Result<Vec<ExtractionRecord>> {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM extractions
             WHERE LOWER(url) LIKE ?1 ESCAPE '\\'
                OR LOWER(title) LIKE ?1 ESCAPE '\\'
                OR LOWER(description) LIKE ?1 ESCAPE '\\'
             ORDER BY created_at DESC, id DESC"
        );
        let mut rows = self
            .conn
            .query(&sql, params![pattern])
            .await
            .map_err(storage_err)?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await.map_err(storage_err)? {
            results.push(row_to_record(&row)?);
        }
        debug!(term, matches = results.len(), "search extractions");
        Ok(results)
    }
}

/// SHA-256 of `content`, lowercase hex.
fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fixed-width RFC 3339 so stored timestamps sort lexicographically.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| BrandscopeError::Storage(format!("invalid date: {e}")))
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn row_to_record(row: &libsql::Row) -> Result<ExtractionRecord> {
    let id: String = row.get(0).map_err(storage_err)?;
    let data_json: String = row.get(3).map_err(storage_err)?;
    let created_at: String = row.get(5).map_err(storage_err)?;
    let updated_at: String = row.get(6).map_err(storage_err)?;

    Ok(ExtractionRecord {
        id: id
            .parse()
            .map_err(|e| BrandscopeError::Storage(format!("invalid id `{id}`: {e}")))?,
        url: row.get(1).map_err(storage_err)?,
        title: row.get(2).map_err(storage_err)?,
        data: serde_json::from_str(&data_json)
            .map_err(|e| BrandscopeError::Storage(format!("corrupt document: {e}")))?,
        content_hash: row.get(4).map_err(storage_err)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
