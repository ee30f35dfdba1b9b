//! SQLite-based index implementation.

use async_trait::async_trait;
use corpfind_core::{CompanyRecord, CompanyStore, CorpCode, CorpError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, instrument};

/// Listed-company predicate in SQL: trimmed ticker is exactly 6 digits.
const LISTED_PREDICATE: &str = "LENGTH(TRIM(stock_code)) = 6 \
     AND TRIM(stock_code) GLOB '[0-9][0-9][0-9][0-9][0-9][0-9]'";

/// SQLite-backed company index.
///
/// Stores the full record set in a single database file that survives
/// process restarts. SQLite's native multi-reader/single-writer semantics
/// handle concurrent searches; all mutation goes through
/// [`rebuild`](CompanyStore::rebuild).
#[derive(Debug)]
pub struct SqliteIndex {
    conn: Mutex<Connection>,
}

impl SqliteIndex {
    /// Opens (or creates) the index at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation
    /// fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| CorpError::Storage(e.to_string()))?;
        let index = Self {
            conn: Mutex::new(conn),
        };
        index.init_schema()?;
        Ok(index)
    }

    /// Creates an in-memory index.
    ///
    /// Useful for testing; data is lost when the index is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| CorpError::Storage(e.to_string()))?;
        let index = Self {
            conn: Mutex::new(conn),
        };
        index.init_schema()?;
        Ok(index)
    }

    /// Creates the table and its two supporting indexes, idempotently.
    fn init_schema(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS companies (
                corp_code TEXT PRIMARY KEY,
                corp_name TEXT NOT NULL,
                stock_code TEXT,
                modify_date TEXT,
                corp_name_lower TEXT
            )",
            [],
        )
        .map_err(|e| CorpError::Storage(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_corp_name
             ON companies(corp_name_lower)",
            [],
        )
        .map_err(|e| CorpError::Storage(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_stock_code
             ON companies(stock_code)",
            [],
        )
        .map_err(|e| CorpError::Storage(e.to_string()))?;

        debug!("SQLite index schema initialized");
        Ok(())
    }

    fn count_where(&self, predicate: &str) -> Result<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        let sql = format!("SELECT COUNT(*) FROM companies WHERE {predicate}");
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        Ok(count as usize)
    }
}

/// Escapes LIKE metacharacters so a fragment matches as a literal substring.
fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl CompanyStore for SqliteIndex {
    #[instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<()> {
        self.init_schema()
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn rebuild(&self, records: &[CompanyRecord]) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CorpError::Storage(e.to_string()))?;
        // One transaction for delete + insert: readers never see the table
        // partially emptied.
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        tx.execute("DELETE FROM companies", [])
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO companies
                     (corp_code, corp_name, stock_code, modify_date, corp_name_lower)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(|e| CorpError::Storage(e.to_string()))?;

            for record in records {
                stmt.execute(params![
                    record.corp_code.as_str(),
                    record.corp_name,
                    record.stock_code,
                    record.modify_date,
                    record.name_lower(),
                ])
                .map_err(|e| CorpError::Storage(e.to_string()))?;
            }
        }

        tx.commit().map_err(|e| CorpError::Storage(e.to_string()))?;
        debug!("Rebuilt index with {} records", records.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search_substring(&self, fragment: &str, limit: usize) -> Result<Vec<CompanyRecord>> {
        let pattern = format!("%{}%", escape_like(fragment));

        let conn = self
            .conn
            .lock()
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        let sql = format!(
            "SELECT corp_code, corp_name, TRIM(stock_code) AS stock_code, modify_date
             FROM companies
             WHERE corp_name_lower LIKE ?1 ESCAPE '\\'
             AND {LISTED_PREDICATE}
             ORDER BY corp_name ASC, corp_code ASC
             LIMIT ?2"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        let rows = stmt
            .query_map(params![pattern, limit as i64], |row| {
                Ok(CompanyRecord {
                    corp_code: CorpCode::new(row.get::<_, String>(0)?),
                    corp_name: row.get(1)?,
                    stock_code: row.get(2)?,
                    modify_date: row.get(3)?,
                })
            })
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| CorpError::Storage(e.to_string()))?);
        }

        debug!("Found {} matching records", records.len());
        Ok(records)
    }

    #[instrument(skip(self), fields(corp_code = %corp_code))]
    async fn get(&self, corp_code: &CorpCode) -> Result<Option<CompanyRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        let record = conn
            .query_row(
                "SELECT corp_code, corp_name, stock_code, modify_date
                 FROM companies
                 WHERE corp_code = ?1",
                params![corp_code.as_str()],
                |row| {
                    Ok(CompanyRecord {
                        corp_code: CorpCode::new(row.get::<_, String>(0)?),
                        corp_name: row.get(1)?,
                        stock_code: row.get(2)?,
                        modify_date: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(|e| CorpError::Storage(e.to_string()))?;

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> Result<usize> {
        self.count_where("1 = 1")
    }

    #[instrument(skip(self))]
    async fn count_listed(&self) -> Result<usize> {
        self.count_where(LISTED_PREDICATE)
    }
}
