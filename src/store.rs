// src/store.rs
//! Persistent submission store backed by SQLite.
//!
//! One row per `(owner, lab)`: the encoded tree used for comparison and the
//! raw source kept for review.

use crate::error::{Error, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database file and ensures the schema exists.
    ///
    /// # Errors
    /// Returns `Error::Store` if the file cannot be opened as a database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening store");
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, mainly for tests.
    ///
    /// # Errors
    /// Returns `Error::Store` if SQLite cannot allocate the database.
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS submissions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner TEXT NOT NULL,
                lab INTEGER NOT NULL,
                ast BLOB NOT NULL,
                source TEXT NOT NULL,
                UNIQUE(owner, lab)
            )",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_submissions_lab ON submissions(lab)",
            [],
        )?;
        Ok(())
    }

    /// # Errors
    /// Returns `Error::Duplicate` if `(owner, lab)` is already stored.
    pub fn insert(&self, owner: &str, lab: u32, ast: &[u8], source: &str) -> Result<()> {
        let res = self.conn.execute(
            "INSERT INTO submissions (owner, lab, ast, source) VALUES (?1, ?2, ?3, ?4)",
            params![owner, lab, ast, source],
        );
        match res {
            Ok(_) => {
                info!(owner, lab, bytes = ast.len(), "submission stored");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(Error::Duplicate {
                    owner: owner.to_string(),
                    lab,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// # Errors
    /// Returns `Error::NotFound` if nothing is stored for `(owner, lab)`.
    pub fn update(&self, owner: &str, lab: u32, ast: &[u8], source: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE submissions SET ast = ?3, source = ?4 WHERE owner = ?1 AND lab = ?2",
            params![owner, lab, ast, source],
        )?;
        if changed == 0 {
            return Err(not_found(owner, lab));
        }
        info!(owner, lab, bytes = ast.len(), "submission updated");
        Ok(())
    }

    /// Inserts, or replaces an existing row for the same pair.
    ///
    /// # Errors
    /// Returns `Error::Store` on database failure.
    pub fn upsert(&self, owner: &str, lab: u32, ast: &[u8], source: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO submissions (owner, lab, ast, source) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(owner, lab) DO UPDATE SET ast = excluded.ast, source = excluded.source",
            params![owner, lab, ast, source],
        )?;
        info!(owner, lab, bytes = ast.len(), "submission upserted");
        Ok(())
    }

    /// # Errors
    /// Returns `Error::NotFound` if nothing is stored for `(owner, lab)`.
    pub fn delete(&self, owner: &str, lab: u32) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM submissions WHERE owner = ?1 AND lab = ?2",
            params![owner, lab],
        )?;
        if changed == 0 {
            return Err(not_found(owner, lab));
        }
        info!(owner, lab, "submission deleted");
        Ok(())
    }

    /// Encoded trees of every other owner's submission for `lab`.
    ///
    /// # Errors
    /// Returns `Error::Store` on database failure.
    pub fn find_for_lab(
        &self,
        lab: u32,
        excluding_owner: &str,
    ) -> Result<BTreeMap<String, Vec<u8>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT owner, ast FROM submissions WHERE lab = ?1 AND owner <> ?2")?;
        let rows = stmt.query_map(params![lab, excluding_owner], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
        })?;
        let found = rows.collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
        debug!(lab, excluding_owner, found = found.len(), "loaded candidates");
        Ok(found)
    }

    /// The encoded tree stored for `(owner, lab)`.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if nothing is stored.
    pub fn ast(&self, owner: &str, lab: u32) -> Result<Vec<u8>> {
        self.conn
            .query_row(
                "SELECT ast FROM submissions WHERE owner = ?1 AND lab = ?2",
                params![owner, lab],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| not_found(owner, lab))
    }

    /// # Errors
    /// Returns `Error::NotFound` if nothing is stored for `(owner, lab)`.
    pub fn source(&self, owner: &str, lab: u32) -> Result<String> {
        self.conn
            .query_row(
                "SELECT source FROM submissions WHERE owner = ?1 AND lab = ?2",
                params![owner, lab],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| not_found(owner, lab))
    }
}

fn not_found(owner: &str, lab: u32) -> Error {
    Error::NotFound {
        owner: owner.to_string(),
        lab,
    }
}
