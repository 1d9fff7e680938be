//! Record store for Planner.
//!
//! Implements `RecordStoreTrait`: point and section-indexed operations on the
//! `records` table, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};

use crate::types::errors::StoreError;
use crate::types::record::{format_timestamp, parse_timestamp, NewRecord, Record};
use crate::types::section::Section;

const SELECT_COLUMNS: &str = "SELECT id, url, tag, section, completed, date FROM records";

/// Trait defining record storage operations.
pub trait RecordStoreTrait {
    fn add(&mut self, record: &NewRecord) -> Result<i64, StoreError>;
    /// Inserts every record in one transaction. Returns the ids in input order.
    fn add_batch(&mut self, records: &[NewRecord]) -> Result<Vec<i64>, StoreError>;
    fn get_by_id(&self, id: i64) -> Result<Option<Record>, StoreError>;
    fn get_all_by_section(&self, section: Section) -> Result<Vec<Record>, StoreError>;
    fn get_all(&self) -> Result<Vec<Record>, StoreError>;
    /// Writes a full record back. Only `completed` may differ from the stored row.
    fn update(&mut self, record: &Record) -> Result<(), StoreError>;
    /// Flips `completed` in a single statement and returns the new value.
    fn toggle_completed(&mut self, id: i64) -> Result<bool, StoreError>;
    fn remove(&mut self, id: i64) -> Result<(), StoreError>;
    fn count(&self) -> Result<u64, StoreError>;
}

/// Record store backed by a SQLite connection.
pub struct RecordStore<'a> {
    conn: &'a Connection,
}

impl<'a> RecordStore<'a> {
    /// Creates a new `RecordStore` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a single row into a `Record`.
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
        let section: String = row.get(3)?;
        let date: String = row.get(5)?;
        Ok(Record {
            id: row.get(0)?,
            url: row.get(1)?,
            tag: row.get(2)?,
            section: section.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
            })?,
            completed: row.get(4)?,
            date: parse_timestamp(&date).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
            })?,
        })
    }

    fn insert(conn: &Connection, record: &NewRecord) -> Result<i64, StoreError> {
        conn.execute(
            "INSERT INTO records (url, tag, section, completed, date) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.url,
                record.tag,
                record.section.id(),
                record.completed,
                format_timestamp(&record.date),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn query(&self, sql: &str, args: impl rusqlite::Params) -> Result<Vec<Record>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, Self::row_to_record)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(Self::map_row_error)?);
        }
        Ok(results)
    }

    fn map_row_error(err: rusqlite::Error) -> StoreError {
        match err {
            rusqlite::Error::FromSqlConversionFailure(_, _, inner) => {
                StoreError::Corrupt(inner.to_string())
            }
            other => StoreError::from(other),
        }
    }
}

impl<'a> RecordStoreTrait for RecordStore<'a> {
    fn add(&mut self, record: &NewRecord) -> Result<i64, StoreError> {
        let id = Self::insert(self.conn, record)?;
        tracing::info!(id, section = %record.section, "record added");
        Ok(id)
    }

    fn add_batch(&mut self, records: &[NewRecord]) -> Result<Vec<i64>, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(Self::insert(&tx, record)?);
        }
        tx.commit()?;
        tracing::info!(count = ids.len(), "record batch added");
        Ok(ids)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Record>, StoreError> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        Ok(self.query(&sql, params![id])?.into_iter().next())
    }

    /// Uses `idx_records_section`. Results are in insertion order.
    fn get_all_by_section(&self, section: Section) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(%section, "loading section");
        let sql = format!("{} WHERE section = ?1 ORDER BY id", SELECT_COLUMNS);
        self.query(&sql, params![section.id()])
    }

    fn get_all(&self) -> Result<Vec<Record>, StoreError> {
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        self.query(&sql, params![])
    }

    fn update(&mut self, record: &Record) -> Result<(), StoreError> {
        let stored = self
            .get_by_id(record.id)?
            .ok_or(StoreError::NotFound(record.id))?;

        if stored.url != record.url {
            return Err(StoreError::ImmutableField("url".to_string()));
        }
        if stored.tag != record.tag {
            return Err(StoreError::ImmutableField("tag".to_string()));
        }
        if stored.section != record.section {
            return Err(StoreError::ImmutableField("section".to_string()));
        }
        if stored.date != record.date {
            return Err(StoreError::ImmutableField("date".to_string()));
        }

        let affected = self.conn.execute(
            "UPDATE records SET completed = ?1 WHERE id = ?2",
            params![record.completed, record.id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound(record.id));
        }
        Ok(())
    }

    fn toggle_completed(&mut self, id: i64) -> Result<bool, StoreError> {
        let completed: bool = self
            .conn
            .query_row(
                "UPDATE records SET completed = NOT completed WHERE id = ?1 RETURNING completed",
                params![id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id),
                other => StoreError::from(other),
            })?;
        tracing::info!(id, completed, "record toggled");
        Ok(completed)
    }

    fn remove(&mut self, id: i64) -> Result<(), StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(id, "record removed");
        Ok(())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
