//! SQL statements and row mapping for `health_records`.
//!
//! Every statement is parameterized. Write paths run inside a transaction that
//! is rolled back when dropped without commit, so any `?` exit leaves the table
//! untouched.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::errors::RepositoryError;
use crate::models::health_record::{
    format_timestamp, parse_date, parse_timestamp, HealthRecordChanges, NewHealthRecord,
    StoredHealthRecord, DATE_FORMAT,
};

/// Database storage operations for health records
pub struct HealthRecordStorage;

impl HealthRecordStorage {
    /// Insert a record and return the stored row
    pub fn insert(
        conn: &mut Connection,
        record: &NewHealthRecord,
        now: DateTime<Utc>,
    ) -> Result<StoredHealthRecord, RepositoryError> {
        let timestamp = format_timestamp(&now);
        let tx = conn.transaction()?;

        let stored = tx.query_row(
            "INSERT INTO health_records
                (user_name, health_status, check_date, exam_type, height, weight,
                 blood_pressure, blood_sugar, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             RETURNING id, user_name, health_status, check_date, exam_type, height, weight,
                       blood_pressure, blood_sugar, created_at, updated_at",
            params![
                record.user_name,
                record.health_status,
                record.check_date.format(DATE_FORMAT).to_string(),
                record.exam_type,
                record.height,
                record.weight,
                record.blood_pressure,
                record.blood_sugar,
                timestamp,
                timestamp,
            ],
            map_row,
        )?;

        tx.commit()?;
        debug!("Inserted health record id={}", stored.id);
        Ok(stored)
    }

    /// Fetch a single record by primary key
    pub fn find_by_id(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<StoredHealthRecord>, RepositoryError> {
        let record = conn
            .query_row(
                "SELECT id, user_name, health_status, check_date, exam_type, height, weight,
                        blood_pressure, blood_sugar, created_at, updated_at
                 FROM health_records WHERE id = ?1",
                params![id],
                map_row,
            )
            .optional()?;

        Ok(record)
    }

    /// Fetch a page of records, newest first
    pub fn list(
        conn: &Connection,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<StoredHealthRecord>, RepositoryError> {
        let mut stmt = conn.prepare(
            "SELECT id, user_name, health_status, check_date, exam_type, height, weight,
                    blood_pressure, blood_sugar, created_at, updated_at
             FROM health_records
             ORDER BY created_at DESC, id DESC
             LIMIT ?1 OFFSET ?2",
        )?;

        let rows = stmt.query_map(params![to_sql_int(limit), to_sql_int(offset)], map_row)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Overwrite the mutable columns of a record
    ///
    /// `updated_at` always moves strictly forward, even when the clock has not
    /// advanced since the previous write.
    pub fn update(
        conn: &mut Connection,
        id: i64,
        changes: &HealthRecordChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredHealthRecord>, RepositoryError> {
        let tx = conn.transaction()?;

        let previous: Option<String> = tx
            .query_row(
                "SELECT updated_at FROM health_records WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        let previous = match previous {
            Some(previous) => parse_timestamp(&previous).map_err(RepositoryError::InvalidData)?,
            None => return Ok(None),
        };
        let updated_at = next_updated_at(previous, now);

        let stored = tx.query_row(
            "UPDATE health_records SET
                user_name = ?2,
                health_status = ?3,
                check_date = COALESCE(?4, check_date),
                exam_type = COALESCE(?5, exam_type),
                height = COALESCE(?6, height),
                weight = COALESCE(?7, weight),
                blood_pressure = COALESCE(?8, blood_pressure),
                blood_sugar = COALESCE(?9, blood_sugar),
                updated_at = ?10
             WHERE id = ?1
             RETURNING id, user_name, health_status, check_date, exam_type, height, weight,
                       blood_pressure, blood_sugar, created_at, updated_at",
            params![
                id,
                changes.user_name,
                changes.health_status,
                changes.check_date.map(|d| d.format(DATE_FORMAT).to_string()),
                changes.exam_type,
                changes.height,
                changes.weight,
                changes.blood_pressure,
                changes.blood_sugar,
                format_timestamp(&updated_at),
            ],
            map_row,
        )?;

        tx.commit()?;
        debug!("Updated health record id={}", id);
        Ok(Some(stored))
    }

    /// Physically remove a record; returns whether a row existed
    pub fn delete(conn: &mut Connection, id: i64) -> Result<bool, RepositoryError> {
        let tx = conn.transaction()?;
        let affected = tx.execute("DELETE FROM health_records WHERE id = ?1", params![id])?;
        tx.commit()?;

        Ok(affected > 0)
    }
}

/// The `updated_at` value for a write happening at `now`
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Map a `health_records` row (in column order) to the storage model
fn map_row(row: &Row<'_>) -> rusqlite::Result<StoredHealthRecord> {
    Ok(StoredHealthRecord {
        id: row.get(0)?,
        user_name: row.get(1)?,
        health_status: row.get(2)?,
        check_date: text_column(row, 3, parse_date)?,
        exam_type: row.get(4)?,
        height: row.get(5)?,
        weight: row.get(6)?,
        blood_pressure: row.get(7)?,
        blood_sugar: row.get(8)?,
        created_at: text_column(row, 9, parse_timestamp)?,
        updated_at: text_column(row, 10, parse_timestamp)?,
    })
}

fn text_column<T>(
    row: &Row<'_>,
    idx: usize,
    parse: fn(&str) -> Result<T, String>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}
