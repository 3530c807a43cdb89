use async_trait::async_trait;
use rusqlite::Connection;
use tracing::debug;

use super::errors::RepositoryError;
use super::storage::HealthRecordStorage;
use crate::database::DatabasePool;
use crate::models::health_record::{now_micros, HealthRecordChanges, NewHealthRecord, StoredHealthRecord};

/// Repository trait for health checkup records
#[async_trait]
pub trait HealthRecordRepositoryTrait: Send + Sync {
    /// Persist a new record; the store assigns id and timestamps
    async fn insert(&self, record: NewHealthRecord) -> Result<StoredHealthRecord, RepositoryError>;

    /// Look up a record by id, `None` when absent
    async fn find_by_id(&self, id: i64) -> Result<Option<StoredHealthRecord>, RepositoryError>;

    /// Page through records ordered newest first
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<StoredHealthRecord>, RepositoryError>;

    /// Replace the mutable fields of a record, `None` when absent
    async fn update(
        &self,
        id: i64,
        changes: HealthRecordChanges,
    ) -> Result<Option<StoredHealthRecord>, RepositoryError>;

    /// Physically delete a record, returning whether it existed
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Verify the store is reachable
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// SQLite-backed repository
///
/// Each call checks one connection out of the pool on a blocking worker thread
/// and returns it when the call finishes, whatever the outcome.
#[derive(Debug, Clone)]
pub struct SqliteHealthRecordRepository {
    pool: DatabasePool,
}

impl SqliteHealthRecordRepository {
    /// Create a new repository over an already initialized pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, op: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, RepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut *conn)
        })
        .await
        .map_err(|e| RepositoryError::Task(e.to_string()))?
    }
}

#[async_trait]
impl HealthRecordRepositoryTrait for SqliteHealthRecordRepository {
    async fn insert(&self, record: NewHealthRecord) -> Result<StoredHealthRecord, RepositoryError> {
        debug!("Storing health record for user: {}", record.user_name);
        self.run(move |conn| HealthRecordStorage::insert(conn, &record, now_micros()))
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredHealthRecord>, RepositoryError> {
        debug!("Getting health record by ID from database: {}", id);
        self.run(move |conn| HealthRecordStorage::find_by_id(conn, id)).await
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<StoredHealthRecord>, RepositoryError> {
        debug!("Listing health records: offset={}, limit={}", offset, limit);
        self.run(move |conn| HealthRecordStorage::list(conn, offset, limit)).await
    }

    async fn update(
        &self,
        id: i64,
        changes: HealthRecordChanges,
    ) -> Result<Option<StoredHealthRecord>, RepositoryError> {
        debug!("Updating health record in database: {}", id);
        self.run(move |conn| HealthRecordStorage::update(conn, id, &changes, now_micros()))
            .await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        debug!("Deleting health record from database: {}", id);
        self.run(move |conn| HealthRecordStorage::delete(conn, id)).await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || pool.ping_blocking())
            .await
            .map_err(|e| RepositoryError::Task(e.to_string()))??;
        Ok(())
    }
}
