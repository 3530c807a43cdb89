use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::errors::RepositoryError;
use super::health_record::HealthRecordRepositoryTrait;
use super::storage::next_updated_at;
use crate::database::DatabaseError;
use crate::models::health_record::{now_micros, HealthRecordChanges, NewHealthRecord, StoredHealthRecord};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<i64, StoredHealthRecord>,
    last_id: i64,
}

/// In-memory repository with the same contract as the SQLite one, for tests
///
/// Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHealthRecordRepository {
    inner: Arc<RwLock<Inner>>,
    failing: bool,
}

impl InMemoryHealthRecordRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails as if the database were unreachable
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.failing {
            Err(DatabaseError::Connection("in-memory store configured to fail".to_string()).into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HealthRecordRepositoryTrait for InMemoryHealthRecordRepository {
    async fn insert(&self, record: NewHealthRecord) -> Result<StoredHealthRecord, RepositoryError> {
        self.check_available()?;
        let mut inner = self.inner.write()?;

        inner.last_id += 1;
        let now = now_micros();
        let stored = StoredHealthRecord {
            id: inner.last_id,
            user_name: record.user_name,
            health_status: record.health_status,
            check_date: record.check_date,
            exam_type: record.exam_type,
            height: record.height,
            weight: record.weight,
            blood_pressure: record.blood_pressure,
            blood_sugar: record.blood_sugar,
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredHealthRecord>, RepositoryError> {
        self.check_available()?;
        let inner = self.inner.read()?;
        Ok(inner.records.get(&id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<StoredHealthRecord>, RepositoryError> {
        self.check_available()?;
        let inner = self.inner.read()?;

        let mut records: Vec<StoredHealthRecord> = inner.records.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(records
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        changes: HealthRecordChanges,
    ) -> Result<Option<StoredHealthRecord>, RepositoryError> {
        self.check_available()?;
        let mut inner = self.inner.write()?;

        Ok(inner.records.get_mut(&id).map(|record| {
            let updated_at = next_updated_at(record.updated_at, now_micros());
            record.apply(changes, updated_at);
            record.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        self.check_available()?;
        let mut inner = self.inner.write()?;
        Ok(inner.records.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}
