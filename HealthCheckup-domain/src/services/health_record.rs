use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

use health_checkup_data::database::DatabasePool;
use health_checkup_data::repository::{
    HealthRecordRepositoryTrait, RepositoryError, SqliteHealthRecordRepository,
};

use crate::entities::conversions;
use crate::entities::health_record::{HealthRecord, HealthRecordRequest};

/// Page size used when a caller does not supply one
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// Health record service errors
///
/// A missing record is not an error here; lookups return `Option` and deletes
/// return `bool` so the caller picks the status code.
#[derive(Debug, Error)]
pub enum HealthRecordServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Repository error
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<RepositoryError> for HealthRecordServiceError {
    fn from(err: RepositoryError) -> Self {
        HealthRecordServiceError::Persistence(err.to_string())
    }
}

/// Trait for health record service operations
#[async_trait]
pub trait HealthRecordServiceTrait: Send + Sync {
    /// Validate a request as it will be stored, after trimming and rounding
    fn validate_request(&self, request: &HealthRecordRequest) -> Result<(), HealthRecordServiceError>;

    /// Create a new record, defaulting `check_date` to today and `exam_type` to a regular checkup
    async fn create(&self, request: HealthRecordRequest) -> Result<HealthRecord, HealthRecordServiceError>;

    /// Get a record by ID
    async fn get(&self, id: i64) -> Result<Option<HealthRecord>, HealthRecordServiceError>;

    /// List records newest first
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<HealthRecord>, HealthRecordServiceError>;

    /// Replace a record's fields, keeping stored values for omitted optional fields
    async fn update(
        &self,
        id: i64,
        request: HealthRecordRequest,
    ) -> Result<Option<HealthRecord>, HealthRecordServiceError>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, id: i64) -> Result<bool, HealthRecordServiceError>;

    /// Check that the backing store answers
    async fn check_store(&self) -> Result<(), HealthRecordServiceError>;
}

/// Health record service for domain logic
pub struct HealthRecordService<R: HealthRecordRepositoryTrait> {
    repository: R,
}

impl<R: HealthRecordRepositoryTrait> HealthRecordService<R> {
    /// Create a new health record service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: HealthRecordRepositoryTrait> HealthRecordServiceTrait for HealthRecordService<R> {
    fn validate_request(&self, request: &HealthRecordRequest) -> Result<(), HealthRecordServiceError> {
        // Blank text trims to empty and fails the length checks
        let request = request.clone().normalized();
        let mut messages = Vec::new();

        if let Err(validation_errors) = request.validate() {
            let mut field_errors: Vec<_> = validation_errors.field_errors().into_iter().collect();
            field_errors.sort_by_key(|(field, _)| *field);

            for (field, errors) in field_errors {
                let error_msgs: Vec<String> = errors
                    .iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("invalid {}", field),
                    })
                    .collect();
                messages.push(format!("{}: {}", field, error_msgs.join(", ")));
            }
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(HealthRecordServiceError::Validation(messages.join("; ")))
        }
    }

    async fn create(&self, request: HealthRecordRequest) -> Result<HealthRecord, HealthRecordServiceError> {
        self.validate_request(&request)?;

        let today = Utc::now().date_naive();
        let new_record = conversions::convert_to_data_new_record(request.normalized(), today);

        let stored = self.repository.insert(new_record).await?;
        info!("Health record created with ID: {}", stored.id);

        Ok(conversions::convert_to_domain_record(stored))
    }

    async fn get(&self, id: i64) -> Result<Option<HealthRecord>, HealthRecordServiceError> {
        let stored = self.repository.find_by_id(id).await?;
        Ok(stored.map(conversions::convert_to_domain_record))
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<HealthRecord>, HealthRecordServiceError> {
        debug!("Listing health records: skip={}, limit={}", skip, limit);
        let stored = self.repository.list(skip, limit).await?;

        Ok(stored
            .into_iter()
            .map(conversions::convert_to_domain_record)
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        request: HealthRecordRequest,
    ) -> Result<Option<HealthRecord>, HealthRecordServiceError> {
        self.validate_request(&request)?;

        let changes = conversions::convert_to_data_changes(request.normalized());
        let stored = self.repository.update(id, changes).await?;
        if stored.is_some() {
            info!("Health record updated: {}", id);
        }

        Ok(stored.map(conversions::convert_to_domain_record))
    }

    async fn delete(&self, id: i64) -> Result<bool, HealthRecordServiceError> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            info!("Health record deleted: {}", id);
        }
        Ok(deleted)
    }

    async fn check_store(&self) -> Result<(), HealthRecordServiceError> {
        Ok(self.repository.ping().await?)
    }
}

/// Create a health record service backed by the SQLite repository
pub fn create_health_record_service(pool: DatabasePool) -> impl HealthRecordServiceTrait {
    HealthRecordService::new(SqliteHealthRecordRepository::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use health_checkup_data::database::DatabaseError;
    use health_checkup_data::models::{HealthRecordChanges, NewHealthRecord, StoredHealthRecord};
    use health_checkup_data::repository::InMemoryHealthRecordRepository;
    use mockall::mock;
    use mockall::predicate::eq;

    use crate::entities::DEFAULT_EXAM_TYPE;

    mock! {
        pub Repository {}

        #[async_trait]
        impl HealthRecordRepositoryTrait for Repository {
            async fn insert(&self, record: NewHealthRecord) -> Result<StoredHealthRecord, RepositoryError>;
            async fn find_by_id(&self, id: i64) -> Result<Option<StoredHealthRecord>, RepositoryError>;
            async fn list(&self, offset: u64, limit: u64) -> Result<Vec<StoredHealthRecord>, RepositoryError>;
            async fn update(&self, id: i64, changes: HealthRecordChanges) -> Result<Option<StoredHealthRecord>, RepositoryError>;
            async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
            async fn ping(&self) -> Result<(), RepositoryError>;
        }
    }

    fn connection_lost() -> RepositoryError {
        DatabaseError::Connection("connection reset".to_string()).into()
    }

    fn in_memory_service() -> HealthRecordService<InMemoryHealthRecordRepository> {
        HealthRecordService::new(InMemoryHealthRecordRepository::new())
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let service = in_memory_service();

        let record = service
            .create(HealthRecordRequest::new("Kim", "normal"))
            .await
            .unwrap();

        assert_eq!(record.user_name, "Kim");
        assert_eq!(record.health_status, "normal");
        assert_eq!(record.check_date, Utc::now().date_naive());
        assert_eq!(record.exam_type, DEFAULT_EXAM_TYPE);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let service = in_memory_service();
        let request = HealthRecordRequest {
            check_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            height: Some(180.129),
            blood_sugar: Some(101),
            ..HealthRecordRequest::new(" Lee ", "caution")
        };

        let created = service.create(request).await.unwrap();
        let fetched = service.get(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.user_name, "Lee");
        assert_eq!(fetched.height, Some(180.13));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_without_touching_store() {
        let mut repo = MockRepository::new();
        repo.expect_insert().never();
        let service = HealthRecordService::new(repo);

        let err = service
            .create(HealthRecordRequest::new("   ", "normal"))
            .await
            .unwrap_err();

        match err {
            HealthRecordServiceError::Validation(msg) => assert!(msg.contains("user_name")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validation_messages_are_field_level() {
        let service = in_memory_service();
        let request = HealthRecordRequest {
            blood_sugar: Some(5000),
            ..HealthRecordRequest::new("", "normal")
        };

        let err = service.validate_request(&request).unwrap_err().to_string();
        assert!(err.contains("blood_sugar: must be between 0 and 1000"), "{}", err);
        assert!(err.contains("user_name:"), "{}", err);
        assert_eq!(err.matches("user_name:").count(), 1);
    }

    #[tokio::test]
    async fn test_values_are_validated_after_normalization() {
        let service = in_memory_service();
        let padded_name = format!("{}  ", "a".repeat(100));
        let request = HealthRecordRequest {
            height: Some(0.006),
            ..HealthRecordRequest::new(padded_name, "normal")
        };

        let record = service.create(request).await.unwrap();
        assert_eq!(record.user_name.len(), 100);
        assert_eq!(record.height, Some(0.01));

        let too_small = HealthRecordRequest {
            weight: Some(0.004),
            ..HealthRecordRequest::new("Kim", "normal")
        };
        let err = service.validate_request(&too_small).unwrap_err().to_string();
        assert!(err.contains("weight"), "{}", err);

        let blank_exam = HealthRecordRequest {
            exam_type: Some("   ".to_string()),
            ..HealthRecordRequest::new("Kim", "normal")
        };
        let err = service.validate_request(&blank_exam).unwrap_err().to_string();
        assert!(err.contains("exam_type"), "{}", err);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let mut repo = MockRepository::new();
        repo.expect_find_by_id().with(eq(5)).returning(|_| Ok(None));
        let service = HealthRecordService::new(repo);

        assert_eq!(service.get(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_repository_failures_become_persistence_errors() {
        let mut repo = MockRepository::new();
        repo.expect_insert().returning(|_| Err(connection_lost()));
        repo.expect_find_by_id().returning(|_| Err(connection_lost()));
        repo.expect_list().returning(|_, _| Err(connection_lost()));
        repo.expect_delete().returning(|_| Err(connection_lost()));
        let service = HealthRecordService::new(repo);

        assert!(matches!(
            service.create(HealthRecordRequest::new("Kim", "normal")).await,
            Err(HealthRecordServiceError::Persistence(_))
        ));
        assert!(matches!(service.get(1).await, Err(HealthRecordServiceError::Persistence(_))));
        assert!(matches!(service.list(0, 10).await, Err(HealthRecordServiceError::Persistence(_))));
        assert!(matches!(service.delete(1).await, Err(HealthRecordServiceError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_list_passes_paging_through() {
        let mut repo = MockRepository::new();
        repo.expect_list()
            .with(eq(20), eq(10))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let service = HealthRecordService::new(repo);

        assert!(service.list(20, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unsupplied_fields() {
        let service = in_memory_service();
        let created = service
            .create(HealthRecordRequest {
                weight: Some(70.0),
                exam_type: Some("annual".to_string()),
                ..HealthRecordRequest::new("Kim", "normal")
            })
            .await
            .unwrap();

        let updated = service
            .update(created.id, HealthRecordRequest::new("Kim", "caution"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.health_status, "caution");
        assert_eq!(updated.weight, Some(70.0));
        assert_eq!(updated.exam_type, "annual");
        assert_eq!(updated.check_date, created.check_date);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let service = in_memory_service();
        assert!(service
            .update(404, HealthRecordRequest::new("Kim", "normal"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let service = in_memory_service();
        let created = service
            .create(HealthRecordRequest::new("Kim", "normal"))
            .await
            .unwrap();

        assert!(service.delete(created.id).await.unwrap());
        assert!(!service.delete(created.id).await.unwrap());
        assert!(service.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_check_store() {
        let mut repo = MockRepository::new();
        repo.expect_ping().returning(|| Err(connection_lost()));
        let service = HealthRecordService::new(repo);
        assert!(service.check_store().await.is_err());

        assert!(in_memory_service().check_store().await.is_ok());
    }
}
