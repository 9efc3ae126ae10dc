//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Persistent record store for a single entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new entity, returns error if already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing entity, returns error if not found
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes an entity by its key, returns true if deleted
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::storage::StorageKey;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock storage for testing
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<HashMap<String, E>>,
        error: Mutex<Option<String>>,
        calls: AtomicUsize,
        create_limit: Mutex<Option<usize>>,
    }

    impl<E> Default for MockStorage<E>
    where
        E: StorageEntity,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(HashMap::new()),
                error: Mutex::new(None),
                calls: AtomicUsize::new(0),
                create_limit: Mutex::new(None),
            }
        }

        pub fn with_entity(self, entity: E) -> Self {
            self.entities
                .lock()
                .unwrap()
                .insert(entity.key().as_str().to_string(), entity);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        /// Accepts `limit` creates, then fails every further one
        pub fn with_create_limit(self, limit: usize) -> Self {
            *self.create_limit.lock().unwrap() = Some(limit);
            self
        }

        /// Number of trait calls made so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn check_error(&self) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().get(key.as_str()).cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().values().cloned().collect())
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;

            if let Some(remaining) = self.create_limit.lock().unwrap().as_mut() {
                if *remaining == 0 {
                    return Err(DomainError::storage("create limit reached"));
                }
                *remaining -= 1;
            }

            let key = entity.key().as_str().to_string();
            let mut entities = self.entities.lock().unwrap();

            if entities.contains_key(&key) {
                return Err(DomainError::conflict(format!(
                    "Entity with key '{}' already exists",
                    key
                )));
            }

            entities.insert(key, entity.clone());
            Ok(entity)
        }

        async fn update(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let key = entity.key().as_str().to_string();
            let mut entities = self.entities.lock().unwrap();

            if !entities.contains_key(&key) {
                return Err(DomainError::not_found(format!(
                    "Entity with key '{}' not found",
                    key
                )));
            }

            entities.insert(key, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().remove(key.as_str()).is_some())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::faq::{Faq, Language, NewFaq};

        fn faq(question: &str) -> Faq {
            Faq::new(NewFaq::new(question, "answer", Language::En).unwrap())
        }

        #[tokio::test]
        async fn test_mock_storage_create_conflict() {
            let entity = faq("Q1");
            let storage: MockStorage<Faq> = MockStorage::new().with_entity(entity.clone());

            let result = storage.create(entity).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_mock_storage_update_not_found() {
            let storage: MockStorage<Faq> = MockStorage::new();

            let result = storage.update(faq("Q1")).await;
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
        }

        #[tokio::test]
        async fn test_mock_storage_counts_calls() {
            let storage: MockStorage<Faq> = MockStorage::new().with_entity(faq("Q1"));

            assert_eq!(storage.calls(), 0);
            assert_eq!(storage.count().await.unwrap(), 1);
            assert_eq!(storage.calls(), 1);
        }

        #[tokio::test]
        async fn test_mock_storage_create_limit() {
            let storage: MockStorage<Faq> = MockStorage::new().with_create_limit(1);

            storage.create(faq("Q1")).await.unwrap();
            let result = storage.create(faq("Q2")).await;

            assert!(matches!(result, Err(DomainError::Storage { .. })));
            assert_eq!(storage.count().await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_mock_storage_with_error() {
            let storage: MockStorage<Faq> = MockStorage::new().with_error("disk on fire");

            let result = storage.list().await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }
    }
}
