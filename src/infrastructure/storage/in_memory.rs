//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Used for development and tests. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().as_str().to_string(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }

    fn poisoned(e: impl std::fmt::Display) -> DomainError {
        DomainError::storage(format!("Storage lock poisoned: {}", e))
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(Self::poisoned)?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(Self::poisoned)?;

        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(Self::poisoned)?;

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
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(Self::poisoned)?;

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
        let mut entities = self.entities.write().map_err(Self::poisoned)?;

        Ok(entities.remove(key.as_str()).is_some())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entities = self.entities.read().map_err(Self::poisoned)?;

        Ok(entities.contains_key(key.as_str()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(Self::poisoned)?;

        Ok(entities.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::faq::{Faq, FaqId, Language, NewFaq};

    fn faq(question: &str) -> Faq {
        Faq::new(NewFaq::new(question, "An answer", Language::En).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Faq> = InMemoryStorage::new();
        let faq = faq("What is Rust?");

        storage.create(faq.clone()).await.unwrap();

        let result = storage.get(faq.id()).await.unwrap();
        assert_eq!(result, Some(faq));
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<Faq> = InMemoryStorage::new();
        let faq = faq("What is Rust?");

        storage.create(faq.clone()).await.unwrap();
        let result = storage.create(faq).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update() {
        let storage: InMemoryStorage<Faq> = InMemoryStorage::new();
        let mut faq = faq("What is Rust?");

        storage.create(faq.clone()).await.unwrap();

        faq.set_answer("A systems language").unwrap();
        storage.update(faq.clone()).await.unwrap();

        let result = storage.get(faq.id()).await.unwrap().unwrap();
        assert_eq!(result.answer(), "A systems language");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage: InMemoryStorage<Faq> = InMemoryStorage::new();

        let result = storage.update(faq("Missing?")).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage: InMemoryStorage<Faq> = InMemoryStorage::new();
        let faq = faq("What is Rust?");

        storage.create(faq.clone()).await.unwrap();

        assert!(storage.delete(faq.id()).await.unwrap());
        assert!(!storage.exists(faq.id()).await.unwrap());
        assert!(!storage.delete(faq.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let storage: InMemoryStorage<Faq> = InMemoryStorage::new();

        let result = storage.get(&FaqId::generate()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let storage = InMemoryStorage::with_entities(vec![faq("A?"), faq("B?"), faq("C?")]);

        assert_eq!(storage.list().await.unwrap().len(), 3);
        assert_eq!(storage.count().await.unwrap(), 3);
    }
}
