use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use survey_core::model::{Answer, SessionId, SessionRecord};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Raw key-value contract: one text value per session key.
///
/// Writes replace the previous value wholesale; last write wins.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the stored value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_value(&self, key: &SessionId) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    async fn put_value(&self, key: &SessionId, value: String) -> Result<(), StorageError>;
}

/// Both payload shapes ever written under a session key.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Record(SessionRecord),
    Answers(Vec<Answer>),
}

/// Parse a stored value. Bare answer arrays read as an in-progress record.
///
/// Returns `None` for values that match neither shape.
#[must_use]
pub fn decode_record(raw: &str) -> Option<SessionRecord> {
    match serde_json::from_str::<StoredPayload>(raw).ok()? {
        StoredPayload::Record(record) => Some(record),
        StoredPayload::Answers(answers) => Some(SessionRecord {
            answers,
            ..SessionRecord::default()
        }),
    }
}

/// Serialize a record into the stored value.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_record(record: &SessionRecord) -> Result<String, StorageError> {
    serde_json::to_string(record).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Typed session persistence on top of a `SessionRepository`.
#[derive(Clone)]
pub struct SessionStore {
    repo: Arc<dyn SessionRepository>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(repo: Arc<dyn SessionRepository>) -> Self {
        Self { repo }
    }

    /// Read the answers previously stored for `session_id`.
    ///
    /// Missing or unparsable values yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backend itself fails.
    pub async fn load(&self, session_id: &SessionId) -> Result<Vec<Answer>, StorageError> {
        Ok(self
            .load_record(session_id)
            .await?
            .map(|record| record.answers)
            .unwrap_or_default())
    }

    /// Read the full stored record, if present and parsable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backend fails.
    pub async fn load_record(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionRecord>, StorageError> {
        let raw = self.repo.get_value(session_id).await?;
        Ok(raw.as_deref().and_then(decode_record))
    }

    /// Replace the stored value for `session_id` with `record`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub async fn save(
        &self,
        session_id: &SessionId,
        record: &SessionRecord,
    ) -> Result<(), StorageError> {
        let value = encode_record(record)?;
        self.repo.put_value(session_id, value).await
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<SessionId, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn get_value(&self, key: &SessionId) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_value(&self, key: &SessionId, value: String) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.clone(), value);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let sessions: Arc<dyn SessionRepository> = Arc::new(InMemoryRepository::new());
        Self { sessions }
    }

    #[must_use]
    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(Arc::clone(&self.sessions))
    }
}
