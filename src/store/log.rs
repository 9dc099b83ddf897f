use super::Storage;
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// The domain part of a tracker's persisted log.
pub trait LogEntry: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage key the tracker's log list lives under.
    const STORAGE_KEY: &'static str;

    /// What a save handler passes in; derived labels are not part of it.
    type Draft;

    /// Builds the entry, deriving every computed field from the draft.
    fn from_draft(draft: Self::Draft) -> Self;
}

/// A persisted log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log<E> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub entry: E,
}

impl<E> Deref for Log<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.entry
    }
}

/// The log list of one tracker, mirrored to storage after every change.
///
/// Writes to storage are fire-and-forget: a failed write is logged and the in-memory
/// list stays authoritative.
pub struct LogStore<E: LogEntry> {
    storage: Arc<dyn Storage>,
    logs: Mutex<Vec<Log<E>>>,
}

impl<E: LogEntry> LogStore<E> {
    /// Opens the store and loads any logs already in storage.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let logs: Vec<Log<E>> = match storage.get_item(E::STORAGE_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::error!(key = E::STORAGE_KEY, error = %e, "stored logs are corrupt, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(key = E::STORAGE_KEY, error = %e, "could not read stored logs");
                Vec::new()
            }
        };
        tracing::debug!(key = E::STORAGE_KEY, count = logs.len(), "log store opened");
        Self {
            storage,
            logs: Mutex::new(logs),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Log<E>>> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, logs: &[Log<E>]) {
        let result = serde_json::to_string(logs)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set_item(E::STORAGE_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            tracing::error!(key = E::STORAGE_KEY, error = %e, "failed to persist logs");
        }
    }

    /// Stamps a new id and timestamp on the draft and stores it first in the list.
    pub fn add_log(&self, draft: E::Draft) -> Log<E> {
        let log = Log {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            entry: E::from_draft(draft),
        };
        let mut logs = self.lock();
        logs.insert(0, log.clone());
        self.persist(&logs);
        tracing::debug!(key = E::STORAGE_KEY, id = %log.id, "log added");
        log
    }

    /// Rebuilds an existing log from a new draft, keeping its id and timestamp.
    pub fn update_log(&self, id: Uuid, draft: E::Draft) -> Result<Log<E>, StoreError> {
        let mut logs = self.lock();
        let log = logs
            .iter_mut()
            .find(|log| log.id == id)
            .ok_or(StoreError::LogNotFound(id))?;
        log.entry = E::from_draft(draft);
        let updated = log.clone();
        self.persist(&logs);
        Ok(updated)
    }

    /// Removes a log. Returns whether it existed.
    pub fn delete_log(&self, id: Uuid) -> bool {
        let mut logs = self.lock();
        let before = logs.len();
        logs.retain(|log| log.id != id);
        let removed = logs.len() != before;
        if removed {
            self.persist(&logs);
        }
        removed
    }

    /// All logs, newest first.
    pub fn logs(&self) -> Vec<Log<E>> {
        self.lock().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Log<E>> {
        self.lock().iter().find(|log| log.id == id).cloned()
    }

    pub fn latest(&self) -> Option<Log<E>> {
        self.lock().first().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
