//! Whole-file JSON storage

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tokio::fs as async_fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{LoadedStore, MessageRepository, SubmitReceipt};
use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::models::{append, MessageRecord, MessageStore, SubmitterKey};

const INDENT: &[u8] = b"    ";

/// Serializes the store as UTF-8 JSON with four-space indentation.
/// Non-ASCII text is written as-is.
pub fn encode_store(store: &MessageStore) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    store.serialize(&mut serializer)?;
    Ok(buf)
}

/// Stores every message in one JSON document. Each save rewrites the file.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Option<Arc<Mutex<()>>>,
}

impl JsonFileStore {
    /// Store whose submissions are serialized through a single-writer lock.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Some(Arc::new(Mutex::new(()))),
        }
    }

    /// Store without a writer lock. Concurrent submissions race and the
    /// last writer wins.
    pub fn unguarded(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: None,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        if config.serialize_writes {
            Self::new(&config.data_file)
        } else {
            Self::unguarded(&config.data_file)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn serializes_writes(&self) -> bool {
        self.write_lock.is_some()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl MessageRepository for JsonFileStore {
    async fn load(&self) -> Result<LoadedStore> {
        let bytes = match async_fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Data file {} does not exist yet", self.path.display());
                return Ok(LoadedStore::empty());
            }
            Err(e) => {
                let warning = format!("Failed to read {}: {}", self.path.display(), e);
                warn!("{} - continuing with an empty store", warning);
                return Ok(LoadedStore::recovered(warning));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(LoadedStore::empty());
        }

        let document: Value = match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(e) => {
                let warning = format!("Data file {} is not valid JSON: {}", self.path.display(), e);
                warn!("{} - continuing with an empty store", warning);
                return Ok(LoadedStore::recovered(warning));
            }
        };

        // Valid JSON in some other shape is left alone rather than replaced.
        let messages = serde_json::from_value::<MessageStore>(document).map_err(|e| {
            AppError::StorageRead(format!(
                "Data file {} does not hold a message store: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(LoadedStore {
            messages,
            warning: None,
        })
    }

    async fn save(&self, store: &MessageStore) -> Result<()> {
        let bytes = encode_store(store)
            .map_err(|e| AppError::StorageWrite(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::StorageWrite(e.to_string()))?;
        }

        let temp_path = self.temp_path();
        async_fs::write(&temp_path, &bytes)
            .await
            .map_err(|e| AppError::StorageWrite(e.to_string()))?;

        if let Err(e) = async_fs::rename(&temp_path, &self.path).await {
            let _ = async_fs::remove_file(&temp_path).await;
            return Err(AppError::StorageWrite(e.to_string()));
        }

        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "Saved message store"
        );
        Ok(())
    }

    async fn submit(&self, key: SubmitterKey, record: MessageRecord) -> Result<SubmitReceipt> {
        let _guard = match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let LoadedStore { mut messages, warning } = self.load().await?;
        let key_name = key.as_str().to_string();

        append(&mut messages, key, record);
        self.save(&messages).await?;

        Ok(SubmitReceipt {
            records_for_key: messages.get(&key_name).map(Vec::len).unwrap_or(0),
            load_warning: warning,
        })
    }
}
