//! Persistence for submitted contact messages

pub mod json_file;

pub use json_file::{encode_store, JsonFileStore};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{append, MessageRecord, MessageStore, SubmitterKey};

/// A loaded store. `warning` is set when the backing data could not be read
/// or parsed and an empty store was substituted.
#[derive(Debug, Clone, Default)]
pub struct LoadedStore {
    pub messages: MessageStore,
    pub warning: Option<String>,
}

impl LoadedStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn recovered(warning: String) -> Self {
        Self {
            messages: MessageStore::new(),
            warning: Some(warning),
        }
    }
}

/// Result of persisting one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Records stored under the submitter's key, including the new one.
    pub records_for_key: usize,
    pub load_warning: Option<String>,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Unreadable or unparsable data degrades to an empty store plus
    /// warning. Data that parses but does not have the store's shape is a
    /// `StorageRead` error, so nothing overwrites it.
    async fn load(&self) -> Result<LoadedStore>;

    /// Replaces the persisted document with `store`.
    async fn save(&self, store: &MessageStore) -> Result<()>;

    /// Load, append, save. Implementations that can serialize writers
    /// should override this.
    async fn submit(&self, key: SubmitterKey, record: MessageRecord) -> Result<SubmitReceipt> {
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
