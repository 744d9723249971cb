use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    error::{AppError, Result},
    models::{ContactForm, FormInput, MessageRecord, SubmitterKey},
    storage::{LoadedStore, MessageRepository, SubmitReceipt},
    validation::validate_contact,
};

/// What happened to one contact-form submission.
#[derive(Debug)]
pub enum Submission {
    Stored {
        key: SubmitterKey,
        receipt: SubmitReceipt,
    },
    /// Nothing was persisted. `input` holds the entered values for the form.
    Rejected { input: FormInput, error: AppError },
}

#[derive(Clone)]
pub struct ContactService {
    repository: Arc<dyn MessageRepository>,
}

impl ContactService {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    pub async fn load_messages(&self) -> Result<LoadedStore> {
        self.repository.load().await
    }

    pub async fn submit(&self, form: ContactForm) -> Submission {
        let input = match validate_contact(form) {
            Ok(input) => input,
            Err((input, err)) => {
                info!(missing = ?err.missing_fields(), "Rejected contact submission");
                return Submission::Rejected {
                    input,
                    error: AppError::Validation(err),
                };
            }
        };

        let key = SubmitterKey::from(&input);
        let record = MessageRecord::from_input(&input);

        match self.repository.submit(key.clone(), record).await {
            Ok(receipt) => {
                if let Some(warning) = &receipt.load_warning {
                    warn!("Stored submission over unreadable data: {}", warning);
                }
                info!(
                    key = %key,
                    records_for_key = receipt.records_for_key,
                    "Stored contact message"
                );
                Submission::Stored { key, receipt }
            }
            Err(error) => {
                tracing::error!(key = %key, "Failed to store contact message: {}", error);
                Submission::Rejected { input, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingRepository {
        saves: AtomicUsize,
    }

    #[async_trait]
    impl MessageRepository for CountingRepository {
        async fn load(&self) -> Result<LoadedStore> {
            Ok(LoadedStore::empty())
        }

        async fn save(&self, _store: &MessageStore) -> Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl MessageRepository for FailingRepository {
        async fn load(&self) -> Result<LoadedStore> {
            Ok(LoadedStore::empty())
        }

        async fn save(&self, _store: &MessageStore) -> Result<()> {
            Err(AppError::StorageWrite("disk full".to_string()))
        }
    }

    fn form(jmeno: &str, prijmeni: &str, zprava: &str) -> ContactForm {
        ContactForm {
            jmeno: Some(jmeno.to_string()),
            prijmeni: Some(prijmeni.to_string()),
            zprava: Some(zprava.to_string()),
            ..ContactForm::default()
        }
    }

    #[tokio::test]
    async fn test_valid_submission_is_saved() {
        let repository = Arc::new(CountingRepository::default());
        let service = ContactService::new(repository.clone());

        match service.submit(form("Jana", "Nová", "Ahoj")).await {
            Submission::Stored { key, receipt } => {
                assert_eq!(key.as_str(), "Nová Jana");
                assert_eq!(receipt.records_for_key, 1);
            }
            other => panic!("expected stored submission, got {:?}", other),
        }
        assert_eq!(repository.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_never_touches_storage() {
        let repository = Arc::new(CountingRepository::default());
        let service = ContactService::new(repository.clone());

        match service.submit(form("Jana", "Nová", "")).await {
            Submission::Rejected { input, error } => {
                assert!(matches!(error, AppError::Validation(_)));
                assert_eq!(input.given_name, "Jana");
                assert_eq!(input.surname, "Nová");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    }

    struct ForeignDocumentRepository;

    #[async_trait]
    impl MessageRepository for ForeignDocumentRepository {
        async fn load(&self) -> Result<LoadedStore> {
            Err(AppError::StorageRead("not a message store".to_string()))
        }

        async fn save(&self, _store: &MessageStore) -> Result<()> {
            panic!("save must not run after a failed load");
        }
    }

    #[tokio::test]
    async fn test_unreadable_store_rejects_without_saving() {
        let service = ContactService::new(Arc::new(ForeignDocumentRepository));

        match service.submit(form("Jana", "Nová", "Ahoj")).await {
            Submission::Rejected { input, error } => {
                assert!(matches!(error, AppError::StorageRead(_)));
                assert_eq!(input.surname, "Nová");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_input() {
        let service = ContactService::new(Arc::new(FailingRepository));

        match service.submit(form("Jana", "Nová", "Ahoj")).await {
            Submission::Rejected { input, error } => {
                assert!(matches!(error, AppError::StorageWrite(_)));
                assert_eq!(input.message, "Ahoj");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
