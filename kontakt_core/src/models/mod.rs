pub mod form;
pub mod message;

pub use form::{ContactForm, FormInput, DEFAULT_COUNTRY, DEFAULT_GENDER};
pub use message::{append, record_count, MessageRecord, MessageStore, SubmitterKey};
