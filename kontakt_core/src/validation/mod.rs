//! Presence checks for the contact form

pub mod rules;

pub use rules::not_blank;

use std::fmt;

use validator::{Validate, ValidationErrors};

use crate::models::{ContactForm, FormInput};

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Chyba: Jméno, příjmení a zpráva jsou povinná pole. Prosím, doplňte je.";

/// Struct field to form field name, in the order the form shows them.
const REQUIRED_FIELDS: [(&str, &str); 3] = [
    ("given_name", "jmeno"),
    ("surname", "prijmeni"),
    ("message", "zprava"),
];

/// A required field was missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    missing_fields: Vec<&'static str>,
}

impl ContactValidationError {
    pub fn message(&self) -> &'static str {
        REQUIRED_FIELDS_MESSAGE
    }

    /// Form field names (`jmeno`, `prijmeni`, `zprava`) that failed.
    pub fn missing_fields(&self) -> &[&'static str] {
        &self.missing_fields
    }

    fn from_validation_errors(errors: &ValidationErrors) -> Self {
        let failed: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, _)| {
                let name: &str = &field;
                name.to_string()
            })
            .collect();

        let missing_fields = REQUIRED_FIELDS
            .iter()
            .filter(|(field, _)| failed.iter().any(|f| f == field))
            .map(|(_, form_name)| *form_name)
            .collect();

        Self { missing_fields }
    }
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (missing: {})", self.message(), self.missing_fields.join(", "))
    }
}

impl std::error::Error for ContactValidationError {}

/// Validates already-defaulted input. On failure the caller keeps `input`
/// for re-display.
pub fn validate_input(input: &FormInput) -> Result<(), ContactValidationError> {
    input
        .validate()
        .map_err(|errors| ContactValidationError::from_validation_errors(&errors))
}

/// Applies defaults to a raw submission and validates it.
pub fn validate_contact(form: ContactForm) -> Result<FormInput, (FormInput, ContactValidationError)> {
    let input = FormInput::from_submission(form);
    match validate_input(&input) {
        Ok(()) => Ok(input),
        Err(err) => Err((input, err)),
    }
}
