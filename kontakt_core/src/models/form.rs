//! Contact form payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::not_blank;

pub const DEFAULT_COUNTRY: &str = "Czech Republic";
pub const DEFAULT_GENDER: &str = "male";

/// Raw `application/x-www-form-urlencoded` body of `POST /kontakt`.
/// Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub jmeno: Option<String>,
    pub prijmeni: Option<String>,
    pub datum: Option<String>,
    pub email: Option<String>,
    pub stat: Option<String>,
    pub pohlavi: Option<String>,
    pub zprava: Option<String>,
}

/// Form values with defaults applied. Feeds record construction and
/// re-populates the form when a submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct FormInput {
    #[validate(custom(function = "not_blank"))]
    pub given_name: String,
    #[validate(custom(function = "not_blank"))]
    pub surname: String,
    pub birth_date: String,
    pub email: String,
    pub country: String,
    pub gender: String,
    #[validate(custom(function = "not_blank"))]
    pub message: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            given_name: String::new(),
            surname: String::new(),
            birth_date: String::new(),
            email: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            gender: DEFAULT_GENDER.to_string(),
            message: String::new(),
        }
    }
}

impl FormInput {
    /// Applies defaults, then overlays whatever the visitor sent. An empty
    /// country or gender keeps its default.
    pub fn from_submission(form: ContactForm) -> Self {
        let mut input = Self::default();

        if let Some(value) = form.jmeno {
            input.given_name = value;
        }
        if let Some(value) = form.prijmeni {
            input.surname = value;
        }
        if let Some(value) = form.datum {
            input.birth_date = value;
        }
        if let Some(value) = form.email {
            input.email = value;
        }
        if let Some(value) = form.stat.filter(|v| !v.trim().is_empty()) {
            input.country = value;
        }
        if let Some(value) = form.pohlavi.filter(|v| !v.trim().is_empty()) {
            input.gender = value;
        }
        if let Some(value) = form.zprava {
            input.message = value;
        }

        input
    }
}

impl From<ContactForm> for FormInput {
    fn from(form: ContactForm) -> Self {
        Self::from_submission(form)
    }
}
