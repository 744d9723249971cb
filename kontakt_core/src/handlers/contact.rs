//! `GET` and `POST /kontakt`

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::routes::CONTACT_SUCCESS_PATH;
use crate::{
    error::AppError,
    models::{record_count, ContactForm, FormInput},
    services::Submission,
    views::{contact_page, ContactPage},
    AppState,
};

const LOAD_NOTICE: &str = "Upozornění: uložené zprávy se nepodařilo načíst.";

#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    pub success: Option<String>,
}

impl ContactQuery {
    fn is_success(&self) -> bool {
        self.success.as_deref().is_some_and(|v| !v.is_empty())
    }
}

pub async fn show_contact(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> Html<String> {
    let warning = match state.contact_service.load_messages().await {
        Ok(loaded) => {
            debug!(
                keys = loaded.messages.len(),
                records = record_count(&loaded.messages),
                "GET /kontakt - loaded message store"
            );
            loaded.warning
        }
        Err(err) => {
            warn!("GET /kontakt - {}", err);
            Some(err.to_string())
        }
    };

    let notice = warning
        .filter(|_| state.debug)
        .map(|warning| format!("{} ({})", LOAD_NOTICE, warning));

    let page = ContactPage::new(FormInput::default())
        .with_success(query.is_success())
        .with_notice(notice);

    Html(contact_page(&page))
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Response {
    match state.contact_service.submit(form).await {
        Submission::Stored { key, .. } => {
            info!("POST /kontakt - stored message from {}", key);
            Redirect::to(CONTACT_SUCCESS_PATH).into_response()
        }
        Submission::Rejected { input, error } => {
            let mut page = ContactPage::new(input).with_error(error.user_message());
            if let AppError::Validation(err) = &error {
                page = page.with_invalid_fields(err.missing_fields());
            }
            Html(contact_page(&page)).into_response()
        }
    }
}
