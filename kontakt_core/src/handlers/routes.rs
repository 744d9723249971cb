//! Page routes

use axum::{http::Uri, response::Html, routing::get, Router};
use tracing::debug;

use super::contact::{show_contact, submit_contact};
use crate::{error::AppError, views, AppState};

pub const CONTACT_PATH: &str = "/kontakt";
pub const CONTACT_SUCCESS_PATH: &str = "/kontakt?success=true";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_home))
        .route("/kocky", get(handle_gallery))
        .route(CONTACT_PATH, get(show_contact).post(submit_contact))
        .fallback(handle_not_found)
}

async fn handle_home() -> Html<String> {
    debug!("GET /");
    Html(views::home_page())
}

async fn handle_gallery() -> Html<String> {
    debug!("GET /kocky");
    Html(views::gallery_page())
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
