//! Module principal pour le backend de l'application.
//! Contient la garde d'accès, le routeur et les handlers des routes.

pub mod auth;
pub mod handlers_auth;
pub mod handlers_unauth;
pub mod router;

use axum::http::StatusCode;
use axum::response::Html;

use crate::utils::error_messages::PAGE_ERROR;
use crate::HBS;

/// Rend un template enregistré avec les données fournies.
pub(crate) fn render(
    template: &str,
    data: &serde_json::Value,
) -> axum::response::Result<Html<String>> {
    HBS.render(template, data).map(Html).map_err(|e| {
        log::error!("Rendu du template {template} impossible: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, PAGE_ERROR).into()
    })
}
