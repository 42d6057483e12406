//! Garde d'accès: identité portée par la session et contrôle de rôle.
//!
//! Chaque handler protégé appelle [`authorize`] en tête d'opération. Les
//! deux refus restent distincts: sans identité, l'utilisateur est renvoyé
//! vers la page de connexion; avec un rôle insuffisant, se reconnecter ne
//! changerait rien et la requête est simplement refusée.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tower_sessions::Session;

use crate::models::{Role, User, UserId};

// Clés de session
const SESSION_USER_ID: &str = "user_id";
const SESSION_ROLE: &str = "role";
const SESSION_NAME: &str = "name";

/// L'identité validée extraite de la session.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
    pub name: String,
}

/// Un refus d'accès, volontairement sans détail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("Authentification requise")]
    Unauthenticated,

    #[error("Accès refusé")]
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => Redirect::to("/login?error=login_required").into_response(),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
        }
    }
}

/// Extrait l'identité de la session puis, si un rôle est exigé, le compare
/// au rôle enregistré. Une session illisible vaut une absence de session.
pub async fn authorize(session: &Session, required: Option<Role>) -> Result<Identity, AuthRejection> {
    let user_id: UserId = session
        .get(SESSION_USER_ID)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::Unauthenticated)?;
    let role: Role = session
        .get(SESSION_ROLE)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::Unauthenticated)?;
    let name: String = session
        .get(SESSION_NAME)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    if let Some(required) = required {
        if role != required {
            return Err(AuthRejection::Forbidden);
        }
    }

    Ok(Identity { user_id, role, name })
}

/// Enregistre l'identité dans la session après une connexion réussie.
pub async fn set_identity(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(SESSION_USER_ID, user.id).await?;
    session.insert(SESSION_ROLE, user.role).await?;
    session.insert(SESSION_NAME, &user.name).await?;
    Ok(())
}

/// Efface la session, qu'elle ait porté une identité ou non.
pub async fn clear_identity(session: &Session) {
    if let Err(e) = session.flush().await {
        log::warn!("Fermeture de session impossible: {e}");
    }
}

/// Destination après connexion, selon le rôle.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Patient => "/patient",
        Role::Doctor => "/doctor",
        Role::Admin => "/admin",
    }
}
