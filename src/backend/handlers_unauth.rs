//! Gestion des routes accessibles sans authentification.
//! Contient les handlers pour les pages publiques, l'inscription,
//! la connexion et le formulaire de contact.

use axum::{
    extract::{Extension, Form, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tower_sessions::Session;

use crate::backend::auth;
use crate::backend::render;
use crate::models::Role;
use crate::repo::{message, user, RepoError};
use crate::store::Store;
use crate::utils::error_messages::{CONTACT_ERROR, LOGIN_ERROR, REGISTRATION_ERROR};
use crate::utils::passwords;
use crate::utils::validation::{EmailInput, PasswordInput, TextInput};

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Affiche la page d'accueil, avec l'état de connexion pour la navigation
pub async fn index(session: Session) -> axum::response::Result<impl IntoResponse> {
    let identity = auth::authorize(&session, None).await.ok();
    let data = json!({
        "logged_in": identity.is_some(),
        "name": identity.as_ref().map(|i| i.name.clone()),
        "dashboard": identity.as_ref().map(|i| auth::landing_path(i.role)),
    });
    render("index", &data)
}

/// Affiche la page de présentation de la clinique
pub async fn about_page() -> axum::response::Result<impl IntoResponse> {
    render("about", &json!({}))
}

/// Affiche le formulaire de contact
pub async fn contact_page() -> axum::response::Result<impl IntoResponse> {
    render("contact", &json!({}))
}

/// Reçoit un message de contact et re-rend la même page avec le résultat
pub async fn contact_submit(
    Extension(store): Extension<Arc<Store>>,
    Form(form): Form<ContactForm>,
) -> axum::response::Result<impl IntoResponse> {
    let name = TextInput::new_short_form(&form.name);
    let email = EmailInput::new(&form.email);
    let body = TextInput::new_long_form(&form.message);

    let (Ok(name), Ok(email), Ok(body)) = (name, email, body) else {
        return render("contact", &json!({ "error": "Please fill all fields." }));
    };

    message::add(&store, name.to_string(), email.to_string(), body.to_string()).map_err(|e| {
        log::error!("Enregistrement du message impossible: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, CONTACT_ERROR)
    })?;

    render("contact", &json!({ "success": "Message sent successfully!" }))
}

/// Affiche la page d'inscription avec des messages contextuels si présents
pub async fn register_page(
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Result<impl IntoResponse> {
    let error = params.get("error").and_then(|code| match code.as_str() {
        "missing_fields" => Some("Please fill all required fields."),
        "invalid_email" => Some("Please enter a valid email address."),
        "weak_password" => Some("Password must be at least 6 characters."),
        "invalid_role" => Some("Please choose a valid role."),
        "email_taken" => Some("Email already used."),
        _ => None,
    });
    render("register", &json!({ "error": error }))
}

/// Crée un compte patient ou médecin après validation des entrées.
/// L'inscription libre ne permet jamais de créer un administrateur.
pub async fn register(
    Extension(store): Extension<Arc<Store>>,
    Form(form): Form<RegisterForm>,
) -> axum::response::Result<Redirect> {
    let Ok(name) = TextInput::new_short_form(&form.name) else {
        return Ok(Redirect::to("/register?error=missing_fields"));
    };
    let Ok(email) = EmailInput::new(&form.email) else {
        return Ok(Redirect::to("/register?error=invalid_email"));
    };
    let Ok(password) = PasswordInput::new(&form.password) else {
        return Ok(Redirect::to("/register?error=weak_password"));
    };
    let role = match form.role.as_str() {
        "patient" => Role::Patient,
        "doctor" => Role::Doctor,
        _ => return Ok(Redirect::to("/register?error=invalid_role")),
    };

    let candidate = user::NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: password.into_string(),
        role,
        specialty: form.specialty,
        phone: form.phone,
    };

    match user::create(&store, candidate) {
        Ok(_) => Ok(Redirect::to("/login?notice=account_created")),
        Err(RepoError::DuplicateEmail) => Ok(Redirect::to("/register?error=email_taken")),
        Err(e) => {
            log::error!("Création de compte impossible: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, REGISTRATION_ERROR).into())
        }
    }
}

/// Affiche la page de connexion avec des messages contextuels si présents
pub async fn login_page(
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Result<impl IntoResponse> {
    let notice = params.get("notice").and_then(|code| match code.as_str() {
        "account_created" => Some("Account created! Please login."),
        _ => None,
    });
    let error = params.get("error").and_then(|code| match code.as_str() {
        "login_required" => Some("Please login first."),
        "invalid_credentials" => Some("Invalid credentials"),
        _ => None,
    });
    render("login", &json!({ "notice": notice, "error": error }))
}

/// Vérifie les identifiants et ouvre la session.
///
/// Le mot de passe est toujours passé à la vérification, même sans compte
/// correspondant, pour que l'échec prenne un temps comparable.
pub async fn login(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
    Form(form): Form<LoginForm>,
) -> axum::response::Result<Redirect> {
    let found = user::find_by_email(&store, &form.email);
    let verified = passwords::verify(&form.password, found.as_ref().map(|u| &u.password_hash));

    let Some(user) = found.filter(|_| verified) else {
        return Ok(Redirect::to("/login?error=invalid_credentials"));
    };

    auth::set_identity(&session, &user).await.map_err(|e| {
        log::error!("Ecriture de session impossible: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, LOGIN_ERROR)
    })?;

    log::info!("Connexion de {} ({})", user.email, user.role);
    Ok(Redirect::to(auth::landing_path(user.role)))
}

/// Gère la déconnexion de l'utilisateur, sans condition sur l'état courant
pub async fn logout(session: Session) -> impl IntoResponse {
    auth::clear_identity(&session).await;
    Redirect::to("/")
}
