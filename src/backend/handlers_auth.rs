//! Gestion des routes nécessitant une authentification utilisateur.
//! Les tableaux de bord et les opérations d'administration vérifient tous
//! l'identité de session et le rôle exigé avant de toucher aux collections.

use axum::{
    extract::{Extension, Form, Path, Query},
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
use crate::models::{AppointmentId, Role, UserId};
use crate::repo::{appointment, message, user, RepoError};
use crate::store::Store;
use crate::utils::error_messages::STORE_ERROR;
use crate::utils::validation::{EmailInput, PasswordInput, TextInput};

#[derive(Deserialize)]
pub struct BookForm {
    pub doctor_id: UserId,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize)]
pub struct CreateUserForm {
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
pub struct EditUserForm {
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

/// Tableau de bord du patient: ses rendez-vous et la liste des médecins
/// pour en prendre un nouveau
pub async fn patient_dashboard(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Result<impl IntoResponse> {
    let identity = auth::authorize(&session, Some(Role::Patient)).await?;

    let appointments = appointment::list_for_patient(&store, identity.user_id);
    let doctors: Vec<_> = user::doctors(&store)
        .into_iter()
        .map(|d| json!({ "id": d.id, "name": d.name, "specialty": d.specialty }))
        .collect();

    let notice = params.get("notice").and_then(|code| match code.as_str() {
        "booked" => Some("Appointment requested."),
        _ => None,
    });
    let error = params.get("error").and_then(|code| match code.as_str() {
        "invalid_booking" => Some("Please pick a doctor, a date and a reason."),
        _ => None,
    });

    let data = json!({
        "name": identity.name,
        "appointments": appointments,
        "doctors": doctors,
        "notice": notice,
        "error": error,
    });
    render("patient_dashboard", &data)
}

/// Enregistre une demande de rendez-vous pour le patient connecté
pub async fn book_appointment(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
    Form(form): Form<BookForm>,
) -> axum::response::Result<Redirect> {
    let identity = auth::authorize(&session, Some(Role::Patient)).await?;

    let date = TextInput::new_short_form(&form.date);
    let reason = TextInput::new_long_form(&form.reason);
    let (Ok(date), Ok(reason)) = (date, reason) else {
        return Ok(Redirect::to("/patient?error=invalid_booking"));
    };

    appointment::book(
        &store,
        identity.user_id,
        form.doctor_id,
        date.to_string(),
        reason.to_string(),
    )
    .map_err(|e| {
        log::error!("Prise de rendez-vous impossible: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, STORE_ERROR)
    })?;

    Ok(Redirect::to("/patient?notice=booked"))
}

/// Agenda du médecin connecté
pub async fn doctor_dashboard(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
) -> axum::response::Result<impl IntoResponse> {
    let identity = auth::authorize(&session, Some(Role::Doctor)).await?;

    let appointments = appointment::list_for_doctor(&store, identity.user_id);
    let data = json!({
        "name": identity.name,
        "appointments": appointments,
    });
    render("doctor_dashboard", &data)
}

/// Tableau de bord d'administration: comptes, rendez-vous et messages.
/// Les hachés de mots de passe ne sont jamais transmis au rendu.
pub async fn admin_dashboard(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Result<impl IntoResponse> {
    auth::authorize(&session, Some(Role::Admin)).await?;

    let users: Vec<_> = user::list(&store)
        .into_iter()
        .map(|u| {
            json!({
                "id": u.id,
                "name": u.name,
                "email": u.email,
                "role": u.role,
                "specialty": u.specialty,
                "phone": u.phone,
            })
        })
        .collect();
    let appointments = appointment::list_all(&store);
    let messages = message::list(&store);

    let data = json!({
        "users": users,
        "appointments": appointments,
        "messages": messages,
        "notice": admin_notice(&params),
        "error": admin_error(&params),
    });
    render("admin_dashboard", &data)
}

/// Création d'un compte par l'administrateur. Tous les champs principaux
/// sont requis et tout rôle est permis, contrairement à l'inscription libre.
pub async fn create_user(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
    Form(form): Form<CreateUserForm>,
) -> axum::response::Result<Redirect> {
    auth::authorize(&session, Some(Role::Admin)).await?;

    let Ok(name) = TextInput::new_short_form(&form.name) else {
        return Ok(Redirect::to("/admin?error=missing_fields"));
    };
    let Ok(email) = EmailInput::new(&form.email) else {
        return Ok(Redirect::to("/admin?error=invalid_email"));
    };
    let Ok(password) = PasswordInput::new(&form.password) else {
        return Ok(Redirect::to("/admin?error=weak_password"));
    };
    let Some(role) = parse_role(&form.role) else {
        return Ok(Redirect::to("/admin?error=invalid_role"));
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
        Ok(_) => Ok(Redirect::to("/admin?notice=user_created")),
        Err(RepoError::DuplicateEmail) => Ok(Redirect::to("/admin?error=email_taken")),
        Err(e) => {
            log::error!("Création de compte impossible: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, STORE_ERROR).into())
        }
    }
}

/// Modification partielle d'un compte: un champ laissé vide dans le
/// formulaire signifie « conserver la valeur actuelle ».
pub async fn edit_user(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
    Path(user_id): Path<UserId>,
    Form(form): Form<EditUserForm>,
) -> axum::response::Result<Redirect> {
    auth::authorize(&session, Some(Role::Admin)).await?;

    let email = match form.email.trim() {
        "" => None,
        raw => match EmailInput::new(raw) {
            Ok(email) => Some(email.to_string()),
            Err(_) => return Ok(Redirect::to("/admin?error=invalid_email")),
        },
    };
    let password = match form.password.as_str() {
        "" => None,
        raw => match PasswordInput::new(raw) {
            Ok(password) => Some(password.into_string()),
            Err(_) => return Ok(Redirect::to("/admin?error=weak_password")),
        },
    };
    let role = match form.role.trim() {
        "" => None,
        raw => match parse_role(raw) {
            Some(role) => Some(role),
            None => return Ok(Redirect::to("/admin?error=invalid_role")),
        },
    };

    let patch = user::UserPatch {
        name: non_empty(form.name),
        email,
        password,
        role,
        specialty: non_empty(form.specialty),
        phone: non_empty(form.phone),
    };

    match user::update(&store, user_id, patch) {
        Ok(_) => Ok(Redirect::to("/admin?notice=user_updated")),
        Err(RepoError::NotFound) => Ok(Redirect::to("/admin?error=user_not_found")),
        Err(RepoError::DuplicateEmail) => Ok(Redirect::to("/admin?error=email_taken")),
        Err(e) => {
            log::error!("Modification de compte impossible: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, STORE_ERROR).into())
        }
    }
}

/// Suppression d'un compte. Les rendez-vous qui le référencent restent en
/// place et se rendent avec des champs vides.
pub async fn delete_user(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
    Path(user_id): Path<UserId>,
) -> axum::response::Result<Redirect> {
    auth::authorize(&session, Some(Role::Admin)).await?;

    match user::delete(&store, user_id) {
        Ok(()) => Ok(Redirect::to("/admin?notice=user_deleted")),
        Err(RepoError::NotFound) => Ok(Redirect::to("/admin?error=user_not_found")),
        Err(e) => {
            log::error!("Suppression de compte impossible: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, STORE_ERROR).into())
        }
    }
}

/// Suppression d'un rendez-vous par l'administrateur
pub async fn delete_appointment(
    session: Session,
    Extension(store): Extension<Arc<Store>>,
    Path(appointment_id): Path<AppointmentId>,
) -> axum::response::Result<Redirect> {
    auth::authorize(&session, Some(Role::Admin)).await?;

    match appointment::delete(&store, appointment_id) {
        Ok(()) => Ok(Redirect::to("/admin?notice=appointment_deleted")),
        Err(RepoError::NotFound) => Ok(Redirect::to("/admin?error=appointment_not_found")),
        Err(e) => {
            log::error!("Suppression de rendez-vous impossible: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, STORE_ERROR).into())
        }
    }
}

fn parse_role(raw: &str) -> Option<Role> {
    match raw {
        "patient" => Some(Role::Patient),
        "doctor" => Some(Role::Doctor),
        "admin" => Some(Role::Admin),
        _ => None,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn admin_notice(params: &HashMap<String, String>) -> Option<&'static str> {
    params.get("notice").and_then(|code| match code.as_str() {
        "user_created" => Some("User created successfully."),
        "user_updated" => Some("User updated successfully."),
        "user_deleted" => Some("User deleted successfully."),
        "appointment_deleted" => Some("Appointment deleted successfully."),
        _ => None,
    })
}

fn admin_error(params: &HashMap<String, String>) -> Option<&'static str> {
    params.get("error").and_then(|code| match code.as_str() {
        "missing_fields" => Some("All fields are required."),
        "invalid_email" => Some("Please enter a valid email address."),
        "weak_password" => Some("Password must be at least 6 characters."),
        "invalid_role" => Some("Please choose a valid role."),
        "email_taken" => Some("Email already exists."),
        "user_not_found" => Some("User not found."),
        "appointment_not_found" => Some("Appointment not found."),
        _ => None,
    })
}
