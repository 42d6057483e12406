//! Configuration des routes pour l'application.
//! Définit les routes accessibles avec ou sans authentification et configure les middlewares.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::backend::handlers_auth::{
    admin_dashboard, book_appointment, create_user, delete_appointment, delete_user,
    doctor_dashboard, edit_user, patient_dashboard,
};
use crate::backend::handlers_unauth::{
    about_page, contact_page, contact_submit, index, login, login_page, logout, register,
    register_page,
};

/// Initialisation du routeur principal et des middlewares
pub fn get_router() -> Router {
    // Configuration CORS pour permettre les requêtes de n'importe quelle origine (en mode debug uniquement)
    let router = if cfg!(debug_assertions) {
        let cors = CorsLayer::new()
            .allow_methods(tower_http::cors::AllowMethods::any())
            .allow_origin(Any);
        Router::new().layer(cors)
    } else {
        Router::new()
    };

    // Configuration des sessions en mémoire, cookie accessible au seul serveur
    let session_store = MemoryStore::default();
    let session_manager = SessionManagerLayer::new(session_store).with_http_only(true);

    router
        .merge(unauth_routes())
        .merge(auth_routes())
        .layer(session_manager)
}

/// Routes accessibles sans authentification
fn unauth_routes() -> Router {
    Router::new()
        .route("/", get(index)) // Page d'accueil
        .route("/about", get(about_page)) // Présentation de la clinique
        .route("/contact", get(contact_page).post(contact_submit)) // Formulaire de contact
        .route("/register", get(register_page).post(register)) // Inscription
        .route("/login", get(login_page).post(login)) // Connexion
        .route("/logout", get(logout)) // Déconnexion
}

/// Routes protégées: chaque handler vérifie l'identité de session et le rôle
/// exigé avant de toucher aux données
fn auth_routes() -> Router {
    Router::new()
        .route("/patient", get(patient_dashboard)) // Tableau de bord du patient
        .route("/patient/book", post(book_appointment)) // Prise de rendez-vous
        .route("/doctor", get(doctor_dashboard)) // Agenda du médecin
        .route("/admin", get(admin_dashboard)) // Tableau de bord d'administration
        .route("/admin/create_user", post(create_user)) // Création d'un compte
        .route("/admin/edit_user/:user_id", post(edit_user)) // Modification d'un compte
        .route("/admin/delete_user/:user_id", post(delete_user)) // Suppression d'un compte
        .route("/admin/delete_appointment/:appointment_id", post(delete_appointment)) // Suppression d'un rendez-vous
}
