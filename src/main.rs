//! Point d'entrée principal de l'application.
//! Ouvre le magasin de données, garantit l'existence d'un compte
//! administrateur, configure Handlebars pour le rendu des templates,
//! et démarre le serveur web avec Axum.

mod backend;
mod consts;
mod models;
mod repo;
mod store;
mod utils;

use std::{net::SocketAddr, sync::Arc};

use axum::Extension;
use dotenv::dotenv;
use handlebars::Handlebars;
use log::info;
use once_cell::sync::Lazy;

use crate::consts::{DATA_DIR, HTTP_PORT};
use crate::store::Store;

// Initialisation de Handlebars pour le rendu des templates
static HBS: Lazy<Handlebars> = Lazy::new(|| {
    let mut hbs = Handlebars::new();
    hbs.register_templates_directory(".hbs", "templates/")
        .expect("Could not register template directory");
    hbs
});

#[tokio::main]
async fn main() {
    // Charger les variables d'environnement
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Ouvrir les collections persistées
    let store = Store::open(DATA_DIR).expect("Failed to open the data directory");

    // L'invariant « au moins un administrateur » doit tenir avant la première requête
    repo::user::ensure_admin(&store).expect("Failed to bootstrap the admin account");

    // Le magasin est partagé entre les handlers via une extension
    let app = backend::router::get_router().layer(Extension(Arc::new(store)));

    // Démarrer le serveur web
    let addr = SocketAddr::from(([0, 0, 0, 0], HTTP_PORT));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to open web server listener");

    axum::serve(listener, app)
        .await
        .expect("Failed to bind Axum to listener");
}
