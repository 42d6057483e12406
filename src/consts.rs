//! Définition des constantes globales pour l'application.

pub const HTTP_PORT: u16 = 8080; // Port par défaut pour le serveur HTTP.

pub const DATA_DIR: &str = "./data"; // Répertoire des collections persistées.
pub const USERS_FILE: &str = "users.json"; // Collection des utilisateurs.
pub const APPOINTMENTS_FILE: &str = "appointments.json"; // Collection des rendez-vous.
pub const MESSAGES_FILE: &str = "messages.json"; // Collection des messages de contact.

// Compte créé au démarrage si aucun administrateur n'existe.
pub const BOOTSTRAP_ADMIN_NAME: &str = "Admin";
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@example.com";
pub const BOOTSTRAP_ADMIN_PASSWORD: &str = "admin123";

pub const MESSAGE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S"; // Horodatage des messages de contact.
