//! Utilitaires transverses: validation des entrées, hachage des mots de
//! passe et messages d'erreur.

pub mod error_messages;
pub mod passwords;
pub mod validation;
