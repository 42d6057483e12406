//! Modèle de données du portail.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::passwords::PwHash;

/// Role d'un utilisateur: Patient, Médecin ou Admin.
///
/// Les rôles sont sérialisés en minuscules, tels qu'ils circulent dans les
/// formulaires et les fichiers de données.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

/// Etat d'un rendez-vous. Un enregistrement sans statut est lu comme
/// `Pending`, la valeur donnée à toute nouvelle prise de rendez-vous.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

/// Un identifiant unique d'utilisateur.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Un identifiant unique de rendez-vous.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct AppointmentId(Uuid);

impl AppointmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Un identifiant unique de message de contact.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Les données associées à un utilisateur.
///
/// Le mot de passe n'est jamais conservé en clair, seul son haché est
/// enregistré. La spécialité n'a de sens que pour un médecin; pour les
/// autres rôles elle reste vide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: PwHash,
    pub role: Role,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub phone: String,
}

impl User {
    pub fn is_doctor(&self) -> bool {
        matches!(self.role, Role::Doctor)
    }
}

/// Un rendez-vous entre un patient et un médecin.
///
/// Les deux références sont de simples identifiants: un utilisateur supprimé
/// laisse le rendez-vous en place, avec une référence qui ne résout plus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: UserId,
    pub doctor_id: UserId,
    pub date: String,
    pub reason: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// Un message laissé par le formulaire de contact public.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: String,
}
