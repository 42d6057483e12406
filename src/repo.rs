//! Opérations par entité au-dessus du magasin d'enregistrements.
//!
//! Chaque opération recharge sa collection depuis le disque, applique sa
//! logique et réécrit la séquence complète. Aucun cache: entre deux requêtes
//! le fichier reste la seule source de vérité.

use std::io;

use thiserror::Error;

use crate::store::Store;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Enregistrement introuvable")]
    NotFound,

    #[error("Adresse e-mail déjà utilisée")]
    DuplicateEmail,

    #[error(transparent)]
    Io(#[from] io::Error),
}

// Gestion des utilisateurs
pub mod user {
    use super::*;
    use crate::consts;
    use crate::models::{Role, User, UserId};
    use crate::utils::passwords;
    use log::{info, warn};

    /// Champs fournis à la création d'un compte. L'identifiant et le haché
    /// du mot de passe sont dérivés ici.
    pub struct NewUser {
        pub name: String,
        pub email: String,
        pub password: String,
        pub role: Role,
        pub specialty: String,
        pub phone: String,
    }

    /// Mise à jour partielle d'un compte: un champ absent garde sa valeur.
    #[derive(Default)]
    pub struct UserPatch {
        pub name: Option<String>,
        pub email: Option<String>,
        pub password: Option<String>,
        pub role: Option<Role>,
        pub specialty: Option<String>,
        pub phone: Option<String>,
    }

    pub fn find_by_id(store: &Store, id: UserId) -> Option<User> {
        store.users.load().into_iter().find(|u| u.id == id)
    }

    /// Recherche par adresse e-mail, insensible à la casse.
    pub fn find_by_email(store: &Store, email: &str) -> Option<User> {
        let needle = email.to_lowercase();
        store
            .users
            .load()
            .into_iter()
            .find(|u| u.email.to_lowercase() == needle)
    }

    pub fn list(store: &Store) -> Vec<User> {
        store.users.load()
    }

    pub fn doctors(store: &Store) -> Vec<User> {
        store
            .users
            .load()
            .into_iter()
            .filter(User::is_doctor)
            .collect()
    }

    /// Garantit qu'au moins un compte administrateur existe. La garde
    /// s'appuie sur les données elles-mêmes, pas sur un drapeau en mémoire:
    /// l'opération reste idempotente à travers les redémarrages.
    pub fn ensure_admin(store: &Store) -> io::Result<()> {
        store.users.update(|users| {
            if users.iter().any(|u| u.role == Role::Admin) {
                return;
            }

            let admin = User {
                id: UserId::new(),
                name: consts::BOOTSTRAP_ADMIN_NAME.to_string(),
                email: consts::BOOTSTRAP_ADMIN_EMAIL.to_string(),
                password_hash: passwords::hash(consts::BOOTSTRAP_ADMIN_PASSWORD),
                role: Role::Admin,
                specialty: String::new(),
                phone: String::new(),
            };
            warn!(
                "Aucun administrateur trouvé, création de {} avec le mot de passe par défaut",
                admin.email
            );
            users.push(admin);
        })
    }

    /// Crée un utilisateur après contrôle d'unicité de l'adresse e-mail.
    /// Le haché est calculé avant la prise du verrou de collection.
    pub fn create(store: &Store, candidate: NewUser) -> Result<User, RepoError> {
        let password_hash = passwords::hash(&candidate.password);

        // La spécialité n'est enregistrée que pour un médecin
        let specialty = match candidate.role {
            Role::Doctor => candidate.specialty,
            _ => String::new(),
        };

        let user = User {
            id: UserId::new(),
            name: candidate.name,
            email: candidate.email,
            password_hash,
            role: candidate.role,
            specialty,
            phone: candidate.phone,
        };

        let needle = user.email.to_lowercase();
        let created = store.users.update(move |users| {
            if users.iter().any(|u| u.email.to_lowercase() == needle) {
                return None;
            }
            users.push(user.clone());
            Some(user)
        })?;

        let created = created.ok_or(RepoError::DuplicateEmail)?;
        info!("Compte créé pour {} ({})", created.email, created.role);
        Ok(created)
    }

    /// Applique une mise à jour partielle. L'unicité de l'adresse e-mail est
    /// contrôlée contre les autres comptes; un compte qui quitte le rôle de
    /// médecin perd sa spécialité.
    pub fn update(store: &Store, id: UserId, patch: UserPatch) -> Result<User, RepoError> {
        let new_hash = patch.password.as_deref().map(passwords::hash);

        store.users.update(move |users| {
            if let Some(email) = &patch.email {
                let needle = email.to_lowercase();
                if users
                    .iter()
                    .any(|u| u.id != id && u.email.to_lowercase() == needle)
                {
                    return Err(RepoError::DuplicateEmail);
                }
            }

            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(RepoError::NotFound)?;

            if let Some(name) = patch.name {
                user.name = name;
            }
            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(hash) = new_hash {
                user.password_hash = hash;
            }
            if let Some(role) = patch.role {
                user.role = role;
            }
            if let Some(phone) = patch.phone {
                user.phone = phone;
            }
            if user.is_doctor() {
                if let Some(specialty) = patch.specialty {
                    user.specialty = specialty;
                }
            } else {
                user.specialty.clear();
            }

            Ok(user.clone())
        })?
    }

    pub fn delete(store: &Store, id: UserId) -> Result<(), RepoError> {
        store.users.update(|users| {
            let before = users.len();
            users.retain(|u| u.id != id);
            if users.len() == before {
                Err(RepoError::NotFound)
            } else {
                Ok(())
            }
        })?
    }
}

// Gestion des rendez-vous
pub mod appointment {
    use super::*;
    use crate::models::{Appointment, AppointmentId, AppointmentStatus, User, UserId};
    use serde::Serialize;
    use std::collections::HashMap;

    /// Rendez-vous vu par le patient, enrichi des champs du médecin.
    /// Un médecin supprimé se rend par des champs vides.
    #[derive(Debug, Clone, Serialize)]
    pub struct PatientAppointmentView {
        pub id: AppointmentId,
        pub doctor_name: String,
        pub doctor_specialty: String,
        pub date: String,
        pub reason: String,
        pub status: AppointmentStatus,
    }

    /// Rendez-vous vu par le médecin, enrichi des coordonnées du patient.
    #[derive(Debug, Clone, Serialize)]
    pub struct DoctorAppointmentView {
        pub id: AppointmentId,
        pub patient_name: String,
        pub patient_email: String,
        pub patient_phone: String,
        pub date: String,
        pub reason: String,
        pub status: AppointmentStatus,
    }

    /// Rendez-vous vu par l'administrateur, avec les deux parties résolues.
    #[derive(Debug, Clone, Serialize)]
    pub struct AdminAppointmentView {
        pub id: AppointmentId,
        pub patient_name: String,
        pub doctor_name: String,
        pub date: String,
        pub reason: String,
        pub status: AppointmentStatus,
    }

    /// Enregistre un rendez-vous, toujours en statut `Pending`. La référence
    /// au médecin n'est pas revalidée à l'écriture: si le compte disparaît
    /// ensuite, les vues rendent des champs vides.
    pub fn book(
        store: &Store,
        patient_id: UserId,
        doctor_id: UserId,
        date: String,
        reason: String,
    ) -> io::Result<Appointment> {
        let appointment = Appointment {
            id: AppointmentId::new(),
            patient_id,
            doctor_id,
            date,
            reason,
            status: AppointmentStatus::Pending,
        };
        store.appointments.update(|appointments| {
            appointments.push(appointment.clone());
        })?;
        Ok(appointment)
    }

    pub fn list_for_patient(store: &Store, patient_id: UserId) -> Vec<PatientAppointmentView> {
        let users = user_index(store);
        store
            .appointments
            .load()
            .into_iter()
            .filter(|a| a.patient_id == patient_id)
            .map(|a| {
                let doctor = users.get(&a.doctor_id);
                PatientAppointmentView {
                    id: a.id,
                    doctor_name: doctor.map(|d| d.name.clone()).unwrap_or_default(),
                    doctor_specialty: doctor.map(|d| d.specialty.clone()).unwrap_or_default(),
                    date: a.date,
                    reason: a.reason,
                    status: a.status,
                }
            })
            .collect()
    }

    pub fn list_for_doctor(store: &Store, doctor_id: UserId) -> Vec<DoctorAppointmentView> {
        let users = user_index(store);
        store
            .appointments
            .load()
            .into_iter()
            .filter(|a| a.doctor_id == doctor_id)
            .map(|a| {
                let patient = users.get(&a.patient_id);
                DoctorAppointmentView {
                    id: a.id,
                    patient_name: patient.map(|p| p.name.clone()).unwrap_or_default(),
                    patient_email: patient.map(|p| p.email.clone()).unwrap_or_default(),
                    patient_phone: patient.map(|p| p.phone.clone()).unwrap_or_default(),
                    date: a.date,
                    reason: a.reason,
                    status: a.status,
                }
            })
            .collect()
    }

    pub fn list_all(store: &Store) -> Vec<AdminAppointmentView> {
        let users = user_index(store);
        store
            .appointments
            .load()
            .into_iter()
            .map(|a| AdminAppointmentView {
                id: a.id,
                patient_name: users
                    .get(&a.patient_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                doctor_name: users
                    .get(&a.doctor_id)
                    .map(|d| d.name.clone())
                    .unwrap_or_default(),
                date: a.date,
                reason: a.reason,
                status: a.status,
            })
            .collect()
    }

    pub fn delete(store: &Store, id: AppointmentId) -> Result<(), RepoError> {
        store.appointments.update(|appointments| {
            let before = appointments.len();
            appointments.retain(|a| a.id != id);
            if appointments.len() == before {
                Err(RepoError::NotFound)
            } else {
                Ok(())
            }
        })?
    }

    /// La collection des utilisateurs est chargée une seule fois par listage,
    /// puis indexée par identifiant pour résoudre les références.
    fn user_index(store: &Store) -> HashMap<UserId, User> {
        store
            .users
            .load()
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    }
}

// Gestion des messages de contact
pub mod message {
    use super::*;
    use crate::consts;
    use crate::models::{ContactMessage, MessageId};
    use chrono::Local;

    /// Ajoute un message horodaté à la fin de la collection.
    pub fn add(
        store: &Store,
        name: String,
        email: String,
        message: String,
    ) -> io::Result<ContactMessage> {
        let record = ContactMessage {
            id: MessageId::new(),
            name,
            email,
            message,
            date: Local::now().format(consts::MESSAGE_DATE_FORMAT).to_string(),
        };
        store.messages.update(|messages| {
            messages.push(record.clone());
        })?;
        Ok(record)
    }

    pub fn list(store: &Store) -> Vec<ContactMessage> {
        store.messages.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::models::{AppointmentStatus, Role};
    use crate::utils::passwords;
    use std::fs;
    use std::path::PathBuf;
    use uuid::Uuid;

    struct Scratch {
        store: Store,
        dir: PathBuf,
    }

    impl Scratch {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("clinique-repo-{}", Uuid::new_v4()));
            let store = Store::open(&dir).expect("scratch store should open");
            Self { store, dir }
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    fn new_user(name: &str, email: &str, role: Role) -> user::NewUser {
        user::NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            role,
            specialty: String::new(),
            phone: String::new(),
        }
    }

    fn new_doctor(name: &str, email: &str, specialty: &str) -> user::NewUser {
        user::NewUser {
            specialty: specialty.to_string(),
            ..new_user(name, email, Role::Doctor)
        }
    }

    #[test]
    fn created_user_can_be_found_again() {
        let scratch = Scratch::new();
        let created = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();

        let by_id = user::find_by_id(&scratch.store, created.id).unwrap();
        assert_eq!(by_id.email, "alice@example.com");
        assert_eq!(by_id.role, Role::Patient);

        let by_email = user::find_by_email(&scratch.store, "alice@example.com").unwrap();
        assert_eq!(by_email.id, created.id);
        assert!(
            passwords::verify("secret1", Some(&by_email.password_hash)),
            "The stored digest should match the registration password"
        );
    }

    #[test]
    fn find_by_email_ignores_case() {
        let scratch = Scratch::new();
        user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();

        assert!(user::find_by_email(&scratch.store, "ALICE@EXAMPLE.COM").is_some());
        assert!(user::find_by_email(&scratch.store, "nobody@example.com").is_none());
    }

    #[test]
    fn duplicate_email_is_rejected_whatever_the_case() {
        let scratch = Scratch::new();
        user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();

        let second = user::create(
            &scratch.store,
            new_user("Imposter", "ALICE@EXAMPLE.COM", Role::Patient),
        );
        assert!(
            matches!(second, Err(RepoError::DuplicateEmail)),
            "Two accounts must never share an email address"
        );
        assert_eq!(user::list(&scratch.store).len(), 1, "No record should be written");
    }

    #[test]
    fn non_doctor_specialty_is_dropped_at_creation() {
        let scratch = Scratch::new();
        let patient = user::create(
            &scratch.store,
            user::NewUser {
                specialty: "Cardiology".to_string(),
                ..new_user("Alice", "alice@example.com", Role::Patient)
            },
        )
        .unwrap();
        assert!(patient.specialty.is_empty());

        let doctor = user::create(
            &scratch.store,
            new_doctor("Dr. Brown", "brown@example.com", "Cardiology"),
        )
        .unwrap();
        assert_eq!(doctor.specialty, "Cardiology");
    }

    #[test]
    fn ensure_admin_creates_the_account_once() {
        let scratch = Scratch::new();
        user::ensure_admin(&scratch.store).unwrap();
        user::ensure_admin(&scratch.store).unwrap();

        let admins: Vec<_> = user::list(&scratch.store)
            .into_iter()
            .filter(|u| u.role == Role::Admin)
            .collect();
        assert_eq!(admins.len(), 1, "Repeated bootstraps must not add accounts");
        assert_eq!(admins[0].email, consts::BOOTSTRAP_ADMIN_EMAIL);
        assert!(passwords::verify(
            consts::BOOTSTRAP_ADMIN_PASSWORD,
            Some(&admins[0].password_hash)
        ));
    }

    #[test]
    fn ensure_admin_is_satisfied_by_any_admin_account() {
        let scratch = Scratch::new();
        user::create(
            &scratch.store,
            new_user("Root", "root@example.com", Role::Admin),
        )
        .unwrap();

        user::ensure_admin(&scratch.store).unwrap();
        let admins = user::list(&scratch.store)
            .into_iter()
            .filter(|u| u.role == Role::Admin)
            .count();
        assert_eq!(admins, 1, "An existing admin satisfies the bootstrap");
    }

    #[test]
    fn ensure_admin_ignores_non_admin_accounts() {
        let scratch = Scratch::new();
        user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();

        user::ensure_admin(&scratch.store).unwrap();
        assert!(
            user::find_by_email(&scratch.store, consts::BOOTSTRAP_ADMIN_EMAIL).is_some(),
            "A patient account alone should still trigger the bootstrap"
        );
    }

    #[test]
    fn update_patches_only_the_provided_fields() {
        let scratch = Scratch::new();
        let created = user::create(
            &scratch.store,
            user::NewUser {
                phone: "555-0100".to_string(),
                ..new_user("Alice", "alice@example.com", Role::Patient)
            },
        )
        .unwrap();

        let updated = user::update(
            &scratch.store,
            created.id,
            user::UserPatch {
                name: Some("Alice Martin".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.name, "Alice Martin");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.phone, "555-0100");
        assert!(
            passwords::verify("secret1", Some(&updated.password_hash)),
            "An omitted password must keep the previous digest"
        );
    }

    #[test]
    fn update_rehashes_the_password_when_provided() {
        let scratch = Scratch::new();
        let created = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();

        let updated = user::update(
            &scratch.store,
            created.id,
            user::UserPatch {
                password: Some("newsecret".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(passwords::verify("newsecret", Some(&updated.password_hash)));
        assert!(!passwords::verify("secret1", Some(&updated.password_hash)));
    }

    #[test]
    fn update_refuses_an_email_taken_by_another_account() {
        let scratch = Scratch::new();
        user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();
        let bob = user::create(
            &scratch.store,
            new_user("Bob", "bob@example.com", Role::Patient),
        )
        .unwrap();

        let result = user::update(
            &scratch.store,
            bob.id,
            user::UserPatch {
                email: Some("Alice@Example.com".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(RepoError::DuplicateEmail)));

        // Keeping one's own address is not a conflict
        let kept = user::update(
            &scratch.store,
            bob.id,
            user::UserPatch {
                email: Some("bob@example.com".to_string()),
                ..Default::default()
            },
        );
        assert!(kept.is_ok());
    }

    #[test]
    fn leaving_the_doctor_role_clears_the_specialty() {
        let scratch = Scratch::new();
        let doctor = user::create(
            &scratch.store,
            new_doctor("Dr. Brown", "brown@example.com", "Cardiology"),
        )
        .unwrap();

        // A doctor patched without touching role or specialty keeps both
        let untouched = user::update(
            &scratch.store,
            doctor.id,
            user::UserPatch {
                name: Some("Dr. B. Brown".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(untouched.specialty, "Cardiology");

        let demoted = user::update(
            &scratch.store,
            doctor.id,
            user::UserPatch {
                role: Some(Role::Patient),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(
            demoted.specialty.is_empty(),
            "A non-doctor record must not keep a specialty"
        );
    }

    #[test]
    fn updating_a_missing_user_reports_not_found() {
        let scratch = Scratch::new();
        let result = user::update(
            &scratch.store,
            crate::models::UserId::new(),
            user::UserPatch::default(),
        );
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[test]
    fn delete_removes_exactly_one_account() {
        let scratch = Scratch::new();
        let alice = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();
        user::create(
            &scratch.store,
            new_user("Bob", "bob@example.com", Role::Patient),
        )
        .unwrap();

        user::delete(&scratch.store, alice.id).unwrap();
        assert_eq!(user::list(&scratch.store).len(), 1);
        assert!(matches!(
            user::delete(&scratch.store, alice.id),
            Err(RepoError::NotFound)
        ));
    }

    #[test]
    fn doctors_lists_only_doctor_accounts() {
        let scratch = Scratch::new();
        user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();
        user::create(
            &scratch.store,
            new_doctor("Dr. Brown", "brown@example.com", "Cardiology"),
        )
        .unwrap();
        user::ensure_admin(&scratch.store).unwrap();

        let doctors = user::doctors(&scratch.store);
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].email, "brown@example.com");
    }

    #[test]
    fn booked_appointment_is_pending_and_visible_to_both_parties() {
        let scratch = Scratch::new();
        let patient = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();
        let doctor = user::create(
            &scratch.store,
            new_doctor("Dr. Brown", "brown@example.com", "Cardiology"),
        )
        .unwrap();

        let booked = appointment::book(
            &scratch.store,
            patient.id,
            doctor.id,
            "2025-03-01 10:00".to_string(),
            "Checkup".to_string(),
        )
        .unwrap();
        assert_eq!(booked.status, AppointmentStatus::Pending);

        let mine = appointment::list_for_patient(&scratch.store, patient.id);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].doctor_name, "Dr. Brown");
        assert_eq!(mine[0].doctor_specialty, "Cardiology");

        let agenda = appointment::list_for_doctor(&scratch.store, doctor.id);
        assert_eq!(agenda.len(), 1);
        assert_eq!(agenda[0].patient_name, "Alice");
        assert_eq!(agenda[0].patient_email, "alice@example.com");
    }

    #[test]
    fn listings_are_scoped_to_their_owner() {
        let scratch = Scratch::new();
        let alice = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();
        let bob = user::create(
            &scratch.store,
            new_user("Bob", "bob@example.com", Role::Patient),
        )
        .unwrap();
        let doctor = user::create(
            &scratch.store,
            new_doctor("Dr. Brown", "brown@example.com", "Cardiology"),
        )
        .unwrap();

        appointment::book(
            &scratch.store,
            alice.id,
            doctor.id,
            "2025-03-01 10:00".to_string(),
            "Checkup".to_string(),
        )
        .unwrap();
        appointment::book(
            &scratch.store,
            bob.id,
            doctor.id,
            "2025-03-02 11:00".to_string(),
            "Follow-up".to_string(),
        )
        .unwrap();

        assert_eq!(appointment::list_for_patient(&scratch.store, alice.id).len(), 1);
        assert_eq!(appointment::list_for_patient(&scratch.store, bob.id).len(), 1);
        assert_eq!(appointment::list_for_doctor(&scratch.store, doctor.id).len(), 2);
        assert_eq!(appointment::list_all(&scratch.store).len(), 2);
    }

    #[test]
    fn deleted_doctor_renders_as_blank_fields() {
        let scratch = Scratch::new();
        let patient = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();
        let doctor = user::create(
            &scratch.store,
            new_doctor("Dr. Brown", "brown@example.com", "Cardiology"),
        )
        .unwrap();
        appointment::book(
            &scratch.store,
            patient.id,
            doctor.id,
            "2025-03-01 10:00".to_string(),
            "Checkup".to_string(),
        )
        .unwrap();
        appointment::book(
            &scratch.store,
            patient.id,
            doctor.id,
            "2025-03-08 10:00".to_string(),
            "Follow-up".to_string(),
        )
        .unwrap();

        user::delete(&scratch.store, doctor.id).unwrap();

        let mine = appointment::list_for_patient(&scratch.store, patient.id);
        assert_eq!(mine.len(), 2, "Both appointment records must survive");
        for row in &mine {
            assert_eq!(row.doctor_name, "");
            assert_eq!(row.doctor_specialty, "");
        }

        let all = appointment::list_all(&scratch.store);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].doctor_name, "");
        assert_eq!(all[0].patient_name, "Alice");
    }

    #[test]
    fn appointment_without_status_is_listed_as_pending() {
        let scratch = Scratch::new();
        let patient = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();

        // Legacy record written without the status field
        let raw = format!(
            r#"[{{"id":"{}","patient_id":"{}","doctor_id":"{}","date":"2025-03-01 10:00","reason":"Checkup"}}]"#,
            Uuid::new_v4(),
            patient.id,
            Uuid::new_v4()
        );
        fs::write(scratch.dir.join(consts::APPOINTMENTS_FILE), raw).unwrap();

        let mine = appointment::list_for_patient(&scratch.store, patient.id);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].status, AppointmentStatus::Pending);
    }

    #[test]
    fn deleting_an_appointment_leaves_the_rest() {
        let scratch = Scratch::new();
        let patient = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();
        let doctor = user::create(
            &scratch.store,
            new_doctor("Dr. Brown", "brown@example.com", "Cardiology"),
        )
        .unwrap();

        let first = appointment::book(
            &scratch.store,
            patient.id,
            doctor.id,
            "2025-03-01 10:00".to_string(),
            "Checkup".to_string(),
        )
        .unwrap();
        appointment::book(
            &scratch.store,
            patient.id,
            doctor.id,
            "2025-03-02 11:00".to_string(),
            "Follow-up".to_string(),
        )
        .unwrap();

        appointment::delete(&scratch.store, first.id).unwrap();
        assert_eq!(appointment::list_all(&scratch.store).len(), 1);
        assert!(matches!(
            appointment::delete(&scratch.store, first.id),
            Err(RepoError::NotFound)
        ));
    }

    #[test]
    fn contact_messages_append_in_order_with_a_timestamp() {
        let scratch = Scratch::new();
        message::add(
            &scratch.store,
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "First message".to_string(),
        )
        .unwrap();
        message::add(
            &scratch.store,
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "Second message".to_string(),
        )
        .unwrap();

        let messages = message::list(&scratch.store);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message, "First message");
        assert_eq!(messages[1].message, "Second message");
        assert!(
            chrono::NaiveDateTime::parse_from_str(
                &messages[0].date,
                consts::MESSAGE_DATE_FORMAT
            )
            .is_ok(),
            "The submission date should use the portal format: {}",
            messages[0].date
        );
    }

    #[test]
    fn registration_then_login_scenario() {
        let scratch = Scratch::new();
        let created = user::create(
            &scratch.store,
            new_user("Alice", "alice@example.com", Role::Patient),
        )
        .unwrap();

        // A second registration with the same address fails
        assert!(matches!(
            user::create(
                &scratch.store,
                new_user("Alice bis", "alice@example.com", Role::Patient)
            ),
            Err(RepoError::DuplicateEmail)
        ));

        // Login checks: wrong password rejected, right password accepted
        let stored = user::find_by_email(&scratch.store, "alice@example.com").unwrap();
        assert!(!passwords::verify("wrong", Some(&stored.password_hash)));
        assert!(passwords::verify("secret1", Some(&stored.password_hash)));
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.role, Role::Patient);
    }
}
