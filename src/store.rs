//! Stockage des collections sur disque, une collection par fichier JSON.
//!
//! Chaque fichier contient la séquence complète des enregistrements d'une
//! entité; toute écriture réécrit le fichier en entier. Rien n'est gardé en
//! mémoire entre deux opérations: le fichier est l'unique source de vérité.

use std::{
    fs::{create_dir_all, File},
    io,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::warn;
use serde::{de::DeserializeOwned, Serialize};

use crate::consts;
use crate::models::{Appointment, ContactMessage, User};

/// Une collection d'enregistrements de type T adossée à un fichier JSON.
///
/// Le mutex interne sérialise les cycles lecture-modification-écriture
/// concurrents: sans lui, deux requêtes simultanées pourraient chacune lire
/// l'ancienne séquence et la dernière écriture effacerait la première.
pub struct Collection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Charge la séquence complète des enregistrements.
    ///
    /// Un fichier absent ou au contenu illisible vaut une collection vide:
    /// le service reste disponible et l'incident est signalé dans le journal.
    pub fn load(&self) -> Vec<T> {
        let _guard = self.guard();
        self.read_records()
    }

    /// Réécrit la collection entière avec la séquence fournie.
    pub fn save(&self, records: &[T]) -> io::Result<()> {
        let _guard = self.guard();
        self.write_records(records)
    }

    /// Applique une mutation sous verrou exclusif: lecture de la séquence,
    /// passage à la fermeture, puis réécriture du fichier. La valeur rendue
    /// par la fermeture est propagée à l'appelant.
    pub fn update<R>(&self, apply: impl FnOnce(&mut Vec<T>) -> R) -> io::Result<R> {
        let _guard = self.guard();
        let mut records = self.read_records();
        let result = apply(&mut records);
        self.write_records(&records)?;
        Ok(result)
    }

    /// Crée le fichier avec une séquence vide s'il n'existe pas encore.
    fn init(&self) -> io::Result<()> {
        let _guard = self.guard();
        if !self.path.exists() {
            self.write_records(&[])?;
        }
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // Le verrou ne protège aucune donnée en mémoire, un empoisonnement
        // est donc sans conséquence
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_records(&self) -> Vec<T> {
        match File::open(&self.path) {
            Ok(file) => serde_json::from_reader(file).unwrap_or_else(|e| {
                warn!(
                    "Collection {} illisible, traitée comme vide: {e}",
                    self.path.display()
                );
                Vec::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(
                    "Collection {} inaccessible, traitée comme vide: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn write_records(&self, records: &[T]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, records)?;
        Ok(())
    }
}

/// Les trois collections du portail.
pub struct Store {
    pub users: Collection<User>,
    pub appointments: Collection<Appointment>,
    pub messages: Collection<ContactMessage>,
}

impl Store {
    /// Ouvre le répertoire de données, en le créant au besoin, et garantit
    /// qu'un fichier existe pour chaque collection.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        create_dir_all(dir)?;

        let store = Self {
            users: Collection::new(dir.join(consts::USERS_FILE)),
            appointments: Collection::new(dir.join(consts::APPOINTMENTS_FILE)),
            messages: Collection::new(dir.join(consts::MESSAGES_FILE)),
        };
        store.users.init()?;
        store.appointments.init()?;
        store.messages.init()?;
        Ok(store)
    }
}
