//! Persistence for the beiramar application.
//!
//! [`Storage`] wraps a [`KeyValueStore`] and exposes the typed operations the
//! application needs: accounts and the signed-in session, confirmed bookings,
//! and the interface language.
//!
//! # Keys
//!
//! | Key | Content |
//! |---|---|
//! | `luxe_users` | JSON array of user records |
//! | `luxe_user` | JSON object of the signed-in user |
//! | `luxe_bookings` | JSON array of bookings |
//! | `beiramar_lang` | language code |
//!
//! # Examples
//!
//! ```
//! use beiramar_store::Storage;
//!
//! # fn example() -> beiramar_store::Result<()> {
//! let storage = Storage::in_memory();
//! let user = storage.register("Ana", "ana@example.com", "secret1", chrono::Utc::now())?;
//! assert_eq!(storage.current_user()?, Some(user));
//!
//! storage.logout()?;
//! assert!(storage.current_user()?.is_none());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod auth;
pub mod bookings;
pub mod error;
pub mod kv;
pub mod preferences;

use std::path::PathBuf;

pub use error::{Result, StoreError};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

/// Key of the registered user records.
pub const USERS_KEY: &str = "luxe_users";

/// Key of the signed-in user.
pub const SESSION_KEY: &str = "luxe_user";

/// Key of all bookings.
pub const BOOKINGS_KEY: &str = "luxe_bookings";

/// Key of the interface language.
pub const LANGUAGE_KEY: &str = "beiramar_lang";

/// Typed access to the application's persisted state.
#[derive(Debug)]
pub struct Storage {
    kv: Box<dyn KeyValueStore>,
}

impl Storage {
    /// Wraps a key-value store.
    #[must_use]
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        Self { kv: Box::new(kv) }
    }

    /// Opens file-backed storage in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: PathBuf) -> Result<Self> {
        Ok(Self::new(FileStore::open(dir)?))
    }

    /// Creates empty in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }
}
