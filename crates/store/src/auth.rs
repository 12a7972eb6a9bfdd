//! Accounts and the signed-in session.

use beiramar_protocol::user::{ADMIN_EMAIL, ADMIN_PASSWORD};
use beiramar_protocol::{Role, User, UserId, UserRecord};
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::error::{Result, StoreError};
use crate::kv::{read_json, write_json};
use crate::{SESSION_KEY, Storage, USERS_KEY};

impl Storage {
    /// All registered user records; an absent list reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be read or parsed.
    pub fn users(&self) -> Result<Vec<UserRecord>> {
        Ok(read_json(self.kv(), USERS_KEY)?.unwrap_or_default())
    }

    /// The signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session blob cannot be read or parsed.
    pub fn current_user(&self) -> Result<Option<User>> {
        read_json(self.kv(), SESSION_KEY)
    }

    /// Creates an account and signs it in.
    ///
    /// The new account gets the `user` role and the creation time in
    /// milliseconds as its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmailTaken`] if an account with this email exists,
    /// or a storage error.
    #[instrument(skip(self, password, now))]
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<User> {
        let mut users = self.users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::EmailTaken);
        }

        let record = UserRecord {
            id: UserId::try_from(now.timestamp_millis()).unwrap_or_default(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::User,
        };
        let user = record.to_user();
        users.push(record);
        write_json(self.kv(), USERS_KEY, &users)?;
        self.start_session(&user)?;

        info!(user_id = user.id, "registered account");
        Ok(user)
    }

    /// Signs in with an email and password.
    ///
    /// The built-in administrator credentials always succeed; other accounts
    /// need an exact email and password match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredentials`] if no account matches, or a
    /// storage error.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            User::admin()
        } else {
            self.users()?
                .iter()
                .find(|u| u.email == email && u.password == password)
                .map(UserRecord::to_user)
                .ok_or(StoreError::InvalidCredentials)?
        };
        self.start_session(&user)?;

        info!(user_id = user.id, admin = user.is_admin(), "signed in");
        Ok(user)
    }

    /// Signs out.
    ///
    /// # Errors
    ///
    /// Returns an error if the session blob cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        self.kv().remove(SESSION_KEY)?;
        info!("signed out");
        Ok(())
    }

    fn start_session(&self, user: &User) -> Result<()> {
        write_json(self.kv(), SESSION_KEY, user)
    }
}
