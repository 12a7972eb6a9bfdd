//! User accounts and roles.
//!
//! Accounts are a demo stand-in: passwords are stored as-is in the user
//! records and only stripped from the signed-in session value.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// Identifier of a user account (creation time in milliseconds; `0` is the admin).
pub type UserId = u64;

/// Email of the built-in administrator account.
pub const ADMIN_EMAIL: &str = "admin@beiramar.com";

/// Password of the built-in administrator account.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// The role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular guest account.
    #[default]
    User,
    /// The administrator, allowed into the admin overview.
    Admin,
}

/// A signed-in user, without credentials.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::{Role, User};
///
/// let admin = User::admin();
/// assert_eq!(admin.id, 0);
/// assert!(admin.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account role.
    pub role: Role,
}

impl User {
    /// The built-in administrator.
    #[must_use]
    pub fn admin() -> Self {
        Self {
            id: 0,
            name: "Admin".to_string(),
            email: ADMIN_EMAIL.to_string(),
            role: Role::Admin,
        }
    }

    /// Returns `true` for the administrator role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A stored account record, including its password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password (demo only).
    pub password: String,
    /// Account role.
    pub role: Role,
}

impl UserRecord {
    /// Returns the session view of this record, without the password.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Checks a registration form before it reaches the account store.
///
/// The confirmation must match, then the password must have at least
/// [`MIN_PASSWORD_LEN`] characters.
///
/// # Errors
///
/// Returns [`ProtocolError::PasswordMismatch`] or
/// [`ProtocolError::PasswordTooShort`].
///
/// # Examples
///
/// ```
/// use beiramar_protocol::user::validate_registration;
///
/// assert!(validate_registration("secret1", "secret1").is_ok());
/// assert!(validate_registration("secret1", "secret2").is_err());
/// assert!(validate_registration("abc", "abc").is_err());
/// ```
pub fn validate_registration(password: &str, confirm: &str) -> Result<()> {
    if password != confirm {
        return Err(ProtocolError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ProtocolError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_is_reported_before_length() {
        assert_eq!(
            validate_registration("abc", "abd"),
            Err(ProtocolError::PasswordMismatch)
        );
    }

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(
            validate_registration("abcde", "abcde"),
            Err(ProtocolError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn record_to_user_drops_password() {
        let record = UserRecord {
            id: 42,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "hunter22".to_string(),
            role: Role::User,
        };
        let json = serde_json::to_string(&record.to_user()).unwrap();
        assert!(!json.contains("hunter22"));
        assert!(json.contains("\"role\":\"user\""));
    }
}
