//! Login sessions and the administrator policy
//!
//! A session is either a regular user, looked up by name, or the reserved
//! `admin` pseudo-user who manages accounts. There are no passwords.
//!
//! The administrator rules live here rather than in the model:
//! - no account may be named `admin`
//! - the `stock` user cannot be deleted
//! - the default tag types cannot be removed

use crate::model::{ADMIN_USERNAME, STOCK_NAME, UserList, is_default_tag_type};
use crate::{PhotosError, Result};

/// Who is logged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Admin,
    User(String),
}

impl Session {
    /// Resolve a login name against the registered users
    ///
    /// # Errors
    ///
    /// * `PhotosError::InvalidInput` if the name is blank
    /// * `ModelError::NotFound` if no such user is registered
    pub fn login(users: &UserList, name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PhotosError::InvalidInput("Username cannot be empty".to_string()));
        }
        if name == ADMIN_USERNAME {
            tracing::debug!("admin session");
            return Ok(Self::Admin);
        }
        users.require_user(name)?;
        tracing::debug!(user = %name, "user session");
        Ok(Self::User(name.to_string()))
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The logged-in username, or `admin`
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Admin => ADMIN_USERNAME,
            Self::User(name) => name,
        }
    }

    /// # Errors
    ///
    /// Returns `PhotosError::PermissionDenied` unless this is the admin session.
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(PhotosError::PermissionDenied(format!(
                "only '{ADMIN_USERNAME}' can manage users"
            )))
        }
    }

    /// The regular user this session acts for
    ///
    /// # Errors
    ///
    /// Returns `PhotosError::PermissionDenied` for the admin session, which owns no albums.
    pub fn username(&self) -> Result<&str> {
        match self {
            Self::User(name) => Ok(name),
            Self::Admin => Err(PhotosError::PermissionDenied(format!(
                "'{ADMIN_USERNAME}' has no albums; log in as a regular user"
            ))),
        }
    }
}

/// # Errors
///
/// Returns `PhotosError::PermissionDenied` for the reserved admin name.
pub fn check_new_username(name: &str) -> Result<()> {
    if name.trim().eq_ignore_ascii_case(ADMIN_USERNAME) {
        return Err(PhotosError::PermissionDenied(format!(
            "'{ADMIN_USERNAME}' is reserved"
        )));
    }
    Ok(())
}

/// # Errors
///
/// Returns `PhotosError::PermissionDenied` for the stock user.
pub fn check_user_deletable(name: &str) -> Result<()> {
    if name == STOCK_NAME {
        return Err(PhotosError::PermissionDenied(
            "the stock user cannot be deleted".to_string(),
        ));
    }
    Ok(())
}

/// # Errors
///
/// Returns `PhotosError::PermissionDenied` for `location` and `people`.
pub fn check_tag_type_removable(name: &str) -> Result<()> {
    if is_default_tag_type(name) {
        return Err(PhotosError::PermissionDenied(format!(
            "'{}' is a default tag type and cannot be removed",
            name.trim().to_lowercase()
        )));
    }
    Ok(())
}
