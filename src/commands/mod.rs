//! Command implementations
//!
//! Each command group is a module with an execute function that takes parsed
//! CLI args and runs the operation against the loaded user list.

pub mod account;
pub mod album;
pub mod config;
pub mod photo;
pub mod search;
pub mod slideshow;
pub mod tag;
pub mod tagtype;
pub mod user;

// Re-export execute functions for convenience
pub use album::execute as album;
pub use config::execute as config;
pub use photo::execute as photo;
pub use search::execute as search;
pub use slideshow::execute as slideshow;
pub use tag::execute as tag;
pub use tagtype::execute as tagtype;
pub use user::execute as user;

use dialoguer::Confirm;
use std::io::IsTerminal;

use crate::model::{User, UserList};
use crate::session::Session;
use crate::{PhotosError, Result};

/// The regular user a session acts for
///
/// # Errors
///
/// Returns `PermissionDenied` for the admin session, or `NotFound` if the user
/// was deleted since login.
pub fn session_user<'a>(users: &'a UserList, session: &Session) -> Result<&'a User> {
    Ok(users.require_user(session.username()?)?)
}

/// Mutable variant of [`session_user`]
///
/// # Errors
///
/// Same as [`session_user`].
pub fn session_user_mut<'a>(users: &'a mut UserList, session: &Session) -> Result<&'a mut User> {
    Ok(users.require_user_mut(session.username()?)?)
}

/// Ask for confirmation before a destructive action
///
/// `force` skips the prompt. Without a terminal there is nobody to ask, so the
/// action is refused unless forced.
///
/// # Errors
///
/// Returns `InvalidInput` when no terminal is attached, or an I/O error if the
/// prompt fails.
pub fn confirm(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(PhotosError::InvalidInput(format!(
            "{prompt} Re-run with --force to confirm."
        )));
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PhotosError::InvalidInput(format!("Failed to read input: {e}")))
}
