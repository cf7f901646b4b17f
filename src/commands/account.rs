//! Login, logout and whoami

use crate::config::PhotosConfig;
use crate::model::UserList;
use crate::session::Session;
use crate::{PhotosError, Result, output};

/// Work out who is acting: `--user` first, then the remembered login
///
/// # Errors
///
/// Returns `PermissionDenied` if nobody is logged in, or any error from
/// [`Session::login`].
pub fn resolve_session(
    users: &UserList,
    cli_user: Option<&str>,
    config: &PhotosConfig,
) -> Result<Session> {
    let name = cli_user
        .or(config.current_user.as_deref())
        .ok_or_else(|| {
            PhotosError::PermissionDenied(
                "Not logged in. Run 'photos login <name>' or pass --user <name>".to_string(),
            )
        })?;
    Session::login(users, name)
}

/// Validate and remember a login
///
/// # Errors
///
/// Returns an error if the user does not exist or the config cannot be saved.
pub fn login(users: &UserList, config: &mut PhotosConfig, name: &str, quiet: bool) -> Result<()> {
    let session = Session::login(users, name)?;
    config.current_user = Some(session.name().to_string());
    config.save()?;
    output::success(&format!("Logged in as {}", session.name()), quiet);
    Ok(())
}

/// Forget the remembered login
///
/// # Errors
///
/// Returns an error if the config cannot be saved.
pub fn logout(config: &mut PhotosConfig, quiet: bool) -> Result<()> {
    match config.current_user.take() {
        Some(name) => {
            config.save()?;
            output::success(&format!("Logged out {name}"), quiet);
        }
        None => output::info("Nobody is logged in.", quiet),
    }
    Ok(())
}

/// Print the acting user, or nothing when nobody is logged in
pub fn whoami(session: Option<&Session>, quiet: bool) {
    match session {
        Some(session) => println!("{}", session.name()),
        None => output::info("Not logged in.", quiet),
    }
}
