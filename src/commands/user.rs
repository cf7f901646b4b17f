//! User command - account management for the admin session

use super::confirm;
use crate::cli::UserCommands;
use crate::model::UserList;
use crate::session::{Session, check_new_username, check_user_deletable};
use crate::{Result, output};

/// Execute the user management command
///
/// # Errors
/// Returns an error if the session is not admin or a model rule is violated
pub fn execute(users: &mut UserList, session: &Session, command: &UserCommands, quiet: bool) -> Result<()> {
    session.require_admin()?;
    match command {
        UserCommands::List => {
            list_users(users, quiet);
            Ok(())
        }
        UserCommands::Add { name } => add_user(users, name, quiet),
        UserCommands::Delete { name, force } => delete_user(users, name, *force, quiet),
    }
}

fn list_users(users: &UserList, quiet: bool) {
    if users.is_empty() {
        output::info("No users.", quiet);
        return;
    }
    output::info("Users:", quiet);
    for user in users.users() {
        if quiet {
            println!("{}", user.username());
        } else {
            println!("  {} ({} albums)", user.username(), user.albums().count());
        }
    }
}

/// Create a user; the reserved admin name is refused
///
/// # Errors
/// Returns an error if the name is reserved, blank or taken
pub fn add_user(users: &mut UserList, name: &str, quiet: bool) -> Result<()> {
    let name = name.trim();
    check_new_username(name)?;
    users.add_user(name)?;
    output::success(&format!("Created user {name}"), quiet);
    Ok(())
}

/// Delete a user after confirmation; the stock user is refused
///
/// # Errors
/// Returns an error if the user is protected or does not exist
pub fn delete_user(users: &mut UserList, name: &str, force: bool, quiet: bool) -> Result<()> {
    check_user_deletable(name)?;
    users.require_user(name)?;
    if !confirm(&format!("Delete user '{name}' and all of their albums?"), force)? {
        output::info("Cancelled.", quiet);
        return Ok(());
    }
    users.delete_user(name);
    output::success(&format!("Deleted user {name}"), quiet);
    Ok(())
}
