//! Album command - create, rename, delete and inspect albums

use super::{confirm, session_user, session_user_mut};
use crate::cli::AlbumCommands;
use crate::model::UserList;
use crate::session::Session;
use crate::{Result, output};

/// Execute the album command
///
/// # Errors
/// Returns an error if the session has no user or a model rule is violated
pub fn execute(users: &mut UserList, session: &Session, command: &AlbumCommands, quiet: bool) -> Result<()> {
    match command {
        AlbumCommands::List => list_albums(users, session, quiet),
        AlbumCommands::Create { name } => {
            session_user_mut(users, session)?.add_album(name.trim())?;
            output::success(&format!("Created album {}", name.trim()), quiet);
            Ok(())
        }
        AlbumCommands::Delete { name, force } => delete_album(users, session, name, *force, quiet),
        AlbumCommands::Rename { old_name, new_name } => {
            session_user_mut(users, session)?.rename_album(old_name, new_name.trim())?;
            output::success(&format!("Renamed album {old_name} to {}", new_name.trim()), quiet);
            Ok(())
        }
        AlbumCommands::Show { name } => show_album(users, session, name, quiet),
    }
}

fn list_albums(users: &UserList, session: &Session, quiet: bool) -> Result<()> {
    let user = session_user(users, session)?;
    let mut albums = user.albums().peekable();
    if albums.peek().is_none() {
        output::info("No albums. Create one with 'photos album create <name>'.", quiet);
        return Ok(());
    }
    output::info(&format!("Albums of {}:", user.username()), quiet);
    for album in albums {
        println!("{}", output::album_line(&album.summary(user.library()), quiet));
    }
    Ok(())
}

fn delete_album(users: &mut UserList, session: &Session, name: &str, force: bool, quiet: bool) -> Result<()> {
    let user = session_user_mut(users, session)?;
    let count = user.require_album(name)?.len();
    if count > 0
        && !confirm(
            &format!("Album '{name}' holds {count} photo(s). Delete it?"),
            force,
        )?
    {
        output::info("Cancelled.", quiet);
        return Ok(());
    }
    user.delete_album(name)?;
    output::success(&format!("Deleted album {name}"), quiet);
    Ok(())
}

fn show_album(users: &UserList, session: &Session, name: &str, quiet: bool) -> Result<()> {
    let user = session_user(users, session)?;
    let album = user.require_album(name)?;
    output::info(&album.summary(user.library()).to_string(), quiet);
    for photo in album.photos(user.library()) {
        println!("{}", output::photo_line(photo, quiet));
    }
    Ok(())
}
