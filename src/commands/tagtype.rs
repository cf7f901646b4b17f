//! Tagtype command - define and remove tag types

use super::{confirm, session_user, session_user_mut};
use crate::cli::TagTypeCommands;
use crate::model::{Entity, ModelError, UserList};
use crate::session::{Session, check_tag_type_removable};
use crate::{Result, output};

/// Execute the tag type command
///
/// # Errors
/// Returns an error if the type already exists, is missing, or is a protected default
pub fn execute(users: &mut UserList, session: &Session, command: &TagTypeCommands, quiet: bool) -> Result<()> {
    match command {
        TagTypeCommands::List => {
            let user = session_user(users, session)?;
            output::info("Tag types:", quiet);
            for tag_type in user.tag_types() {
                println!("{}", output::tag_type_line(tag_type, quiet));
            }
            Ok(())
        }
        TagTypeCommands::Add { name, multi } => {
            let user = session_user_mut(users, session)?;
            if !user.add_tag_type(name, *multi) {
                if name.trim().is_empty() {
                    return Err(ModelError::InvalidOperation("Tag type name cannot be empty".to_string()).into());
                }
                return Err(ModelError::already_exists(Entity::TagType, name.trim()).into());
            }
            output::success(&format!("Added tag type {}", name.trim().to_lowercase()), quiet);
            Ok(())
        }
        TagTypeCommands::Remove { name, force } => remove_tag_type(users, session, name, *force, quiet),
    }
}

/// Remove a tag type, then strip its tags from every photo
///
/// # Errors
/// Returns an error if the type is a default one or does not exist
pub fn remove_tag_type(users: &mut UserList, session: &Session, name: &str, force: bool, quiet: bool) -> Result<()> {
    check_tag_type_removable(name)?;
    let user = session_user_mut(users, session)?;
    if !user.has_tag_type(name) {
        return Err(ModelError::not_found(Entity::TagType, name).into());
    }
    let in_use = user
        .library()
        .iter()
        .filter(|p| p.has_tag_type(name))
        .count();
    if in_use > 0
        && !confirm(
            &format!("{in_use} photo(s) are tagged with '{name}'. Remove the type and those tags?"),
            force,
        )?
    {
        output::info("Cancelled.", quiet);
        return Ok(());
    }
    user.remove_tag_type(name);
    let stripped = user.strip_tags_of_type(name);
    output::success(&format!("Removed tag type {name} ({stripped} tag(s) stripped)"), quiet);
    Ok(())
}
