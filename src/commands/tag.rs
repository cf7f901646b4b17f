//! Tag command - attach and detach `type=value` tags

use super::photo::photo_key;
use super::session_user_mut;
use crate::cli::TagCommands;
use crate::model::{TAG_SPEC_SEPARATOR, UserList, split_tag_spec};
use crate::session::Session;
use crate::{PhotosError, Result, output};

/// Execute the tag command
///
/// # Errors
/// Returns an error if the tag spec is malformed, the type or photo is
/// unknown, or the tag type's multiplicity forbids another value
pub fn execute(users: &mut UserList, session: &Session, command: &TagCommands, quiet: bool) -> Result<()> {
    let user = session_user_mut(users, session)?;
    match command {
        TagCommands::Add { path, tag } => {
            let (type_name, value) = parse_spec(tag)?;
            let key = photo_key(user, path);
            let tag = user.tag_photo(&key, type_name, value)?;
            output::success(&format!("Tagged {key} with {tag}"), quiet);
        }
        TagCommands::Remove { path, tag } => {
            let tag = user.parse_tag(tag)?;
            let key = photo_key(user, path);
            if user.untag_photo(&key, &tag)? {
                output::success(&format!("Removed {tag} from {key}"), quiet);
            } else {
                output::info(&format!("{key} has no tag {tag}"), quiet);
            }
        }
    }
    Ok(())
}

fn parse_spec(spec: &str) -> Result<(&str, &str)> {
    split_tag_spec(spec).ok_or_else(|| {
        PhotosError::InvalidInput(format!(
            "Expected a tag of the form type{TAG_SPEC_SEPARATOR}value, got '{spec}'"
        ))
    })
}
