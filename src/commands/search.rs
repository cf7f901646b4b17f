//! Search command - find photos across all albums by tag and capture date

use chrono::NaiveDateTime;

use super::{session_user, session_user_mut};
use crate::cli::{SearchMode, SearchParams};
use crate::model::{Photo, Tag, User, UserList};
use crate::session::Session;
use crate::{PhotosError, Result, output};

/// Execute the search command
///
/// Prints matching photos and optionally saves them as a new album.
///
/// # Errors
/// Returns an error if no criteria are given, a tag is unknown, or the
/// results cannot be saved as an album
pub fn execute(users: &mut UserList, session: &Session, params: &SearchParams, quiet: bool) -> Result<()> {
    if !params.has_criteria() {
        return Err(PhotosError::InvalidInput(
            "Give at least one of --tag, --from or --to".to_string(),
        ));
    }

    let paths: Vec<String> = {
        let user = session_user(users, session)?;
        let found = find(user, params)?;
        if found.is_empty() {
            output::info("No photos found.", quiet);
        } else {
            output::info(&format!("Found {} photo(s):", found.len()), quiet);
            for photo in &found {
                println!("{}", output::photo_line(photo, quiet));
            }
        }
        found.iter().map(|p| p.path().to_string()).collect()
    };

    if let Some(album) = &params.save_as {
        if paths.is_empty() {
            return Err(PhotosError::InvalidInput(format!(
                "Nothing to save as album '{album}'"
            )));
        }
        let user = session_user_mut(users, session)?;
        user.create_album_from(album, &paths)?;
        output::success(&format!("Saved {} photo(s) as album {album}", paths.len()), quiet);
    }
    Ok(())
}

/// Photos matching every criterion in `params`, ordered by capture time
///
/// # Errors
/// Returns an error if a tag spec is malformed or names an unknown type
pub fn find<'a>(user: &'a User, params: &SearchParams) -> Result<Vec<&'a Photo>> {
    let tags = params
        .tags
        .iter()
        .map(|spec| user.parse_tag(spec))
        .collect::<std::result::Result<Vec<Tag>, _>>()?;
    let start = params.from.unwrap_or(NaiveDateTime::MIN);
    let end = params.to.unwrap_or(NaiveDateTime::MAX);

    let found = match (tags.as_slice(), params.mode) {
        ([], _) => user.photos_in_date_range(start, end),
        ([only], _) => user.photos_with_single_tag(only),
        ([first, second], SearchMode::All) => user.photos_with_both_tags(first, second),
        ([first, second], SearchMode::Any) => user.photos_with_either_tag(first, second),
        (many, SearchMode::All) => user.photos_with_all_tags(many),
        (many, SearchMode::Any) => user.photos_with_any_tag(many),
    };

    if params.from.is_none() && params.to.is_none() {
        return Ok(found);
    }
    Ok(found
        .into_iter()
        .filter(|p| p.date_taken() > start && p.date_taken() < end)
        .collect())
}
