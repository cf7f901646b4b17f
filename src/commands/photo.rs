//! Photo command - add, remove, copy, move, caption and inspect photos

use glob::glob;
use std::path::{Path, PathBuf};

use super::{session_user, session_user_mut};
use crate::cli::PhotoCommands;
use crate::model::{Album, User, UserList};
use crate::session::Session;
use crate::{PhotosError, Result, output};

/// Execute the photo command
///
/// # Errors
/// Returns an error if the session has no user or a model rule is violated
pub fn execute(users: &mut UserList, session: &Session, command: &PhotoCommands, quiet: bool) -> Result<()> {
    match command {
        PhotoCommands::Add { album, paths } => add_photos(session_user_mut(users, session)?, album, paths, quiet),
        PhotoCommands::Remove { album, path } => {
            let user = session_user_mut(users, session)?;
            let key = photo_key(user, path);
            if user.remove_photo(album, &key)? {
                output::success(&format!("Removed {key} from {album}"), quiet);
            } else {
                output::info(&format!("{key} is not in {album}"), quiet);
            }
            Ok(())
        }
        PhotoCommands::Copy { path, from, to } => {
            let user = session_user_mut(users, session)?;
            let key = photo_key(user, path);
            user.copy_photo(&key, from, to)?;
            output::success(&format!("Copied {key} from {from} to {to}"), quiet);
            Ok(())
        }
        PhotoCommands::Move { path, from, to } => {
            let user = session_user_mut(users, session)?;
            let key = photo_key(user, path);
            user.move_photo(&key, from, to)?;
            output::success(&format!("Moved {key} from {from} to {to}"), quiet);
            Ok(())
        }
        PhotoCommands::Caption { path, caption } => {
            let user = session_user_mut(users, session)?;
            let key = photo_key(user, path);
            user.set_caption(&key, caption)?;
            output::success(&format!("Captioned {key}"), quiet);
            Ok(())
        }
        PhotoCommands::Show { path } => show_photo(session_user(users, session)?, path, quiet),
    }
}

/// Add every file named by `patterns` to `album`
///
/// Files that fail are reported and skipped; the command fails only if
/// nothing could be added.
///
/// # Errors
/// Returns an error if the album does not exist, a pattern is invalid, or no
/// file could be added
pub fn add_photos(user: &mut User, album: &str, patterns: &[String], quiet: bool) -> Result<()> {
    user.require_album(album)?;
    let files = expand_patterns(patterns)?;
    if files.is_empty() {
        return Err(PhotosError::InvalidInput(format!(
            "No files match {}",
            patterns.join(" ")
        )));
    }

    let mut added = 0;
    let mut failed = 0;
    for file in &files {
        match user.add_photo(album, file) {
            Ok(photo) => {
                added += 1;
                if !quiet {
                    println!("{}", output::photo_line(photo, quiet));
                }
            }
            Err(e) => {
                failed += 1;
                tracing::debug!(file = %file.display(), error = %e, "photo not added");
                eprintln!("Skipped {}: {e}", file.display());
            }
        }
    }

    if added == 0 {
        return Err(PhotosError::InvalidInput(format!(
            "No photos added to {album}"
        )));
    }
    output::success(&format!("Added {added} photo(s) to {album}"), quiet);
    if failed > 0 {
        output::info(&format!("{failed} file(s) skipped"), quiet);
    }
    Ok(())
}

/// Expand glob patterns; plain paths are kept even when they do not exist so
/// the import reports them
///
/// # Errors
/// Returns `InvalidInput` for malformed glob patterns
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if !is_glob(pattern) {
            files.push(absolute(Path::new(pattern)));
            continue;
        }
        let entries = glob(pattern)
            .map_err(|e| PhotosError::InvalidInput(format!("Invalid pattern '{pattern}': {e}")))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(absolute(&path)),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "unreadable glob entry"),
            }
        }
    }
    files.dedup();
    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Library key for a path typed by the user: as given if known, else canonicalized
#[must_use]
pub fn photo_key(user: &User, path: &str) -> String {
    if user.library().contains(path) {
        return path.to_string();
    }
    absolute(Path::new(path)).to_string_lossy().to_string()
}

fn show_photo(user: &User, path: &str, quiet: bool) -> Result<()> {
    let key = photo_key(user, path);
    let photo = user.library().require(&key)?;
    println!("{}", output::photo_line(photo, quiet));
    if !quiet {
        let albums: Vec<&str> = user
            .albums_containing_photo(&key)
            .into_iter()
            .map(Album::name)
            .collect();
        println!("  Albums: {}", albums.join(", "));
    }
    Ok(())
}
