//! In-memory photo model
//!
//! Ownership runs one way:
//! - [`UserList`] owns every [`User`], keyed by username
//! - each [`User`] owns its albums, its tag types and its [`PhotoLibrary`]
//! - each [`Album`] refers to photos in that library by path
//!
//! Nothing here touches the disk except [`Photo::from_file`], which reads a
//! file's last-modified time.

pub mod album;
pub mod error;
pub mod photo;
pub mod tag;
pub mod user;
pub mod user_list;

pub use album::{Album, AlbumSummary, DATE_DISPLAY_FORMAT, Seeding};
pub use error::{Entity, ModelError, Result};
pub use photo::{Photo, PhotoLibrary};
pub use tag::{TAG_SPEC_SEPARATOR, Tag, TagType, split_tag_spec};
pub use user::User;
pub use user_list::UserList;

/// Name of the stock user and of its read-only album
pub const STOCK_NAME: &str = "stock";

/// Reserved login that opens the administrator session
pub const ADMIN_USERNAME: &str = "admin";

/// Tag types every new user starts with, as `(name, allows_multiple_values)`
pub const DEFAULT_TAG_TYPES: [(&str, bool); 2] = [("location", false), ("people", true)];

/// Whether `name` is one of [`DEFAULT_TAG_TYPES`] (case-insensitive)
#[must_use]
pub fn is_default_tag_type(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    DEFAULT_TAG_TYPES.iter().any(|(default, _)| *default == name)
}

/// Reject blank names for users and albums
pub(crate) fn validate_name(entity: Entity, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ModelError::InvalidOperation(format!(
            "{entity} name cannot be empty"
        )));
    }
    Ok(())
}
