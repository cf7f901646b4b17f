//! Users
//!
//! A [`User`] owns three collections:
//!
//! - its albums, keyed by name
//! - its tag types (two defaults, `location` and `people`, are created up front)
//! - its [`PhotoLibrary`], the single owner of every photo the albums refer to
//!
//! Album membership is by path, so editing a photo through any album edits it
//! everywhere. A photo that is detached from its last album leaves the library.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::album::Album;
use super::error::{Entity, ModelError, Result};
use super::photo::{Photo, PhotoLibrary};
use super::tag::{Tag, TagType};
use super::{DEFAULT_TAG_TYPES, validate_name};

/// A photo-library owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    username: String,
    #[serde(default)]
    albums: BTreeMap<String, Album>,
    #[serde(default)]
    tag_types: Vec<TagType>,
    #[serde(default)]
    photos: PhotoLibrary,
}

impl User {
    /// Create a user with the default tag types
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        let mut user = Self {
            username: username.into(),
            albums: BTreeMap::new(),
            tag_types: Vec::new(),
            photos: PhotoLibrary::new(),
        };
        for (name, multiple) in DEFAULT_TAG_TYPES {
            user.add_tag_type(name, multiple);
        }
        user
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    // ---- albums -------------------------------------------------------------

    /// Albums sorted by name
    pub fn albums(&self) -> impl Iterator<Item = &Album> {
        self.albums.values()
    }

    #[must_use]
    pub fn album_names(&self) -> Vec<&str> {
        self.albums.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn album(&self, name: &str) -> Option<&Album> {
        self.albums.get(name)
    }

    #[must_use]
    pub fn has_album(&self, name: &str) -> bool {
        self.albums.contains_key(name)
    }

    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if the album does not exist.
    pub fn require_album(&self, name: &str) -> Result<&Album> {
        self.albums
            .get(name)
            .ok_or_else(|| ModelError::not_found(Entity::Album, name))
    }

    /// Create an empty album
    ///
    /// # Errors
    ///
    /// * `ModelError::InvalidOperation` if the name is blank
    /// * `ModelError::AlreadyExists` if the name is taken
    pub fn add_album(&mut self, name: &str) -> Result<&mut Album> {
        validate_name(Entity::Album, name)?;
        if self.albums.contains_key(name) {
            return Err(ModelError::already_exists(Entity::Album, name));
        }
        Ok(self
            .albums
            .entry(name.to_string())
            .or_insert_with(|| Album::new(name)))
    }

    /// Delete an album, detaching its photos
    ///
    /// Photos that are no longer in any album leave the library.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if the album does not exist.
    pub fn delete_album(&mut self, name: &str) -> Result<Album> {
        let album = self
            .albums
            .remove(name)
            .ok_or_else(|| ModelError::not_found(Entity::Album, name))?;
        for path in album.photo_paths() {
            self.release_if_orphan(path);
        }
        tracing::debug!(user = %self.username, album = %name, photos = album.len(), "album deleted");
        Ok(album)
    }

    /// Rename an album, re-keying it
    ///
    /// # Errors
    ///
    /// * `ModelError::NotFound` if `old` does not exist
    /// * `ModelError::AlreadyExists` if `new` is taken (including `old == new`)
    /// * `ModelError::InvalidOperation` if `new` is blank
    pub fn rename_album(&mut self, old: &str, new: &str) -> Result<()> {
        if !self.albums.contains_key(old) {
            return Err(ModelError::not_found(Entity::Album, old));
        }
        if self.albums.contains_key(new) {
            return Err(ModelError::already_exists(Entity::Album, new));
        }
        validate_name(Entity::Album, new)?;

        if let Some(mut album) = self.albums.remove(old) {
            album.set_name(new);
            self.albums.insert(new.to_string(), album);
        }
        Ok(())
    }

    /// Create an album holding the given photos, e.g. from search results
    ///
    /// # Errors
    ///
    /// * `ModelError::AlreadyExists` if the album name is taken
    /// * `ModelError::NotFound` if a path is not in the library
    /// * `ModelError::InvalidOperation` if the new album is the stock album
    ///
    /// On error no album is created.
    pub fn create_album_from<S: AsRef<str>>(&mut self, name: &str, paths: &[S]) -> Result<&Album> {
        for path in paths {
            self.photos.require(path.as_ref())?;
        }
        self.add_album(name)?;
        if let Err(e) = self.fill_album(name, paths) {
            self.albums.remove(name);
            return Err(e);
        }
        self.require_album(name)
    }

    fn fill_album<S: AsRef<str>>(&mut self, name: &str, paths: &[S]) -> Result<()> {
        let album = self
            .albums
            .get_mut(name)
            .ok_or_else(|| ModelError::not_found(Entity::Album, name))?;
        for path in paths {
            let photo = self.photos.require(path.as_ref())?;
            match album.add_photo(photo) {
                Ok(()) | Err(ModelError::AlreadyExists { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    // ---- photos -------------------------------------------------------------

    #[must_use]
    pub const fn library(&self) -> &PhotoLibrary {
        &self.photos
    }

    #[must_use]
    pub fn photo(&self, path: &str) -> Option<&Photo> {
        self.photos.get(path)
    }

    /// Add a file to an album
    ///
    /// If the path is already in the library the existing photo (with its
    /// caption and tags) is reused; otherwise the file is inspected for its
    /// timestamp.
    ///
    /// # Errors
    ///
    /// * `ModelError::NotFound` if the album does not exist
    /// * `ModelError::PhotoUnreadable` if a new file cannot be inspected
    /// * any error from [`Album::add_photo`]
    pub fn add_photo<P: AsRef<Path>>(&mut self, album: &str, path: P) -> Result<&Photo> {
        self.require_album(album)?;
        let key = path.as_ref().to_string_lossy();
        let photo = match self.photos.get(&key) {
            Some(existing) => existing.clone(),
            None => Photo::from_file(path.as_ref())?,
        };
        self.import_photo(album, photo)
    }

    /// Add an already constructed photo to an album
    ///
    /// # Errors
    ///
    /// * `ModelError::NotFound` if the album does not exist
    /// * any error from [`Album::add_photo`]
    pub fn import_photo(&mut self, album: &str, photo: Photo) -> Result<&Photo> {
        let target = self
            .albums
            .get_mut(album)
            .ok_or_else(|| ModelError::not_found(Entity::Album, album))?;
        target.add_photo(&photo)?;
        tracing::debug!(user = %self.username, album = %album, photo = %photo.path(), "photo added");
        Ok(&*self.photos.insert_or_keep(photo))
    }

    /// Detach a photo from an album
    ///
    /// # Errors
    ///
    /// * `ModelError::NotFound` if the album does not exist
    /// * `ModelError::InvalidOperation` if it is the stock album
    pub fn remove_photo(&mut self, album: &str, path: &str) -> Result<bool> {
        let target = self
            .albums
            .get_mut(album)
            .ok_or_else(|| ModelError::not_found(Entity::Album, album))?;
        let removed = target.remove_path(path)?;
        if removed {
            self.release_if_orphan(path);
        }
        Ok(removed)
    }

    /// Add a photo from one album to another; both then share it
    ///
    /// # Errors
    ///
    /// * `ModelError::NotFound` if either album is missing or `from` lacks the photo
    /// * any error from [`Album::add_photo`] on the target
    pub fn copy_photo(&mut self, path: &str, from: &str, to: &str) -> Result<()> {
        if !self.require_album(from)?.contains(path) {
            return Err(ModelError::not_found(Entity::Photo, path));
        }
        let photo = self.photos.require(path)?;
        let target = self
            .albums
            .get_mut(to)
            .ok_or_else(|| ModelError::not_found(Entity::Album, to))?;
        target.add_photo(photo)
    }

    /// Move a photo between albums
    ///
    /// Either both steps happen or neither does.
    ///
    /// # Errors
    ///
    /// Same as [`User::copy_photo`], plus `InvalidOperation` if `from` is the
    /// stock album.
    pub fn move_photo(&mut self, path: &str, from: &str, to: &str) -> Result<()> {
        self.copy_photo(path, from, to)?;
        let source = self
            .albums
            .get_mut(from)
            .ok_or_else(|| ModelError::not_found(Entity::Album, from))?;
        if let Err(e) = source.remove_path(path) {
            if let Some(target) = self.albums.get_mut(to)
                && let Err(rollback) = target.remove_path(path)
            {
                tracing::warn!(
                    user = %self.username,
                    album = %to,
                    photo = %path,
                    error = %rollback,
                    "move rollback failed"
                );
            }
            return Err(e);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if the photo is not in the library.
    pub fn set_caption(&mut self, path: &str, caption: &str) -> Result<()> {
        self.photos.require_mut(path)?.set_caption(caption.trim());
        Ok(())
    }

    // ---- tags ---------------------------------------------------------------

    /// Build a tag from one of this user's tag types
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if the tag type is not defined.
    pub fn tag(&self, type_name: &str, value: &str) -> Result<Tag> {
        let tag_type = self
            .tag_type(type_name)
            .ok_or_else(|| ModelError::not_found(Entity::TagType, type_name))?;
        Ok(Tag::new(tag_type, value))
    }

    /// Parse a `type=value` spec against this user's tag types
    ///
    /// # Errors
    ///
    /// See [`Tag::parse`].
    pub fn parse_tag(&self, spec: &str) -> Result<Tag> {
        Tag::parse(spec, &self.tag_types)
    }

    /// Attach `type=value` to a photo
    ///
    /// # Errors
    ///
    /// * `ModelError::NotFound` if the tag type or photo does not exist
    /// * `ModelError::InvalidOperation` if the value is blank, or the type is
    ///   single-valued and the photo already has a tag of that type
    /// * `ModelError::DuplicateTag` if an equal tag is already attached
    pub fn tag_photo(&mut self, path: &str, type_name: &str, value: &str) -> Result<Tag> {
        if value.trim().is_empty() {
            return Err(ModelError::InvalidOperation(
                "Tag value cannot be empty".to_string(),
            ));
        }
        let tag = self.tag(type_name, value)?;
        let photo = self.photos.require_mut(path)?;
        if !tag.tag_type().allows_multiple_values() && photo.has_tag_type(tag.name()) {
            return Err(ModelError::InvalidOperation(format!(
                "'{}' tag type does not allow multiple values; remove the existing tag from '{}' first",
                tag.name(),
                photo.name()
            )));
        }
        photo.add_tag(tag.clone())?;
        Ok(tag)
    }

    /// Detach a tag from a photo; absent tags are ignored
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if the photo does not exist.
    pub fn untag_photo(&mut self, path: &str, tag: &Tag) -> Result<bool> {
        Ok(self.photos.require_mut(path)?.remove_tag(tag))
    }

    #[must_use]
    pub fn tag_types(&self) -> &[TagType] {
        &self.tag_types
    }

    /// Case-insensitive lookup
    #[must_use]
    pub fn tag_type(&self, name: &str) -> Option<&TagType> {
        self.tag_types.iter().find(|t| t.is_named(name))
    }

    #[must_use]
    pub fn has_tag_type(&self, name: &str) -> bool {
        self.tag_type(name).is_some()
    }

    /// Define a tag type; `false` if the name is blank or already defined
    pub fn add_tag_type(&mut self, name: &str, allows_multiple_values: bool) -> bool {
        if name.trim().is_empty() || self.has_tag_type(name) {
            return false;
        }
        self.tag_types
            .push(TagType::new(name, allows_multiple_values));
        true
    }

    /// Remove a tag type definition; `false` if it was not defined
    ///
    /// Tags of this type stay on photos until [`User::strip_tags_of_type`]
    /// is called.
    pub fn remove_tag_type(&mut self, name: &str) -> bool {
        let before = self.tag_types.len();
        self.tag_types.retain(|t| !t.is_named(name));
        self.tag_types.len() != before
    }

    /// Remove every tag of the named type from every photo
    pub fn strip_tags_of_type(&mut self, name: &str) -> usize {
        self.photos
            .iter_mut()
            .map(|photo| photo.remove_tags_of_type(name))
            .sum()
    }

    // ---- queries ------------------------------------------------------------

    /// Photos in any album carrying `tag`
    #[must_use]
    pub fn photos_with_single_tag(&self, tag: &Tag) -> Vec<&Photo> {
        self.photos_where(|photo| photo.has_tag(tag))
    }

    /// Photos carrying both tags
    #[must_use]
    pub fn photos_with_both_tags(&self, first: &Tag, second: &Tag) -> Vec<&Photo> {
        self.photos_where(|photo| photo.has_tag(first) && photo.has_tag(second))
    }

    /// Photos carrying either tag
    #[must_use]
    pub fn photos_with_either_tag(&self, first: &Tag, second: &Tag) -> Vec<&Photo> {
        self.photos_where(|photo| photo.has_tag(first) || photo.has_tag(second))
    }

    /// Photos carrying every tag in `tags`
    #[must_use]
    pub fn photos_with_all_tags(&self, tags: &[Tag]) -> Vec<&Photo> {
        self.photos_where(|photo| tags.iter().all(|tag| photo.has_tag(tag)))
    }

    /// Photos carrying at least one tag in `tags`
    #[must_use]
    pub fn photos_with_any_tag(&self, tags: &[Tag]) -> Vec<&Photo> {
        self.photos_where(|photo| tags.iter().any(|tag| photo.has_tag(tag)))
    }

    /// Photos in any album taken strictly between `start` and `end`
    #[must_use]
    pub fn photos_in_date_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&Photo> {
        self.photos_where(|photo| photo.date_taken() > start && photo.date_taken() < end)
    }

    #[must_use]
    pub fn albums_containing_photo(&self, path: &str) -> Vec<&Album> {
        self.albums.values().filter(|a| a.contains(path)).collect()
    }

    /// Fill an album bypassing the stock guard; duplicates are skipped
    ///
    /// The album is created if it does not exist. Returns the number of
    /// photos added.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidOperation` if the album name is blank.
    pub fn seed_album(&mut self, name: &str, photos: Vec<Photo>) -> Result<usize> {
        if !self.albums.contains_key(name) {
            self.add_album(name)?;
        }
        let album = self
            .albums
            .get_mut(name)
            .ok_or_else(|| ModelError::not_found(Entity::Album, name))?;

        let mut seeding = album.seeding();
        let mut added = 0;
        for photo in photos {
            match seeding.add_photo(&photo) {
                Ok(()) => {
                    self.photos.insert_or_keep(photo);
                    added += 1;
                }
                Err(ModelError::AlreadyExists { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    /// Photos in any album matching `keep`, de-duplicated by path and
    /// ordered by capture time
    pub fn photos_where<F>(&self, mut keep: F) -> Vec<&Photo>
    where
        F: FnMut(&Photo) -> bool,
    {
        let mut seen = BTreeSet::new();
        let mut found: Vec<&Photo> = Vec::new();
        for album in self.albums.values() {
            for photo in album.photos(&self.photos) {
                if keep(photo) && seen.insert(photo.path()) {
                    found.push(photo);
                }
            }
        }
        found.sort_by(|a, b| {
            a.date_taken()
                .cmp(&b.date_taken())
                .then_with(|| a.path().cmp(b.path()))
        });
        found
    }

    fn release_if_orphan(&mut self, path: &str) {
        if !self.albums.values().any(|a| a.contains(path)) && self.photos.remove(path).is_some() {
            tracing::debug!(user = %self.username, photo = %path, "photo released");
        }
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod user_tests;
