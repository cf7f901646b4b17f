//! Photos and the per-user photo library
//!
//! A [`Photo`] is identified by its file path. Its capture time is taken from
//! the file's last-modified time when it is first imported and never changes
//! afterwards; the image bytes themselves are never read.
//!
//! Photos are owned by a [`PhotoLibrary`] (one per user) and albums refer to
//! them by path, so a caption or tag edit is visible from every album that
//! contains the photo.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use super::error::{Entity, ModelError, Result};
use super::tag::Tag;

/// An image file with caption, capture time and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    path: String,
    #[serde(default)]
    caption: String,
    date_taken: NaiveDateTime,
    #[serde(default)]
    tags: Vec<Tag>,
}

impl Photo {
    /// Create a photo with an explicit capture time
    #[must_use]
    pub fn new(path: impl Into<String>, date_taken: NaiveDateTime) -> Self {
        Self {
            path: path.into(),
            caption: String::new(),
            date_taken,
            tags: Vec::new(),
        }
    }

    /// Create a photo whose capture time is the file's last-modified time
    ///
    /// # Errors
    ///
    /// Returns `ModelError::PhotoUnreadable` if the file metadata cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display = path.to_string_lossy().to_string();
        let date_taken =
            last_modified(path).map_err(|source| ModelError::PhotoUnreadable {
                path: display.clone(),
                source,
            })?;
        Ok(Self::new(display, date_taken))
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The file name component of the path
    #[must_use]
    pub fn name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.path)
    }

    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    #[must_use]
    pub const fn date_taken(&self) -> NaiveDateTime {
        self.date_taken
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Attach a tag
    ///
    /// Only duplicates are rejected here. Whether a second tag of a
    /// single-valued type may be attached is decided by the caller
    /// (see [`Photo::has_tag_type`]).
    ///
    /// # Errors
    ///
    /// Returns `ModelError::DuplicateTag` if an equal tag is already attached.
    pub fn add_tag(&mut self, tag: Tag) -> Result<()> {
        if self.has_tag(&tag) {
            return Err(ModelError::DuplicateTag(tag.to_string()));
        }
        self.tags.push(tag);
        Ok(())
    }

    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Remove an equal tag; absent tags are ignored
    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Whether any attached tag is of the named type (case-insensitive)
    #[must_use]
    pub fn has_tag_type(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.is_of_type(name))
    }

    pub fn tags_of_type<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| t.is_of_type(name))
    }

    /// Strip every tag of the named type, returning how many were removed
    pub fn remove_tags_of_type(&mut self, name: &str) -> usize {
        let before = self.tags.len();
        self.tags.retain(|t| !t.is_of_type(name));
        before - self.tags.len()
    }
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Photo {}

impl Hash for Photo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caption = if self.caption.is_empty() {
            "No caption"
        } else {
            &self.caption
        };
        write!(f, "{} (Caption: {})", self.name(), caption)
    }
}

/// Read a file's last-modified time as local wall-clock time
///
/// # Errors
///
/// Returns the underlying I/O error if the metadata or mtime is unavailable.
pub fn last_modified(path: &Path) -> std::io::Result<NaiveDateTime> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}

/// Arena of photos owned by a single user, keyed by path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoLibrary {
    photos: BTreeMap<String, Photo>,
}

impl PhotoLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Photo> {
        self.photos.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Photo> {
        self.photos.get_mut(path)
    }

    /// Look up a photo, failing with `NotFound`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if no photo has this path.
    pub fn require(&self, path: &str) -> Result<&Photo> {
        self.get(path)
            .ok_or_else(|| ModelError::not_found(Entity::Photo, path))
    }

    /// Mutable variant of [`PhotoLibrary::require`]
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if no photo has this path.
    pub fn require_mut(&mut self, path: &str) -> Result<&mut Photo> {
        self.photos
            .get_mut(path)
            .ok_or_else(|| ModelError::not_found(Entity::Photo, path))
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.photos.contains_key(path)
    }

    /// Insert a photo unless its path is already known; returns the stored entry
    pub fn insert_or_keep(&mut self, photo: Photo) -> &mut Photo {
        self.photos.entry(photo.path.clone()).or_insert(photo)
    }

    pub fn remove(&mut self, path: &str) -> Option<Photo> {
        self.photos.remove(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Photo> {
        self.photos.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Photo> {
        self.photos.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

#[cfg(test)]
#[path = "photo_tests.rs"]
mod photo_tests;
