//! Albums
//!
//! An [`Album`] is a named, ordered list of photo paths pointing into the
//! owning user's [`PhotoLibrary`]. Query helpers take the library so they can
//! resolve paths to photos.
//!
//! The album named `stock` (any case) is read-only: adding or removing photos
//! fails with `InvalidOperation`. The one-time stock bootstrap fills it through
//! [`Album::seeding`], which lifts the guard for the lifetime of the returned
//! handle only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{Entity, ModelError, Result};
use super::photo::{Photo, PhotoLibrary};
use super::tag::Tag;
use super::STOCK_NAME;

/// Display format for capture times in summaries
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockGuard {
    Enforced,
    Lifted,
}

/// A named, ordered collection of photos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    name: String,
    #[serde(default)]
    photos: Vec<String>,
}

impl Album {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!(album = %name, "album created");
        Self {
            name,
            photos: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether this is the protected stock album
    #[must_use]
    pub fn is_stock(&self) -> bool {
        self.name.eq_ignore_ascii_case(STOCK_NAME)
    }

    /// Photo paths in insertion order
    #[must_use]
    pub fn photo_paths(&self) -> &[String] {
        &self.photos
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.photos.iter().any(|p| p == path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Append a photo
    ///
    /// # Errors
    ///
    /// * `ModelError::InvalidOperation` if this is the stock album
    /// * `ModelError::AlreadyExists` if a photo with the same path is present
    pub fn add_photo(&mut self, photo: &Photo) -> Result<()> {
        self.insert(photo, StockGuard::Enforced)
    }

    /// Remove a photo by path; absent photos are ignored
    ///
    /// Returns whether the photo was present.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidOperation` if this is the stock album.
    pub fn remove_photo(&mut self, photo: &Photo) -> Result<bool> {
        self.remove_path(photo.path())
    }

    /// Same as [`Album::remove_photo`], keyed by path
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidOperation` if this is the stock album.
    pub fn remove_path(&mut self, path: &str) -> Result<bool> {
        self.detach(path, StockGuard::Enforced)
    }

    /// Open a seeding scope in which the stock guard is lifted
    pub fn seeding(&mut self) -> Seeding<'_> {
        Seeding { album: self }
    }

    fn check_guard(&self, guard: StockGuard, action: &str) -> Result<()> {
        if guard == StockGuard::Enforced && self.is_stock() {
            return Err(ModelError::InvalidOperation(format!(
                "Cannot {action} the stock album"
            )));
        }
        Ok(())
    }

    fn insert(&mut self, photo: &Photo, guard: StockGuard) -> Result<()> {
        self.check_guard(guard, "add photos to")?;
        if self.contains(photo.path()) {
            return Err(ModelError::already_exists(Entity::Photo, photo.path()));
        }
        self.photos.push(photo.path().to_string());
        Ok(())
    }

    fn detach(&mut self, path: &str, guard: StockGuard) -> Result<bool> {
        self.check_guard(guard, "remove photos from")?;
        let before = self.photos.len();
        self.photos.retain(|p| p != path);
        Ok(self.photos.len() != before)
    }

    /// Resolve this album's photos in order
    pub fn photos<'a>(&'a self, library: &'a PhotoLibrary) -> impl Iterator<Item = &'a Photo> + 'a {
        self.photos.iter().filter_map(|path| library.get(path))
    }

    /// Photos carrying a tag equal to `tag`
    #[must_use]
    pub fn photos_by_tag<'a>(&'a self, library: &'a PhotoLibrary, tag: &Tag) -> Vec<&'a Photo> {
        self.photos(library).filter(|p| p.has_tag(tag)).collect()
    }

    /// Photos taken strictly after `start` and strictly before `end`
    #[must_use]
    pub fn photos_in_date_range<'a>(
        &'a self,
        library: &'a PhotoLibrary,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<&'a Photo> {
        self.photos(library)
            .filter(|p| p.date_taken() > start && p.date_taken() < end)
            .collect()
    }

    #[must_use]
    pub fn earliest_date(&self, library: &PhotoLibrary) -> Option<NaiveDateTime> {
        self.photos(library).map(Photo::date_taken).min()
    }

    #[must_use]
    pub fn latest_date(&self, library: &PhotoLibrary) -> Option<NaiveDateTime> {
        self.photos(library).map(Photo::date_taken).max()
    }

    /// Human-readable date range, or `No photos` for an empty album
    #[must_use]
    pub fn date_range(&self, library: &PhotoLibrary) -> String {
        match (self.earliest_date(library), self.latest_date(library)) {
            (Some(first), Some(last)) => format!(
                "{} -- {}",
                first.format(DATE_DISPLAY_FORMAT),
                last.format(DATE_DISPLAY_FORMAT)
            ),
            _ => "No photos".to_string(),
        }
    }

    #[must_use]
    pub fn summary<'a>(&'a self, library: &PhotoLibrary) -> AlbumSummary<'a> {
        AlbumSummary {
            name: &self.name,
            photo_count: self.len(),
            date_range: self.date_range(library),
        }
    }
}

// Albums are keyed by name within a user.
impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Album {}

/// Handle returned by [`Album::seeding`]; mutations skip the stock guard
pub struct Seeding<'a> {
    album: &'a mut Album,
}

impl Seeding<'_> {
    /// # Errors
    ///
    /// Returns `ModelError::AlreadyExists` if the photo is already present.
    pub fn add_photo(&mut self, photo: &Photo) -> Result<()> {
        self.album.insert(photo, StockGuard::Lifted)
    }

    /// # Errors
    ///
    /// Never fails while seeding; the signature mirrors [`Album::remove_photo`].
    pub fn remove_photo(&mut self, photo: &Photo) -> Result<bool> {
        self.album.detach(photo.path(), StockGuard::Lifted)
    }
}

/// Count and date range of an album, for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary<'a> {
    pub name: &'a str,
    pub photo_count: usize,
    pub date_range: String,
}

impl fmt::Display for AlbumSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} | {} photos | Date Range: {}",
            self.name, self.photo_count, self.date_range
        )
    }
}

#[cfg(test)]
#[path = "album_tests.rs"]
mod album_tests;
