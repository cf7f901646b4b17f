//! Testing utilities for photos
//!
//! Fixtures for unit tests: timestamp shorthands, a temporary directory of
//! photo files with chosen modification times, and a populated sample user.
//!
//! Only available when compiled with `cfg(test)`.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

use crate::model::{Photo, User};

/// Midnight on the given day
///
/// # Panics
/// Panics if the date is invalid.
#[must_use]
pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    at_time(year, month, day, 0, 0, 0)
}

/// A full timestamp
///
/// # Panics
/// Panics if the date or time is invalid.
#[must_use]
pub fn at_time(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .expect("valid test timestamp")
}

/// Temporary directory of empty photo files that is removed on drop
///
/// # Examples
/// ```ignore
/// let dir = PhotoDir::new();
/// let path = dir.create("beach.jpg", at(2024, 7, 1));
/// assert_eq!(Photo::from_file(&path).unwrap().date_taken(), at(2024, 7, 1));
/// ```
pub struct PhotoDir {
    dir: TempDir,
}

impl PhotoDir {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create `name` with its modification time set to `modified` (local time)
    ///
    /// # Panics
    /// Panics if the file cannot be created or its mtime cannot be set.
    pub fn create(&self, name: &str, modified: NaiveDateTime) -> PathBuf {
        let path = self.dir.path().join(name);
        let file = File::create(&path).expect("Failed to create photo file");
        let local = Local
            .from_local_datetime(&modified)
            .earliest()
            .expect("timestamp representable in local time");
        file.set_modified(SystemTime::from(local))
            .expect("Failed to set mtime");
        path
    }
}

/// A user with three albums and tagged photos
///
/// | photo          | taken      | albums            | tags                         |
/// |----------------|------------|-------------------|------------------------------|
/// | colosseum.jpg  | 2023-09-20 | rome              | location=rome, people=bob    |
/// | eiffel.jpg     | 2024-05-10 | paris             | location=paris, people=alice |
/// | louvre.jpg     | 2024-06-01 | paris, favorites  | location=paris, people=alice |
///
/// # Panics
/// Panics if the fixture cannot be built.
#[must_use]
pub fn sample_user() -> User {
    let mut user = User::new("alice");
    for album in ["paris", "rome", "favorites"] {
        user.add_album(album).expect("album");
    }
    let photos = [
        ("colosseum.jpg", at(2023, 9, 20), "rome", "rome", "bob"),
        ("eiffel.jpg", at(2024, 5, 10), "paris", "paris", "alice"),
        ("louvre.jpg", at(2024, 6, 1), "paris", "paris", "alice"),
    ];
    for (path, taken, album, location, person) in photos {
        user.import_photo(album, Photo::new(path, taken)).expect("import");
        user.tag_photo(path, "location", location).expect("location tag");
        user.tag_photo(path, "people", person).expect("people tag");
    }
    user.copy_photo("louvre.jpg", "paris", "favorites").expect("copy");
    user
}
