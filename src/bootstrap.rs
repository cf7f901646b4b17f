//! One-time stock seeding
//!
//! On first run there is no `stock` user. [`ensure_stock_user`] creates it
//! together with its read-only `stock` album and fills the album with the
//! bundled sample images, lifting the stock guard for that call only. Once the
//! stock user exists this is a no-op.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::path::{Path, PathBuf};

use crate::model::{self, Photo, STOCK_NAME, User, UserList};

/// What [`ensure_stock_user`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The stock user already existed; nothing changed
    AlreadyPresent,
    /// The stock user was created with this many photos; the caller should save
    Seeded(usize),
}

impl BootstrapOutcome {
    /// Whether the user list changed and should be persisted
    #[must_use]
    pub const fn is_seeded(self) -> bool {
        matches!(self, Self::Seeded(_))
    }
}

/// Create the stock user and album unless they already exist
///
/// Stock files that cannot be inspected are still added, dated at the Unix
/// epoch, so the stock album always lists every bundled image.
///
/// # Errors
///
/// Returns `ModelError` if the stock user or album cannot be created.
pub fn ensure_stock_user(users: &mut UserList, stock_photos: &[PathBuf]) -> model::Result<BootstrapOutcome> {
    if users.has_user(STOCK_NAME) {
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let photos = stock_photos.iter().map(|path| stock_photo(path)).collect();
    let mut user = User::new(STOCK_NAME);
    let added = user.seed_album(STOCK_NAME, photos)?;
    users.insert_user(user)?;

    tracing::info!(photos = added, "stock user created");
    Ok(BootstrapOutcome::Seeded(added))
}

fn stock_photo(path: &Path) -> Photo {
    Photo::from_file(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "cannot read stock photo timestamp");
        Photo::new(path.to_string_lossy(), epoch())
    })
}

fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}
