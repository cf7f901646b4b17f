//! Slideshow cursor
//!
//! Steps through a fixed list of photos; moving past either end wraps around.

use crate::model::Photo;

/// A wrapping cursor over an album's photos
#[derive(Debug, Clone)]
pub struct Slideshow<'a> {
    photos: Vec<&'a Photo>,
    index: usize,
}

impl<'a> Slideshow<'a> {
    /// Start at the first photo
    pub fn new(photos: impl IntoIterator<Item = &'a Photo>) -> Self {
        Self {
            photos: photos.into_iter().collect(),
            index: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&'a Photo> {
        self.photos.get(self.index).copied()
    }

    /// Advance, wrapping to the first photo after the last
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a Photo> {
        if self.photos.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.photos.len();
        self.current()
    }

    /// Step back, wrapping to the last photo before the first
    pub fn previous(&mut self) -> Option<&'a Photo> {
        if self.photos.is_empty() {
            return None;
        }
        self.index = (self.index + self.photos.len() - 1) % self.photos.len();
        self.current()
    }

    /// 1-based position and total, e.g. `(2, 5)`
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        (!self.photos.is_empty()).then(|| (self.index + 1, self.photos.len()))
    }
}
