//! Content catalogs
//!
//! Immutable devotional, verse and hymn catalogs bundled with the app
//! and parsed once at startup. Selection over the catalogs is pure:
//! the same calendar date always maps to the same devotional and daily
//! verse, while mood-based selection is explicitly random.

pub mod devotionals;
pub mod hymns;
pub mod verses;

pub use devotionals::{daily_index, DailyDevotional, DevotionalCatalog};
pub use hymns::{Hymn, HymnCatalog};
pub use verses::{BibleVerse, Emotion, EmotionalVerse, VerseCatalog};

use crate::error::Result;
use chrono::{Local, NaiveDate};

/// All bundled catalogs, loaded once and shared read-only.
pub struct ContentLibrary {
    pub devotionals: DevotionalCatalog,
    pub verses: VerseCatalog,
    pub hymns: HymnCatalog,
}

impl ContentLibrary {
    /// Parse every bundled catalog.
    pub fn load() -> Result<Self> {
        Ok(Self {
            devotionals: DevotionalCatalog::load()?,
            verses: VerseCatalog::load()?,
            hymns: HymnCatalog::load()?,
        })
    }

    /// Today's devotional entry.
    pub fn daily_devotional(&self) -> &DailyDevotional {
        self.devotionals.for_date(Local::now().date_naive())
    }

    /// Today's verse, derived from the devotional catalog.
    pub fn daily_verse(&self) -> BibleVerse {
        self.verse_for_date(Local::now().date_naive())
    }

    /// The verse for an arbitrary date.
    pub fn verse_for_date(&self, date: NaiveDate) -> BibleVerse {
        let devotional = self.devotionals.for_date(date);
        BibleVerse::from_devotional(devotional)
    }

    /// A uniformly-random verse for the given emotion.
    pub fn verse_for_emotion(&self, emotion: Emotion) -> &EmotionalVerse {
        self.verses.random_for(emotion)
    }
}
