//! Devotional catalog and daily selection
//!
//! Devotionals are a fixed ordered list; the entry for a date is picked
//! by day-of-year modulo catalog length.

use crate::error::{AppError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const DEVOTIONALS_JSON: &str = include_str!("../../data/devotionals.json");

/// Verse text plus its reference string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseText {
    pub text: String,
    pub reference: String,
}

/// One devotional entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyDevotional {
    pub day: u32,
    pub theme: String,
    pub verse: VerseText,
    pub reflection: String,
    pub questions: Vec<String>,
    pub prayer: String,
}

/// Map a date onto a catalog slot.
///
/// `ordinal()` is 1-based (Jan 1 is day 1), matching the upstream
/// anchor where day zero is Dec 31 of the prior year. The first catalog
/// entry is therefore served on the last day of a wrap, not on Jan 1.
pub fn daily_index(date: NaiveDate, len: usize) -> usize {
    date.ordinal() as usize % len
}

/// The fixed ordered devotional catalog.
pub struct DevotionalCatalog {
    entries: Vec<DailyDevotional>,
}

impl DevotionalCatalog {
    /// Parse the bundled catalog.
    pub fn load() -> Result<Self> {
        let entries: Vec<DailyDevotional> = serde_json::from_str(DEVOTIONALS_JSON)?;
        if entries.is_empty() {
            return Err(AppError::Generic(
                "Devotional catalog is empty".to_string(),
            ));
        }
        tracing::debug!("Loaded {} devotionals", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for a calendar date. Deterministic: the same date always
    /// returns the same entry.
    pub fn for_date(&self, date: NaiveDate) -> &DailyDevotional {
        &self.entries[daily_index(date, self.entries.len())]
    }

    /// The entry for an explicit day number, wrapping past the end.
    pub fn by_day(&self, day: u32) -> &DailyDevotional {
        let index = (day.saturating_sub(1) as usize) % self.entries.len();
        &self.entries[index]
    }

    pub fn entries(&self) -> &[DailyDevotional] {
        &self.entries
    }
}
