//! Bible verses and mood-based selection
//!
//! The emotional verse catalog is grouped by a closed emotion set;
//! selection within a group is uniform random. The emotion enum is the
//! type boundary: an invalid emotion cannot reach a selector.

use crate::content::devotionals::DailyDevotional;
use crate::error::{AppError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

const EMOTIONAL_VERSES_JSON: &str = include_str!("../../data/emotional_verses.json");

/// The closed set of quiz emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Alegre,
    Preocupado,
    Triste,
    Esperancoso,
    Grato,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Alegre,
        Emotion::Preocupado,
        Emotion::Triste,
        Emotion::Esperancoso,
        Emotion::Grato,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Alegre => "alegre",
            Emotion::Preocupado => "preocupado",
            Emotion::Triste => "triste",
            Emotion::Esperancoso => "esperancoso",
            Emotion::Grato => "grato",
        }
    }
}

/// One verse of the emotional catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalVerse {
    pub id: String,
    pub text: String,
    pub reference: String,
}

/// A verse with its parsed book/chapter/verse coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BibleVerse {
    pub id: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    pub reference: String,
    pub category: String,
}

impl BibleVerse {
    /// Build the daily verse from a devotional entry.
    pub fn from_devotional(devotional: &DailyDevotional) -> Self {
        let (book, chapter, verse) = parse_reference(&devotional.verse.reference);
        Self {
            id: devotional.day.to_string(),
            book,
            chapter,
            verse,
            text: devotional.verse.text.clone(),
            reference: devotional.verse.reference.clone(),
            category: "daily".to_string(),
        }
    }
}

/// Split a reference like "Salmos 23:1" or "1 Coríntios 13:4" into book,
/// chapter and verse. Falls back to chapter-only references and finally
/// to the first word with 1:1.
pub fn parse_reference(reference: &str) -> (String, u32, u32) {
    if let Some((book, rest)) = reference.rsplit_once(' ') {
        if let Some((chapter, verse)) = rest.split_once(':') {
            if let (Ok(chapter), Ok(verse)) = (chapter.parse(), verse.parse()) {
                return (book.trim().to_string(), chapter, verse);
            }
        }
        if let Ok(chapter) = rest.parse() {
            return (book.trim().to_string(), chapter, 1);
        }
    }

    let book = reference.split_whitespace().next().unwrap_or(reference);
    (book.to_string(), 1, 1)
}

#[derive(Deserialize)]
struct RawCatalog {
    alegre: Vec<EmotionalVerse>,
    preocupado: Vec<EmotionalVerse>,
    triste: Vec<EmotionalVerse>,
    esperancoso: Vec<EmotionalVerse>,
    grato: Vec<EmotionalVerse>,
}

/// Emotional verse catalog.
pub struct VerseCatalog {
    catalog: RawCatalog,
}

impl VerseCatalog {
    /// Parse the bundled catalog. Every emotion must have at least one
    /// verse so random selection can never index an empty list.
    pub fn load() -> Result<Self> {
        let catalog: RawCatalog = serde_json::from_str(EMOTIONAL_VERSES_JSON)?;
        let verses = Self { catalog };
        for emotion in Emotion::ALL {
            if verses.for_emotion(emotion).is_empty() {
                return Err(AppError::Generic(format!(
                    "No verses bundled for emotion '{}'",
                    emotion.as_str()
                )));
            }
        }
        Ok(verses)
    }

    /// All verses for an emotion, in catalog order.
    pub fn for_emotion(&self, emotion: Emotion) -> &[EmotionalVerse] {
        match emotion {
            Emotion::Alegre => &self.catalog.alegre,
            Emotion::Preocupado => &self.catalog.preocupado,
            Emotion::Triste => &self.catalog.triste,
            Emotion::Esperancoso => &self.catalog.esperancoso,
            Emotion::Grato => &self.catalog.grato,
        }
    }

    /// A uniformly-random verse for an emotion.
    pub fn random_for(&self, emotion: Emotion) -> &EmotionalVerse {
        let verses = self.for_emotion(emotion);
        let index = rand::thread_rng().gen_range(0..verses.len());
        &verses[index]
    }
}
