//! Hymn catalog
//!
//! Hymns are bundled as raw JSON carrying HTML line breaks and, for part
//! of the hymnal, a composite "number - title" field. Both are normalized
//! at load so every consumer sees plain titles and newline-separated
//! lyric blocks.

use crate::error::Result;
use serde::{Deserialize, Serialize};

const HYMNS_JSON: &str = include_str!("../../data/hymns.json");

/// A hymn with normalized title and lyrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hymn {
    /// Hymnal number, unique, used as display id
    pub number: u32,
    pub title: String,
    /// Verse lyric blocks in singing order
    pub verses: Vec<String>,
    pub chorus: Option<String>,
}

#[derive(Deserialize)]
struct RawHymn {
    number: u32,
    title: String,
    verses: Vec<String>,
    chorus: Option<String>,
}

/// Replace HTML line breaks with newlines.
fn strip_breaks(text: &str) -> String {
    text.replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("<br>", "\n")
}

/// Extract the plain title from a composite "number - title" field.
fn extract_title(raw: &str) -> String {
    if let Some((prefix, rest)) = raw.split_once(" - ") {
        if prefix.trim().parse::<u32>().is_ok() {
            return rest.trim().to_string();
        }
    }
    raw.trim().to_string()
}

impl From<RawHymn> for Hymn {
    fn from(raw: RawHymn) -> Self {
        Self {
            number: raw.number,
            title: extract_title(&raw.title),
            verses: raw.verses.iter().map(|v| strip_breaks(v)).collect(),
            chorus: raw.chorus.as_deref().map(strip_breaks),
        }
    }
}

/// The bundled hymnal.
pub struct HymnCatalog {
    hymns: Vec<Hymn>,
}

impl HymnCatalog {
    /// Parse and normalize the bundled hymnal.
    pub fn load() -> Result<Self> {
        let raw: Vec<RawHymn> = serde_json::from_str(HYMNS_JSON)?;
        let hymns: Vec<Hymn> = raw.into_iter().map(Hymn::from).collect();
        tracing::debug!("Loaded {} hymns", hymns.len());
        Ok(Self { hymns })
    }

    pub fn all(&self) -> &[Hymn] {
        &self.hymns
    }

    /// Look up a hymn by its number.
    pub fn get(&self, number: u32) -> Option<&Hymn> {
        self.hymns.iter().find(|h| h.number == number)
    }

    /// Case-insensitive search over number, title and lyric lines.
    pub fn search(&self, query: &str) -> Vec<&Hymn> {
        let query_lower = query.to_lowercase();
        self.hymns
            .iter()
            .filter(|hymn| {
                hymn.title.to_lowercase().contains(&query_lower)
                    || hymn.number.to_string().contains(query)
                    || hymn
                        .verses
                        .iter()
                        .any(|line| line.to_lowercase().contains(&query_lower))
            })
            .collect()
    }
}
