//! Domain models
//!
//! Shared types persisted through the store. Every stored struct keeps
//! per-field serde defaults so data written by an older build loads
//! without a migration step.

use crate::config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile created during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    /// URL or data URI of the profile photo
    #[serde(default)]
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Font size options for reading views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Colour theme options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Pink,
    Yellow,
}

/// Prayer alarm sub-settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerAlarmSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub morning_enabled: bool,
    #[serde(default)]
    pub evening_enabled: bool,
    #[serde(default = "default_morning_time")]
    pub morning_time: String,
    #[serde(default = "default_evening_time")]
    pub evening_time: String,
    /// Alarm sound preset name
    #[serde(default = "default_alarm_sound")]
    pub sound: String,
}

fn default_morning_time() -> String {
    config::DEFAULT_MORNING_TIME.to_string()
}

fn default_evening_time() -> String {
    config::DEFAULT_EVENING_TIME.to_string()
}

fn default_alarm_sound() -> String {
    "sino".to_string()
}

impl Default for PrayerAlarmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            morning_enabled: false,
            evening_enabled: false,
            morning_time: default_morning_time(),
            evening_time: default_evening_time(),
            sound: default_alarm_sound(),
        }
    }
}

/// Application settings, replaced as a whole object. Callers that need a
/// partial change read, modify, and write back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default = "default_morning_time")]
    pub morning_time: String,
    #[serde(default = "default_evening_time")]
    pub evening_time: String,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub prayer_alarm: PrayerAlarmSettings,
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications_enabled: true,
            morning_time: default_morning_time(),
            evening_time: default_evening_time(),
            font_size: FontSize::Medium,
            prayer_alarm: PrayerAlarmSettings::default(),
        }
    }
}

/// Note categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Devotional,
    Prayer,
    Verses,
    Reflection,
}

/// A user note. `id` and `created_at` never change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub kind: NoteKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new note; id and timestamps are assigned by the container.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub kind: NoteKind,
}

/// Partial note update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub kind: Option<NoteKind>,
}

/// Calendar event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Prayer,
    Reading,
    Devotional,
    Reminder,
}

/// A user-created calendar event. No recurrence support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub time: String,
    pub kind: EventKind,
    #[serde(default)]
    pub completed: bool,
}

/// A recorded answer to the mood quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: String,
    pub emotion: crate::content::Emotion,
    pub timestamp: DateTime<Utc>,
    pub response_verse: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = AppSettings::default();

        assert!(!settings.dark_mode);
        assert!(settings.notifications_enabled);
        assert_eq!(settings.morning_time, "07:00");
        assert_eq!(settings.evening_time, "20:00");
        assert_eq!(settings.font_size, FontSize::Medium);
        assert!(!settings.prayer_alarm.enabled);
    }

    #[test]
    fn test_settings_from_partial_json() {
        // Data written before the prayer alarm fields existed must still load.
        let settings: AppSettings =
            serde_json::from_str(r#"{"dark_mode": true, "morning_time": "06:30"}"#).unwrap();

        assert!(settings.dark_mode);
        assert!(settings.notifications_enabled);
        assert_eq!(settings.morning_time, "06:30");
        assert_eq!(settings.evening_time, "20:00");
        assert_eq!(settings.prayer_alarm.sound, "sino");
    }

    #[test]
    fn test_note_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&NoteKind::Reflection).unwrap(),
            "\"reflection\""
        );
    }
}
