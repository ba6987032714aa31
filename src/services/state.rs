//! Application state container
//!
//! Single source of truth for user profile, settings and notes. Every
//! mutation updates the in-memory copy and the persisted store in the
//! same call; with a single writer there is no consistency window to
//! manage.

use crate::config;
use crate::content::Emotion;
use crate::models::{
    AppSettings, NewNote, Note, NoteUpdate, QuizResponse, Theme, UserProfile,
};
use crate::store::Store;
use chrono::Utc;
use std::sync::RwLock;
use uuid::Uuid;

/// Which screen set the view layer should present.
///
/// `Onboarding` iff no user profile exists. Clearing the user re-enters
/// onboarding, so the two states form a cycle rather than a one-way door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Onboarding,
    Active,
}

struct StateData {
    user: Option<UserProfile>,
    settings: AppSettings,
    notes: Vec<Note>,
}

/// Service owning user, settings and notes.
pub struct StateService {
    store: Store,
    inner: RwLock<StateData>,
}

impl StateService {
    /// Load persisted state, substituting defaults for anything missing
    /// or corrupt.
    pub fn load(store: Store) -> Self {
        let data = StateData {
            user: store.get(config::KEY_USER, None),
            settings: store.get(config::KEY_SETTINGS, AppSettings::default()),
            notes: store.get(config::KEY_NOTES, Vec::new()),
        };

        tracing::info!(
            "State loaded: user={}, {} notes",
            data.user.is_some(),
            data.notes.len()
        );

        Self {
            store,
            inner: RwLock::new(data),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.inner.read().unwrap().user.is_some() {
            Phase::Active
        } else {
            Phase::Onboarding
        }
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.read().unwrap().user.clone()
    }

    /// Replace the stored user. `None` signals onboarding has not
    /// completed and the view layer must show the onboarding flow.
    pub fn set_user(&self, user: Option<UserProfile>) -> Phase {
        let mut data = self.inner.write().unwrap();
        data.user = user;
        self.store.set(config::KEY_USER, &data.user);

        if data.user.is_some() {
            Phase::Active
        } else {
            Phase::Onboarding
        }
    }

    pub fn settings(&self) -> AppSettings {
        self.inner.read().unwrap().settings.clone()
    }

    /// Whole-object replace. Callers needing a partial change must
    /// read-modify-write.
    pub fn set_settings(&self, settings: AppSettings) {
        let mut data = self.inner.write().unwrap();
        data.settings = settings;
        self.store.set(config::KEY_SETTINGS, &data.settings);
    }

    /// The selected colour theme, stored under its own key.
    pub fn theme(&self) -> Theme {
        self.store.get(config::KEY_THEME, Theme::default())
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(config::KEY_THEME, &theme);
    }

    pub fn notes(&self) -> Vec<Note> {
        self.inner.read().unwrap().notes.clone()
    }

    /// Create a note. The id is assigned here and never changes.
    pub fn add_note(&self, new: NewNote) -> Note {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            kind: new.kind,
            created_at: now,
            updated_at: now,
        };

        let mut data = self.inner.write().unwrap();
        data.notes.push(note.clone());
        self.store.set(config::KEY_NOTES, &data.notes);

        tracing::info!("Note created: {}", note.id);
        note
    }

    /// Merge partial fields into an existing note, refreshing
    /// `updated_at`. Unknown ids are a silent no-op; `id` and
    /// `created_at` are immutable.
    pub fn update_note(&self, id: &str, update: NoteUpdate) -> Option<Note> {
        let mut data = self.inner.write().unwrap();

        let note = data.notes.iter_mut().find(|n| n.id == id)?;
        if let Some(title) = update.title {
            note.title = title;
        }
        if let Some(content) = update.content {
            note.content = content;
        }
        if let Some(kind) = update.kind {
            note.kind = kind;
        }
        note.updated_at = Utc::now();
        let updated = note.clone();

        self.store.set(config::KEY_NOTES, &data.notes);

        tracing::debug!("Note updated: {}", id);
        Some(updated)
    }

    /// Remove a note; no-op when the id is unknown.
    pub fn delete_note(&self, id: &str) {
        let mut data = self.inner.write().unwrap();
        let before = data.notes.len();
        data.notes.retain(|n| n.id != id);

        if data.notes.len() != before {
            self.store.set(config::KEY_NOTES, &data.notes);
            tracing::info!("Note deleted: {}", id);
        }
    }

    /// Record a quiz answer and the verse it surfaced.
    pub fn record_quiz_response(&self, emotion: Emotion, response_verse: &str) -> QuizResponse {
        let response = QuizResponse {
            id: Uuid::new_v4().to_string(),
            emotion,
            timestamp: Utc::now(),
            response_verse: response_verse.to_string(),
        };

        let mut responses: Vec<QuizResponse> =
            self.store.get(config::KEY_QUIZ_RESPONSES, Vec::new());
        responses.push(response.clone());
        self.store.set(config::KEY_QUIZ_RESPONSES, &responses);

        response
    }

    pub fn quiz_responses(&self) -> Vec<QuizResponse> {
        self.store.get(config::KEY_QUIZ_RESPONSES, Vec::new())
    }
}
