//! Calendar events
//!
//! User-created prayer/reading/devotional/reminder events with a
//! completed flag. No recurrence.

use crate::config;
use crate::models::{CalendarEvent, EventKind};
use crate::store::Store;
use std::sync::RwLock;
use uuid::Uuid;

/// Fields for a new calendar event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub time: String,
    pub kind: EventKind,
}

/// Completion summary for the progress card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    /// Whole percentage, 0 when there are no events
    pub percent: u32,
}

/// Service owning the calendar event collection.
pub struct CalendarService {
    store: Store,
    events: RwLock<Vec<CalendarEvent>>,
}

impl CalendarService {
    pub fn load(store: Store) -> Self {
        let events = store.get(config::KEY_CALENDAR_EVENTS, Vec::new());
        Self {
            store,
            events: RwLock::new(events),
        }
    }

    pub fn all(&self) -> Vec<CalendarEvent> {
        self.events.read().unwrap().clone()
    }

    /// Events scheduled on a YYYY-MM-DD date.
    pub fn events_on(&self, date: &str) -> Vec<CalendarEvent> {
        self.events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect()
    }

    pub fn add(&self, new: NewEvent) -> CalendarEvent {
        let event = CalendarEvent {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            date: new.date,
            time: new.time,
            kind: new.kind,
            completed: false,
        };

        let mut events = self.events.write().unwrap();
        events.push(event.clone());
        self.store.set(config::KEY_CALENDAR_EVENTS, &*events);

        tracing::info!("Calendar event created: {}", event.id);
        event
    }

    /// Replace the stored fields of an event; no-op on an unknown id.
    pub fn update(&self, id: &str, update: NewEvent) -> Option<CalendarEvent> {
        let mut events = self.events.write().unwrap();

        let event = events.iter_mut().find(|e| e.id == id)?;
        event.title = update.title;
        event.description = update.description;
        event.date = update.date;
        event.time = update.time;
        event.kind = update.kind;
        let updated = event.clone();

        self.store.set(config::KEY_CALENDAR_EVENTS, &*events);
        Some(updated)
    }

    /// Flip the completed flag; no-op on an unknown id.
    pub fn toggle_completed(&self, id: &str) -> Option<bool> {
        let mut events = self.events.write().unwrap();

        let event = events.iter_mut().find(|e| e.id == id)?;
        event.completed = !event.completed;
        let completed = event.completed;

        self.store.set(config::KEY_CALENDAR_EVENTS, &*events);
        Some(completed)
    }

    pub fn delete(&self, id: &str) {
        let mut events = self.events.write().unwrap();
        let before = events.len();
        events.retain(|e| e.id != id);

        if events.len() != before {
            self.store.set(config::KEY_CALENDAR_EVENTS, &*events);
            tracing::info!("Calendar event deleted: {}", id);
        }
    }

    pub fn completion_stats(&self) -> CompletionStats {
        let events = self.events.read().unwrap();
        let total = events.len();
        let completed = events.iter().filter(|e| e.completed).count();
        let percent = if total == 0 {
            0
        } else {
            (completed * 100 / total) as u32
        };

        CompletionStats {
            total,
            completed,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn create_test_service() -> (CalendarService, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let service = CalendarService::load(Store::new(backend.clone()));
        (service, backend)
    }

    fn event(date: &str) -> NewEvent {
        NewEvent {
            title: "Oração da manhã".to_string(),
            description: String::new(),
            date: date.to_string(),
            time: "07:00".to_string(),
            kind: EventKind::Prayer,
        }
    }

    #[test]
    fn test_add_and_filter_by_date() {
        let (service, _backend) = create_test_service();

        service.add(event("2024-06-01"));
        service.add(event("2024-06-01"));
        service.add(event("2024-06-02"));

        assert_eq!(service.events_on("2024-06-01").len(), 2);
        assert_eq!(service.events_on("2024-06-03").len(), 0);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (service, _backend) = create_test_service();

        assert!(service.update("missing", event("2024-06-01")).is_none());
    }

    #[test]
    fn test_toggle_completed_and_stats() {
        let (service, _backend) = create_test_service();

        let a = service.add(event("2024-06-01"));
        service.add(event("2024-06-02"));

        assert_eq!(service.toggle_completed(&a.id), Some(true));

        let stats = service.completion_stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.percent, 50);
    }

    #[test]
    fn test_stats_with_no_events() {
        let (service, _backend) = create_test_service();

        assert_eq!(service.completion_stats().percent, 0);
    }

    #[test]
    fn test_events_survive_reload() {
        let (service, backend) = create_test_service();

        let added = service.add(event("2024-12-25"));

        let reloaded = CalendarService::load(Store::new(backend));
        let events = reloaded.all();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, added.id);
    }

    #[test]
    fn test_delete() {
        let (service, _backend) = create_test_service();

        let added = service.add(event("2024-06-01"));
        service.delete(&added.id);

        assert!(service.all().is_empty());
    }
}
