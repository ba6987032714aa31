//! Recently viewed hymns
//!
//! Capped, de-duplicated, most-recent-first list of hymn numbers.
//! Re-adding a number moves it to the front instead of duplicating it.

use crate::config;
use crate::store::Store;
use std::sync::RwLock;

/// Tracker for the recent-hymns list.
pub struct RecentHymns {
    store: Store,
    hymns: RwLock<Vec<u32>>,
}

impl RecentHymns {
    /// Load the persisted list; anything unparseable becomes an empty list.
    pub fn load(store: Store) -> Self {
        let hymns = store.get(config::KEY_RECENT_HYMNS, Vec::new());
        Self {
            store,
            hymns: RwLock::new(hymns),
        }
    }

    pub fn all(&self) -> Vec<u32> {
        self.hymns.read().unwrap().clone()
    }

    /// Record a hymn view: remove any existing occurrence, prepend,
    /// truncate to the cap, persist.
    pub fn add(&self, hymn_number: u32) {
        let mut hymns = self.hymns.write().unwrap();

        hymns.retain(|&n| n != hymn_number);
        hymns.insert(0, hymn_number);
        hymns.truncate(config::MAX_RECENT_HYMNS);

        self.store.set(config::KEY_RECENT_HYMNS, &*hymns);
    }

    /// Empty the list and drop the persisted key.
    pub fn clear(&self) {
        self.hymns.write().unwrap().clear();
        self.store.remove(config::KEY_RECENT_HYMNS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn create_test_tracker() -> (RecentHymns, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let tracker = RecentHymns::load(Store::new(backend.clone()));
        (tracker, backend)
    }

    #[test]
    fn test_add_prepends_most_recent() {
        let (tracker, _backend) = create_test_tracker();

        tracker.add(1);
        tracker.add(15);
        tracker.add(19);

        assert_eq!(tracker.all(), vec![19, 15, 1]);
    }

    #[test]
    fn test_readding_moves_to_front_without_duplicate() {
        let (tracker, _backend) = create_test_tracker();

        tracker.add(5);
        tracker.add(7);
        let len_before = tracker.all().len();

        tracker.add(5);

        let hymns = tracker.all();
        assert_eq!(hymns[0], 5);
        assert_eq!(hymns.len(), len_before);
        assert_eq!(hymns.iter().filter(|&&n| n == 5).count(), 1);
    }

    #[test]
    fn test_list_is_capped_at_seven() {
        let (tracker, _backend) = create_test_tracker();

        for n in 1..=8 {
            tracker.add(n);
        }

        let hymns = tracker.all();
        assert_eq!(hymns.len(), 7);
        assert_eq!(hymns[0], 8);
        // The oldest entry was evicted.
        assert!(!hymns.contains(&1));
    }

    #[test]
    fn test_list_survives_reload() {
        let (tracker, backend) = create_test_tracker();

        tracker.add(291);
        tracker.add(100);

        let reloaded = RecentHymns::load(Store::new(backend));
        assert_eq!(reloaded.all(), vec![100, 291]);
    }

    #[test]
    fn test_corrupt_list_falls_back_to_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .write(config::KEY_RECENT_HYMNS, "\"not an array\"")
            .unwrap();

        let tracker = RecentHymns::load(Store::new(backend));

        assert!(tracker.all().is_empty());
    }

    #[test]
    fn test_clear_removes_persisted_key() {
        let (tracker, backend) = create_test_tracker();

        tracker.add(1);
        tracker.clear();

        assert!(tracker.all().is_empty());
        assert!(backend.read(config::KEY_RECENT_HYMNS).is_none());
    }
}
