//! Hymn favorites
//!
//! Presence set of hymn numbers, kept most-recently-toggled-first.

use crate::config;
use crate::store::Store;
use std::sync::RwLock;

/// Tracker for favourite hymns.
pub struct HymnFavorites {
    store: Store,
    favorites: RwLock<Vec<u32>>,
}

impl HymnFavorites {
    pub fn load(store: Store) -> Self {
        let favorites = store.get(config::KEY_HYMN_FAVORITES, Vec::new());
        Self {
            store,
            favorites: RwLock::new(favorites),
        }
    }

    pub fn all(&self) -> Vec<u32> {
        self.favorites.read().unwrap().clone()
    }

    pub fn contains(&self, hymn_number: u32) -> bool {
        self.favorites.read().unwrap().contains(&hymn_number)
    }

    /// Flip membership for a hymn. Returns the new state: `true` when the
    /// hymn is now a favourite.
    pub fn toggle(&self, hymn_number: u32) -> bool {
        let mut favorites = self.favorites.write().unwrap();

        let now_favorite = if favorites.contains(&hymn_number) {
            favorites.retain(|&n| n != hymn_number);
            false
        } else {
            favorites.insert(0, hymn_number);
            true
        };

        self.store.set(config::KEY_HYMN_FAVORITES, &*favorites);
        now_favorite
    }
}
