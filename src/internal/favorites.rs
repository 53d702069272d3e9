use super::models::FavoriteEntry;
use super::prefs::{PrefKey, PrefStore};

/// The user's saved items, newest first. At most one entry per id; the
/// invariant is enforced by a linear lookup before every insert, which is
/// plenty for a hand-curated collection.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    pub entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &PrefStore) -> Self {
        Self {
            entries: store.get(PrefKey::Favorites, Vec::new()),
        }
    }

    pub fn save(&self, store: &PrefStore) {
        store.set(PrefKey::Favorites, &self.entries);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    pub fn add(&mut self, entry: FavoriteEntry) {
        if !self.contains(entry.id()) {
            self.entries.insert(0, entry);
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|entry| entry.id() != id);
    }

    /// Add `entry` when its id is absent, remove the stored entry otherwise.
    /// Returns true when the entry ended up in the collection.
    pub fn toggle(&mut self, entry: FavoriteEntry) -> bool {
        let id = entry.id().to_string();
        match self.contains(&id) {
            true => {
                self.remove(&id);
                false
            }
            false => {
                self.add(entry);
                true
            }
        }
    }

    /// The saved entries the favorites view actually shows. Quote and tip
    /// favorites stay reachable from their own regions.
    pub fn videos(&self) -> Vec<&FavoriteEntry> {
        self.entries.iter().filter(|entry| entry.is_video()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::models::{Quote, Tip, Video};

    fn video(id: &str) -> Video {
        Video {
            video_id: id.to_string(),
            title: format!("Video {id}"),
            channel_title: "Channel".to_string(),
        }
    }

    #[test]
    fn test_add_remove_favorite() {
        let mut favorites = Favorites::new();
        favorites.add(FavoriteEntry::from_video(&video("a")));
        assert!(favorites.contains("a"));
        assert_eq!(favorites.len(), 1);

        favorites.remove("a");
        assert!(!favorites.contains("a"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_favorite() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle(FavoriteEntry::from_video(&video("b"))));
        assert!(favorites.contains("b"));

        assert!(!favorites.toggle(FavoriteEntry::from_video(&video("b"))));
        assert!(!favorites.contains("b"));
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let mut favorites = Favorites::new();
        favorites.add(FavoriteEntry::from_video(&video("c")));
        favorites.add(FavoriteEntry::from_video(&video("c")));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_newest_entry_sits_first() {
        let mut favorites = Favorites::new();
        favorites.add(FavoriteEntry::from_video(&video("old")));
        favorites.add(FavoriteEntry::from_video(&video("new")));
        assert_eq!(favorites.entries[0].id(), "new");
        assert_eq!(favorites.entries[1].id(), "old");
    }

    #[test]
    fn test_videos_filters_other_variants() {
        let quote = Quote {
            id: "quote-of-the-day".to_string(),
            text: "Rest.".to_string(),
            author: "Anon".to_string(),
        };
        let tip = Tip {
            id: "tip-1".to_string(),
            title: "Stretch".to_string(),
            content: "Stretch daily.".to_string(),
            category: "fitness".to_string(),
            source: String::new(),
        };

        let mut favorites = Favorites::new();
        favorites.add(FavoriteEntry::from_quote(&quote));
        favorites.add(FavoriteEntry::from_tip(&tip));
        favorites.add(FavoriteEntry::from_video(&video("v1")));

        let videos = favorites.videos();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id(), "v1");
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = std::env::temp_dir().join("wellness-favorites-roundtrip");
        let _ = std::fs::remove_dir_all(&dir);
        let store = PrefStore::at(dir);

        let mut favorites = Favorites::new();
        favorites.add(FavoriteEntry::from_video(&video("persisted")));
        favorites.save(&store);

        let restored = Favorites::load(&store);
        assert_eq!(restored.len(), 1);
        assert!(restored.contains("persisted"));
    }
}
