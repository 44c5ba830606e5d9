use crate::models::Generation;
use uuid::Uuid;

pub const HISTORY_CAPACITY: usize = 10;

/// Newest-first record of past generations for one session. Insertion at the
/// head evicts from the tail once the capacity is reached; entries are never
/// removed individually, only by `clear`.
#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    entries: Vec<Generation>,
}

impl HistoryStore {
    pub fn record(&mut self, generation: Generation) {
        self.entries.insert(0, generation);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> Vec<Generation> {
        self.entries.clone()
    }

    pub fn get(&self, id: Uuid) -> Option<&Generation> {
        self.entries.iter().find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SizePreset, StylePreset};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn generation(prompt: &str) -> Generation {
        Generation {
            id: Uuid::new_v4(),
            original_prompt: prompt.to_string(),
            enhanced_prompt: prompt.to_string(),
            style: StylePreset::None,
            size_label: SizePreset::Square.dimension_label(),
            width: 512,
            height: 512,
            image_base64: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn records_newest_first() {
        let mut store = HistoryStore::default();
        store.record(generation("first"));
        store.record(generation("second"));
        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].original_prompt, "second");
        assert_eq!(listed[1].original_prompt, "first");
    }

    #[test]
    fn capacity_is_a_strict_bound() {
        let mut store = HistoryStore::default();
        for i in 0..25 {
            store.record(generation(&format!("prompt {}", i)));
        }
        let listed = store.list();
        assert_eq!(listed.len(), HISTORY_CAPACITY);
        // The ten most recent survive, newest at index 0.
        for (idx, entry) in listed.iter().enumerate() {
            assert_eq!(entry.original_prompt, format!("prompt {}", 24 - idx));
        }
    }

    #[test]
    fn clear_empties_regardless_of_contents() {
        let mut store = HistoryStore::default();
        assert!(store.list().is_empty());
        store.clear();
        assert!(store.list().is_empty());

        for i in 0..5 {
            store.record(generation(&format!("prompt {}", i)));
        }
        store.clear();
        assert!(store.list().is_empty());
    }

    #[test]
    fn duplicate_prompts_are_kept() {
        let mut store = HistoryStore::default();
        store.record(generation("same"));
        store.record(generation("same"));
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn get_finds_by_id() {
        let mut store = HistoryStore::default();
        let wanted = generation("wanted");
        let id = wanted.id;
        store.record(generation("other"));
        store.record(wanted);
        assert_eq!(store.get(id).map(|g| g.original_prompt.as_str()), Some("wanted"));
        assert_eq!(store.get(Uuid::new_v4()).map(|g| g.id), None);
    }
}
