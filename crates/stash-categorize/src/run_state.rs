//! State scoped to a single batch run.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use uuid::Uuid;

use stash_core::{normalize, Category, NormalizedKey};

/// Known categories for one user during one batch.
///
/// Seeded from storage at the start of the run and extended as the
/// reconciler creates categories. Discarded when the run ends.
#[derive(Debug, Clone)]
pub struct BatchRunState {
    user_id: Uuid,
    ids_by_key: HashMap<NormalizedKey, Uuid>,
    known_labels: Vec<String>,
}

impl BatchRunState {
    /// Seed from the user's existing categories, keeping load order.
    pub fn seed(user_id: Uuid, categories: &[Category]) -> Self {
        let mut state = Self {
            user_id,
            ids_by_key: HashMap::with_capacity(categories.len()),
            known_labels: Vec::with_capacity(categories.len()),
        };
        for category in categories {
            state.record(&category.name, category.id);
        }
        state
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Category id for a label, matched case-insensitively.
    pub fn lookup(&self, label: &str) -> Option<Uuid> {
        self.ids_by_key.get(&normalize(label)).copied()
    }

    /// Remember a category. The first id recorded for a key wins.
    pub fn record(&mut self, name: &str, id: Uuid) {
        if let Entry::Vacant(slot) = self.ids_by_key.entry(normalize(name)) {
            slot.insert(id);
            self.known_labels.push(name.to_string());
        }
    }

    /// Category names passed to the classifier as preferred labels.
    pub fn known_labels(&self) -> &[String] {
        &self.known_labels
    }
}
