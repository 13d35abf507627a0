//! In-memory store of saved scenarios
//!
//! Append-only for the lifetime of a session: saved entries own copies of
//! their input and result, so a later recompute of the "current" scenario
//! can never retroactively alter a saved comparison row. The only bulk
//! mutation is `clear`.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evaluation::ScenarioResult;
use crate::scenario::ScenarioInput;

/// A scenario promoted into the comparison list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScenario {
    /// Session-unique, monotonically increasing
    pub id: u64,
    pub name: String,
    pub notes: Option<String>,
    pub saved_at: DateTime<Utc>,
    pub input: ScenarioInput,
    pub result: ScenarioResult,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    scenarios: Vec<SavedScenario>,
}

/// Ordered collection of saved scenarios
///
/// Appends are serialized behind a mutex; `list` returns entries in
/// insertion order.
#[derive(Debug, Default)]
pub struct ScenarioStore {
    inner: Mutex<StoreInner>,
}

impl ScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scenario, assigning the next id
    pub fn save(
        &self,
        input: &ScenarioInput,
        result: &ScenarioResult,
        name: &str,
        notes: Option<&str>,
    ) -> SavedScenario {
        let mut inner = self.inner.lock().expect("scenario store mutex poisoned");
        inner.next_id += 1;
        let saved = SavedScenario {
            id: inner.next_id,
            name: name.to_string(),
            notes: notes.map(str::to_string),
            saved_at: Utc::now(),
            input: input.clone(),
            result: result.clone(),
        };
        inner.scenarios.push(saved.clone());
        log::debug!("saved scenario #{} '{}'", saved.id, saved.name);
        saved
    }

    /// All saved scenarios in insertion order
    pub fn list(&self) -> Vec<SavedScenario> {
        self.inner
            .lock()
            .expect("scenario store mutex poisoned")
            .scenarios
            .clone()
    }

    /// Remove every saved scenario; ids keep increasing afterwards
    pub fn clear(&self) {
        self.inner
            .lock()
            .expect("scenario store mutex poisoned")
            .scenarios
            .clear();
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("scenario store mutex poisoned")
            .scenarios
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::CostBenefitEngine;

    fn evaluated() -> (ScenarioInput, ScenarioResult) {
        let input = ScenarioInput::example();
        let result = CostBenefitEngine::default_lonelyless()
            .evaluate(&input)
            .unwrap();
        (input, result)
    }

    #[test]
    fn test_save_and_list_round_trip() {
        let store = ScenarioStore::new();
        let (input, result) = evaluated();

        let saved = store.save(&input, &result, "Base case", Some("pilot"));
        let listed = store.list();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, saved.id);
        assert_eq!(listed[0].name, "Base case");
        assert_eq!(listed[0].notes.as_deref(), Some("pilot"));
        // Stored result is an unmodified copy of what was passed in
        assert_eq!(listed[0].result, result);
        assert_eq!(listed[0].input, input);
    }

    #[test]
    fn test_ids_are_unique_and_order_is_insertion() {
        let store = ScenarioStore::new();
        let (input, result) = evaluated();

        let a = store.save(&input, &result, "A", None);
        let b = store.save(&input, &result, "B", None);
        let c = store.save(&input, &result, "C", None);

        assert!(a.id < b.id && b.id < c.id);
        let names: Vec<String> = store.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_clear_does_not_recycle_ids() {
        let store = ScenarioStore::new();
        let (input, result) = evaluated();

        let first = store.save(&input, &result, "A", None);
        store.clear();
        assert!(store.is_empty());

        let second = store.save(&input, &result, "B", None);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_saved_copy_is_independent_of_later_results() {
        let store = ScenarioStore::new();
        let (input, result) = evaluated();
        store.save(&input, &result, "Base", None);

        // Re-evaluate a different configuration; the saved row must not move
        let mut changed = input.clone();
        changed.base_cost_per_session = 80.0;
        let _ = CostBenefitEngine::default_lonelyless()
            .evaluate(&changed)
            .unwrap();

        assert_eq!(store.list()[0].result, result);
    }
}
