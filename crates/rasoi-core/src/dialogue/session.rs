//! Per-conversation dialogue state.

use super::slot::Slot;
use super::table::StepTable;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use uuid::Uuid;

/// Collected slot values, kept in step order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotValues {
    entries: Vec<(String, String)>,
}

impl SlotValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == slot_id)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, slot_id: &str) -> bool {
        self.get(slot_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(slot_id, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sets a value, replacing an earlier one for the same slot in place.
    pub fn insert(&mut self, slot_id: impl Into<String>, value: impl Into<String>) {
        let slot_id = slot_id.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(id, _)| *id == slot_id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((slot_id, value)),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SlotValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = SlotValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

// Serialized as a JSON object in step order.
impl Serialize for SlotValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

/// Mutable state of one guided conversation.
///
/// The session owns its step index and collected values exclusively; the
/// step table is shared read-only. Invariants maintained by the flow engine:
/// - `step_index()` is always within `0..=table.len()`
/// - `values()` holds exactly the collecting slots before `step_index()`
///
/// A finished session is never reused; start a new one per conversation.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    id: String,
    created_at: String,
    table: Arc<StepTable>,
    step: usize,
    values: SlotValues,
    terminal: bool,
}

impl DialogueSession {
    /// Starts a fresh session at step 0 with no values.
    pub fn new(table: Arc<StepTable>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            table,
            step: 0,
            values: SlotValues::new(),
            terminal: false,
        }
    }

    /// Starts a session over the shared ChefGuru table.
    pub fn chef_guru() -> Self {
        Self::new(StepTable::shared_chef_guru())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation timestamp (RFC 3339)
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn values(&self) -> &SlotValues {
        &self.values
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// The slot awaiting input, or `None` once every step is done.
    pub fn current_slot(&self) -> Option<&Slot> {
        self.table.get(self.step)
    }

    pub fn remaining_steps(&self) -> usize {
        self.table.len() - self.step
    }

    /// Stores the answer for the current slot (unless it is a confirmation)
    /// and moves to the next step.
    pub(crate) fn accept_current(&mut self, raw: &str) {
        if let Some(slot) = self.table.get(self.step) {
            if !slot.is_confirmation() {
                let id = slot.id.clone();
                self.values.insert(id, raw);
            }
            self.step += 1;
        }
    }

    pub(crate) fn mark_terminal(&mut self) {
        self.terminal = true;
    }
}
