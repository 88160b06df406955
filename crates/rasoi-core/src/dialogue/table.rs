//! Step definition tables.
//!
//! A `StepTable` is the immutable, ordered list of slots a dialogue walks
//! through. Tables are shared read-only between sessions (`Arc<StepTable>`).

use super::slot::{Choice, InputKind, Slot, SlotValidator};
use crate::error::{RasoiError, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

/// Slot identifiers of the ChefGuru suggestion flow.
pub mod slot_ids {
    pub const DISH_NAME: &str = "dish_name";
    pub const ORDER_DATE: &str = "order_date";
    pub const OPTION_TYPE: &str = "option_type";
    pub const LANGUAGE: &str = "language";
    pub const CONFIRM: &str = "confirm";
}

static CHEF_GURU_TABLE: Lazy<Arc<StepTable>> = Lazy::new(|| Arc::new(StepTable::chef_guru()));

/// Ordered, read-only sequence of slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTable {
    slots: Vec<Slot>,
}

impl StepTable {
    /// Builds a table after checking it is usable.
    ///
    /// Rejects empty tables, duplicate slot ids, and single-choice slots that
    /// declare no choices.
    pub fn new(slots: Vec<Slot>) -> Result<Self> {
        if slots.is_empty() {
            return Err(RasoiError::invalid_table("a table needs at least one slot"));
        }

        let mut seen = HashSet::new();
        for slot in &slots {
            if !seen.insert(slot.id.as_str()) {
                return Err(RasoiError::invalid_table(format!(
                    "duplicate slot id '{}'",
                    slot.id
                )));
            }
            if slot.kind == InputKind::SingleChoice && slot.choices.is_empty() {
                return Err(RasoiError::invalid_table(format!(
                    "single-choice slot '{}' declares no choices",
                    slot.id
                )));
            }
        }

        Ok(Self { slots })
    }

    /// The ChefGuru topping/add-on suggestion flow.
    ///
    /// 1. dish name (free text)
    /// 2. order date (`YYYY-MM-DD`)
    /// 3. option type: topping / addon / both
    /// 4. reply language: english / marathi
    /// 5. confirmation: predict
    pub fn chef_guru() -> Self {
        Self {
            slots: vec![
                Slot::free_text(slot_ids::DISH_NAME, "🍽️ Which dish would you like suggestions for?")
                    .with_validator(SlotValidator::NonEmpty),
                Slot::free_text(slot_ids::ORDER_DATE, "📅 Please enter the date (YYYY-MM-DD).")
                    .with_validator(SlotValidator::IsoDate),
                Slot::single_choice(
                    slot_ids::OPTION_TYPE,
                    "🔍 Choose what you want suggestions for:",
                    vec![
                        Choice::new("Toppings", "topping").with_icon("👨‍🍳"),
                        Choice::new("Add-ons", "addon").with_icon("📦"),
                        Choice::new("Both", "both").with_icon("🧩"),
                    ],
                ),
                Slot::single_choice(
                    slot_ids::LANGUAGE,
                    "🌐 Choose language:",
                    vec![
                        Choice::new("GB English", "english"),
                        Choice::new("IN Marathi", "marathi"),
                    ],
                ),
                Slot::confirmation(
                    slot_ids::CONFIRM,
                    "✅ Ready to predict! Click below:",
                    Choice::new("Predict", "predict").with_icon("🌐"),
                ),
            ],
        }
    }

    /// Process-wide shared instance of [`StepTable::chef_guru`].
    pub fn shared_chef_guru() -> Arc<StepTable> {
        Arc::clone(&CHEF_GURU_TABLE)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Index of the slot with the given id.
    pub fn position(&self, slot_id: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.id == slot_id)
    }

    /// Number of slots that store a value (everything except confirmations).
    pub fn collecting_len(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_confirmation()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chef_guru_table_passes_construction_checks() {
        let table = StepTable::chef_guru();
        let rebuilt = StepTable::new(table.slots().to_vec()).expect("builtin table is valid");
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn test_chef_guru_order() {
        let table = StepTable::chef_guru();
        let ids: Vec<&str> = table.slots().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                slot_ids::DISH_NAME,
                slot_ids::ORDER_DATE,
                slot_ids::OPTION_TYPE,
                slot_ids::LANGUAGE,
                slot_ids::CONFIRM
            ]
        );
        assert_eq!(table.len(), 5);
        assert_eq!(table.collecting_len(), 4);
        assert!(table.get(4).unwrap().is_confirmation());
    }

    #[test]
    fn test_shared_table_is_one_instance() {
        let a = StepTable::shared_chef_guru();
        let b = StepTable::shared_chef_guru();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = StepTable::new(Vec::new()).unwrap_err();
        assert!(matches!(err, RasoiError::InvalidTable(_)));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = StepTable::new(vec![
            Slot::free_text("dish_name", "a"),
            Slot::free_text("dish_name", "b"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate slot id 'dish_name'"));
    }

    #[test]
    fn test_rejects_choice_slot_without_choices() {
        let err = StepTable::new(vec![Slot::single_choice("language", "Pick", Vec::new())])
            .unwrap_err();
        assert!(err.to_string().contains("declares no choices"));
    }

    #[test]
    fn test_position_lookup() {
        let table = StepTable::chef_guru();
        assert_eq!(table.position(slot_ids::LANGUAGE), Some(3));
        assert_eq!(table.position("missing"), None);
    }
}
