//! Guided slot-filling dialogue module.
//!
//! # Module Structure
//!
//! - `slot`: slot definitions, choices and validators
//! - `table`: the immutable step definition table (`StepTable`)
//! - `session`: per-conversation state (`DialogueSession`, `SlotValues`)
//! - `engine`: input handling and step progression (`FlowEngine`)
//!
//! # Usage
//!
//! ```ignore
//! use rasoi_core::dialogue::{DialogueSession, FlowEngine, TurnOutput};
//!
//! let mut session = DialogueSession::chef_guru();
//! let turn = engine.submit(&mut session, "Margherita Pizza").await?;
//! ```

mod engine;
mod session;
mod slot;
mod table;

pub use engine::{FlowEngine, Prompt, Turn, TurnOutput};
pub use session::{DialogueSession, SlotValues};
pub use slot::{Choice, InputKind, Slot, SlotPurpose, SlotValidator};
pub use table::{StepTable, slot_ids};
