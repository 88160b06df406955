//! Core of the RasoiMitra ChefGuru assistant.
//!
//! A guided slot-filling dialogue (`dialogue`) that collects what a
//! prediction needs and then calls a remote collaborator once
//! (`prediction`), plus the food trends model (`trends`), the translation
//! catalog (`i18n`) and the configuration model (`config`).

pub mod config;
pub mod dialogue;
pub mod error;
pub mod i18n;
pub mod prediction;
pub mod trends;

// Re-export common error type
pub use error::{RasoiError, Result};
