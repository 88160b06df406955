pub mod config_service;
pub mod paths;
pub mod storage;

pub use crate::config_service::{ConfigOverrides, ConfigService};
pub use crate::paths::RasoiPaths;
