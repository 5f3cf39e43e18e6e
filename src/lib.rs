pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::MaskConfig;

pub use crate::adapters::memory::{MemoryField, MemoryForm};
pub use crate::core::engine::{MaskEngine, ResolveMode};
pub use crate::core::format::{format_for, format_observed};
pub use crate::domain::model::{MaskDiagnostic, MaskKind, TriggerBinding};
pub use crate::domain::ports::{FieldResolver, MaskTarget};
pub use crate::utils::error::{MaskError, Result};
