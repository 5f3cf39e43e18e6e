pub mod engine;
pub mod format;
pub mod rules;

pub use crate::domain::model::{MaskDiagnostic, MaskKind, TriggerBinding};
pub use crate::domain::ports::{DiagnosticHook, FieldResolver, Listener, MaskTarget};
pub use crate::utils::error::Result;
