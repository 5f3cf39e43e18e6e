use crate::core::format::format_observed;
use crate::domain::model::{MaskDiagnostic, MaskKind, TriggerBinding};
use crate::domain::ports::{DiagnosticHook, FieldResolver, MaskTarget};
use crate::utils::error::{MaskError, Result};
use crate::utils::validation::validate_non_empty_string;
use std::rc::{Rc, Weak};

/// How `MaskEngine::create` treats a selector that matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
    /// Fail with `MaskError::TargetNotFound`.
    #[default]
    Strict,
    /// Build an engine without a target; formatting is a silent no-op.
    Tolerant,
}

/// Binds one mask kind to one field.
///
/// ```
/// use field_mask::{MaskEngine, MaskTarget, MemoryField};
///
/// let field = MemoryField::new("12345678901");
/// MaskEngine::new(&field).document_id().add_event("input").unwrap();
/// field.dispatch("input");
/// assert_eq!(field.value(), "123.456.789-01");
/// ```
#[derive(Clone, Default)]
pub struct MaskEngine {
    target: Option<Weak<dyn MaskTarget>>,
    selector: Option<String>,
    kind: Option<MaskKind>,
    hook: Option<DiagnosticHook>,
}

impl MaskEngine {
    pub fn new<T: MaskTarget + 'static>(target: &Rc<T>) -> Self {
        let target: Weak<T> = Rc::downgrade(target);
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn create<R: FieldResolver + ?Sized>(
        resolver: &R,
        selector: &str,
        mode: ResolveMode,
    ) -> Result<Self> {
        let target = match resolver.query_selector(selector) {
            Some(target) => Some(Rc::downgrade(&target)),
            None if mode == ResolveMode::Tolerant => {
                tracing::warn!(selector, "no field matches selector, mask will be inert");
                None
            }
            None => {
                return Err(MaskError::TargetNotFound {
                    selector: selector.to_string(),
                })
            }
        };

        Ok(Self {
            target,
            selector: Some(selector.to_string()),
            ..Self::default()
        })
    }

    pub fn kind(&self) -> Option<MaskKind> {
        self.kind
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    pub fn has_target(&self) -> bool {
        self.target.as_ref().and_then(Weak::upgrade).is_some()
    }

    /// Selects `kind`, replacing any previously selected mask.
    pub fn with_kind(mut self, kind: MaskKind) -> Self {
        if let Some(previous) = self.kind.replace(kind) {
            tracing::debug!(%previous, %kind, "mask kind replaced");
        }
        self
    }

    pub fn document_id(self) -> Self {
        self.with_kind(MaskKind::DocumentId)
    }

    pub fn company_id(self) -> Self {
        self.with_kind(MaskKind::CompanyId)
    }

    pub fn document_or_company_id(self) -> Self {
        self.with_kind(MaskKind::DocumentOrCompanyId)
    }

    pub fn postal_code(self) -> Self {
        self.with_kind(MaskKind::PostalCode)
    }

    pub fn phone(self) -> Self {
        self.with_kind(MaskKind::Phone)
    }

    pub fn date_br(self) -> Self {
        self.with_kind(MaskKind::DateBr)
    }

    pub fn on_diagnostic<F>(mut self, hook: F) -> Self
    where
        F: Fn(&MaskDiagnostic) + 'static,
    {
        self.hook = Some(Rc::new(hook));
        self
    }

    /// Formats the target's current text once, outside any event.
    ///
    /// Returns false when there is no live target.
    pub fn apply(&self) -> Result<bool> {
        let kind = self.require_kind()?;
        match self.target.as_ref().and_then(Weak::upgrade) {
            Some(target) => {
                run_mask(target.as_ref(), kind, self.hook.as_deref());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs the selected mask on every occurrence of `event` on the target.
    pub fn add_event(&self, event: &str) -> Result<TriggerBinding> {
        let kind = self.require_kind()?;
        validate_non_empty_string("event", event)
            .map_err(|_| MaskError::configuration("event name cannot be empty"))?;

        let mut binding = TriggerBinding {
            event: event.to_string(),
            kind,
            selector: self.selector.clone(),
            attached: false,
        };

        let Some(target) = self.target.as_ref().and_then(Weak::upgrade) else {
            tracing::warn!(
                selector = self.selector.as_deref().unwrap_or("<handle>"),
                event,
                "mask target missing, nothing bound"
            );
            return Ok(binding);
        };

        let weak = Rc::downgrade(&target);
        let hook = self.hook.clone();
        target.add_event_listener(
            event,
            Rc::new(move || {
                if let Some(target) = weak.upgrade() {
                    run_mask(target.as_ref(), kind, hook.as_deref());
                }
            }),
        );

        tracing::info!(%kind, event, "mask bound");
        binding.attached = true;
        Ok(binding)
    }

    fn require_kind(&self) -> Result<MaskKind> {
        self.kind.ok_or_else(|| {
            MaskError::configuration("no mask kind selected; call a mask method before add_event")
        })
    }
}

fn run_mask(target: &dyn MaskTarget, kind: MaskKind, hook: Option<&dyn Fn(&MaskDiagnostic)>) {
    let raw = target.value();
    let formatted = format_observed(kind, &raw, hook);
    // lengths only; field values are personal identifiers
    tracing::debug!(
        %kind,
        raw_len = raw.len(),
        formatted_len = formatted.len(),
        "field reformatted"
    );
    target.set_value(&formatted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryField, MemoryForm};
    use std::cell::Cell;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_add_event_before_kind_is_configuration_error() {
        let field = MemoryField::new("12345678901");
        let err = MaskEngine::new(&field).add_event("input").unwrap_err();

        assert!(matches!(err, MaskError::Configuration { .. }));
        assert_eq!(field.listener_count("input"), 0);
    }

    #[test]
    fn test_empty_event_name_is_rejected() {
        let field = MemoryField::new("");
        let result = MaskEngine::new(&field).phone().add_event("  ");
        assert!(matches!(result, Err(MaskError::Configuration { .. })));
    }

    #[test]
    fn test_later_selection_replaces_earlier_one() {
        let field = MemoryField::new("01012024");
        let engine = MaskEngine::new(&field).postal_code().date_br();
        assert_eq!(engine.kind(), Some(MaskKind::DateBr));

        engine.add_event("input").unwrap();
        field.dispatch("input");
        assert_eq!(field.value(), "01/01/2024");
        assert_eq!(field.listener_count("input"), 1);
    }

    #[test]
    fn test_strict_create_reports_missing_target() {
        let form = MemoryForm::new();
        let result = MaskEngine::create(&form, "#missing", ResolveMode::Strict);
        assert!(matches!(result, Err(MaskError::TargetNotFound { .. })));
    }

    #[test]
    fn test_tolerant_create_is_inert() {
        let form = MemoryForm::new();
        let engine = MaskEngine::create(&form, "#missing", ResolveMode::Tolerant)
            .unwrap()
            .document_id();

        assert!(!engine.has_target());
        assert!(!engine.apply().unwrap());
        let binding = engine.add_event("input").unwrap();
        assert!(!binding.is_attached());
        assert_eq!(binding.selector.as_deref(), Some("#missing"));
    }

    #[test]
    fn test_dropped_target_makes_listener_a_no_op() {
        let field = MemoryField::new("");
        let engine = MaskEngine::new(&field).postal_code();
        drop(field);
        assert!(!engine.has_target());
        assert!(!engine.add_event("input").unwrap().is_attached());
    }

    #[test]
    fn test_diagnostic_hook_sees_overflow() {
        let field = MemoryField::new("12345678000199");
        let overflows = Rc::new(Cell::new(0));
        let counter = overflows.clone();

        MaskEngine::new(&field)
            .document_or_company_id()
            .on_diagnostic(move |_| counter.set(counter.get() + 1))
            .add_event("input")
            .unwrap();

        field.dispatch("input");
        assert_eq!(field.value(), "12.345.678/0001-99");
        assert_eq!(overflows.get(), 1);
    }

    #[test]
    fn test_apply_formats_immediately() {
        let field = MemoryField::new("12345678");
        assert!(MaskEngine::new(&field).postal_code().apply().unwrap());
        assert_eq!(field.value(), "12.345-678");
    }

    #[test]
    fn test_new_accepts_concrete_field_handle() {
        let field: Rc<MemoryField> = MemoryField::new("1199998888");
        let engine = MaskEngine::new(&field).phone();

        assert!(engine.has_target());
        assert!(engine.apply().unwrap());
        assert_eq!(field.value(), "(11)9999-8888");
    }

    #[test]
    fn test_logs_carry_lengths_not_field_values() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let field = MemoryField::new("12345678901");
        tracing::subscriber::with_default(subscriber, || {
            MaskEngine::new(&field).document_id().apply().unwrap();
        });

        let output = logs.contents();
        assert_eq!(field.value(), "123.456.789-01");
        assert!(output.contains("field reformatted"));
        assert!(output.contains("raw_len=11"));
        assert!(!output.contains("12345678901"));
        assert!(!output.contains("123.456.789-01"));
    }
}
