use crate::domain::model::MaskDiagnostic;
use std::rc::Rc;

/// Callback registered on a target for a named event.
pub type Listener = Rc<dyn Fn()>;

/// Subscriber for diagnostics raised while a mask runs.
pub type DiagnosticHook = Rc<dyn Fn(&MaskDiagnostic)>;

/// A mutable text field owned by the host.
///
/// Implementations use interior mutability: the host's event loop hands out
/// shared handles and listeners write back through `&self`.
pub trait MaskTarget {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    /// Registers `listener` to run on every occurrence of `event`.
    fn add_event_listener(&self, event: &str, listener: Listener);
}

/// Resolves a selector to a field, the way a document query would.
pub trait FieldResolver {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn MaskTarget>>;
}
