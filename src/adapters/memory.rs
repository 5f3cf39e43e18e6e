use crate::domain::ports::{FieldResolver, Listener, MaskTarget};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::RefCell;
use std::rc::Rc;

static NAME_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[name=["']?([^"'\]]+)["']?\]$"#).expect("name selector pattern is valid")
});

/// `[name="x"]` and `[name=x]` yield `x`; anything else is taken as the name itself.
fn selector_name(selector: &str) -> &str {
    NAME_SELECTOR
        .captures(selector)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(selector)
}

/// In-memory text field with DOM-like event dispatch.
pub struct MemoryField {
    id: Option<String>,
    name: Option<String>,
    value: RefCell<String>,
    listeners: RefCell<Vec<(String, Listener)>>,
}

impl MemoryField {
    pub fn new(value: &str) -> Rc<Self> {
        Rc::new(Self {
            id: None,
            name: None,
            value: RefCell::new(value.to_string()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn with_id(id: &str, value: &str) -> Rc<Self> {
        Rc::new(Self {
            id: Some(id.to_string()),
            name: None,
            value: RefCell::new(value.to_string()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn with_name(name: &str, value: &str) -> Rc<Self> {
        Rc::new(Self {
            id: None,
            name: Some(name.to_string()),
            value: RefCell::new(value.to_string()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Builds a field that `selector` will resolve to in a `MemoryForm`.
    pub fn for_selector(selector: &str, value: &str) -> Rc<Self> {
        let selector = selector.trim();
        match selector.strip_prefix('#') {
            Some(id) => Self::with_id(id, value),
            None => Self::with_name(selector_name(selector), value),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .count()
    }

    /// Fires `event`, running its listeners in registration order.
    pub fn dispatch(&self, event: &str) {
        // Listeners write back into `value`, so release the borrow first.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener();
        }
    }

    /// Appends `text` one character at a time, firing `input` after each.
    pub fn type_text(&self, text: &str) {
        for ch in text.chars() {
            self.value.borrow_mut().push(ch);
            self.dispatch("input");
        }
    }

    /// Replaces the value and fires `change`.
    pub fn commit(&self, value: &str) {
        self.set_value(value);
        self.dispatch("change");
    }
}

impl MaskTarget for MemoryField {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    fn add_event_listener(&self, event: &str, listener: Listener) {
        self.listeners
            .borrow_mut()
            .push((event.to_string(), listener));
    }
}

/// A set of fields addressable by `#id`, `[name=...]` or a bare name.
#[derive(Default)]
pub struct MemoryForm {
    fields: Vec<Rc<MemoryField>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&mut self, field: Rc<MemoryField>) -> Rc<MemoryField> {
        self.fields.push(field.clone());
        field
    }

    pub fn fields(&self) -> &[Rc<MemoryField>] {
        &self.fields
    }

    pub fn field(&self, selector: &str) -> Option<Rc<MemoryField>> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return self.fields.iter().find(|f| f.id() == Some(id)).cloned();
        }

        let name = selector_name(selector);
        self.fields.iter().find(|f| f.name() == Some(name)).cloned()
    }
}

impl FieldResolver for MemoryForm {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn MaskTarget>> {
        self.field(selector).map(|f| f as Rc<dyn MaskTarget>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_runs_matching_listeners_only() {
        let field = MemoryField::new("");
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        field.add_event_listener("input", Rc::new(move || counter.set(counter.get() + 1)));
        let counter = hits.clone();
        field.add_event_listener("change", Rc::new(move || counter.set(counter.get() + 10)));

        field.dispatch("input");
        field.dispatch("input");
        field.dispatch("blur");
        assert_eq!(hits.get(), 2);
        assert_eq!(field.listener_count("change"), 1);
    }

    #[test]
    fn test_selectors() {
        let mut form = MemoryForm::new();
        form.add_field(MemoryField::with_id("cpf", "1"));
        form.add_field(MemoryField::with_name("cep", "2"));

        assert_eq!(form.field("#cpf").unwrap().value(), "1");
        assert_eq!(form.field("[name=\"cep\"]").unwrap().value(), "2");
        assert_eq!(form.field("[name=cep]").unwrap().value(), "2");
        assert_eq!(form.field("cep").unwrap().value(), "2");
        assert!(form.field("#cep").is_none());
        assert!(form.query_selector("#nope").is_none());
    }

    #[test]
    fn test_for_selector_round_trips_through_lookup() {
        let mut form = MemoryForm::new();
        form.add_field(MemoryField::for_selector("#phone", "a"));
        form.add_field(MemoryField::for_selector("[name='zip']", "b"));

        assert_eq!(form.field("#phone").unwrap().value(), "a");
        assert_eq!(form.field("zip").unwrap().value(), "b");
    }

    #[test]
    fn test_type_text_appends() {
        let field = MemoryField::new("ab");
        field.type_text("cd");
        assert_eq!(field.value(), "abcd");
    }
}
