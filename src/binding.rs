//! The closed set of entry kinds a store can hold.
//!
//! Every declared entry registers one [`Binding`]: its key plus an
//! [`AnyEntry`] view tagging which of the supported kinds it is. Parsing
//! and serialization dispatch on that tag — the parser for a kind is fixed
//! at declaration time, so the load path never inspects a value to decide
//! how to read it, and an unsupported kind is unrepresentable.

use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;

use crate::entry::{ChoiceEntry, Entry};

/// A registered entry: its key and its kind-tagged view.
pub(crate) struct Binding {
    key: Rc<str>,
    view: AnyEntry,
}

impl Binding {
    pub(crate) fn new(key: Rc<str>, view: AnyEntry) -> Self {
        Self { key, view }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        &*self.key == name
    }

    pub(crate) fn view(&self) -> &AnyEntry {
        &self.view
    }
}

/// A kind-erased view of any entry in a store.
///
/// This is what [`Tunables::get_entry`](crate::Tunables::get_entry) and
/// [`Tunables::entries`](crate::Tunables::entries) hand out: enough to
/// render a control for the entry (key, comments, rendered value/default,
/// range or choice metadata) without knowing its Rust type. Cloning clones
/// the handle, not the state.
#[derive(Clone)]
pub enum AnyEntry {
    Bool(Entry<bool>),
    Int(Entry<i32>),
    Long(Entry<i64>),
    Double(Entry<f64>),
    Text(Entry<String>),
    Choice(Rc<dyn ChoiceEntry>),
}

impl AnyEntry {
    /// The entry's unique key.
    pub fn key(&self) -> String {
        match self {
            AnyEntry::Bool(e) => e.key(),
            AnyEntry::Int(e) => e.key(),
            AnyEntry::Long(e) => e.key(),
            AnyEntry::Double(e) => e.key(),
            AnyEntry::Text(e) => e.key(),
            AnyEntry::Choice(c) => c.key(),
        }
    }

    /// Doc lines written above the entry on save.
    pub fn comments(&self) -> Vec<String> {
        match self {
            AnyEntry::Bool(e) => e.comments(),
            AnyEntry::Int(e) => e.comments(),
            AnyEntry::Long(e) => e.comments(),
            AnyEntry::Double(e) => e.comments(),
            AnyEntry::Text(e) => e.comments(),
            AnyEntry::Choice(c) => c.comments(),
        }
    }

    /// The current value in its persisted textual form
    /// (default-substituted when unset).
    pub fn value_text(&self) -> String {
        match self {
            AnyEntry::Bool(e) => e.get().to_string(),
            AnyEntry::Int(e) => e.get().to_string(),
            AnyEntry::Long(e) => e.get().to_string(),
            AnyEntry::Double(e) => e.get().to_string(),
            AnyEntry::Text(e) => e.get(),
            AnyEntry::Choice(c) => c.current_name().to_string(),
        }
    }

    /// The default in its persisted textual form.
    pub fn default_text(&self) -> String {
        match self {
            AnyEntry::Bool(e) => e.default_value().to_string(),
            AnyEntry::Int(e) => e.default_value().to_string(),
            AnyEntry::Long(e) => e.default_value().to_string(),
            AnyEntry::Double(e) => e.default_value().to_string(),
            AnyEntry::Text(e) => e.default_value(),
            AnyEntry::Choice(c) => c.default_name().to_string(),
        }
    }

    /// The kind-specific metadata comment, if the kind has one: the
    /// `Range: min=…, max=…` line for ranged entries, the `Options: …`
    /// line for enum entries.
    pub fn metadata_line(&self) -> Option<String> {
        match self {
            AnyEntry::Int(e) => range_line(e),
            AnyEntry::Long(e) => range_line(e),
            AnyEntry::Double(e) => range_line(e),
            AnyEntry::Choice(c) => Some(format!("Options: {}", c.names().join(", "))),
            AnyEntry::Bool(_) | AnyEntry::Text(_) => None,
        }
    }

    /// Parse raw text from a value line into the entry, through the
    /// entry's own write path (so ranged entries clamp). Returns `false`
    /// when the text does not parse; the entry is untouched in that case.
    pub(crate) fn apply_text(&self, raw: &str) -> bool {
        match self {
            AnyEntry::Bool(e) => parse_into(raw, e),
            AnyEntry::Int(e) => parse_into(raw, e),
            AnyEntry::Long(e) => parse_into(raw, e),
            AnyEntry::Double(e) => parse_into(raw, e),
            AnyEntry::Text(e) => {
                e.set(raw.to_string());
                true
            }
            AnyEntry::Choice(c) => c.select(raw).is_ok(),
        }
    }

    /// Unset the value so the entry reads as its default.
    pub(crate) fn reset(&self) {
        match self {
            AnyEntry::Bool(e) => e.reset(),
            AnyEntry::Int(e) => e.reset(),
            AnyEntry::Long(e) => e.reset(),
            AnyEntry::Double(e) => e.reset(),
            AnyEntry::Text(e) => e.reset(),
            AnyEntry::Choice(c) => c.reset(),
        }
    }
}

fn range_line<T: Clone + Display>(entry: &Entry<T>) -> Option<String> {
    entry
        .bounds()
        .map(|(min, max)| format!("Range: min={min}, max={max}"))
}

fn parse_into<T: FromStr + Clone + PartialOrd>(raw: &str, entry: &Entry<T>) -> bool {
    match raw.parse::<T>() {
        Ok(value) => {
            entry.set(value);
            true
        }
        Err(_) => false,
    }
}
