//! Typed entry handles and their shared state.
//!
//! Entries are declared once through [`EntryBuilder`](crate::EntryBuilder)
//! and then live as long as their store. Both the store and the caller hold
//! handles onto the same `Rc<RefCell<_>>` state — the store to persist the
//! value, the caller to read and change it at runtime. Handles are cheap to
//! clone and deliberately `!Send`: the whole store is a single-owner,
//! synchronous structure.
//!
//! Validation policy lives in the state, not in a subtype override: a
//! ranged entry carries its bounds and every write path — caller [`set`]
//! or file load — runs through the same clamp. A string entry carries a
//! blank-means-unset predicate consulted by [`get`]. Plain entries carry
//! neither.
//!
//! [`set`]: Entry::set
//! [`get`]: Entry::get

use std::cell::RefCell;
use std::rc::Rc;

use crate::choice::Choice;
use crate::error::UnknownChoice;

/// Clamp `value` into the inclusive `[min, max]` range.
///
/// Total: out-of-range input maps to the nearer bound, never an error. The
/// caller is trusted to pass `min <= max`.
pub(crate) fn clamp<T: Clone + PartialOrd>(value: T, min: &T, max: &T) -> T {
    if value < *min {
        min.clone()
    } else if value > *max {
        max.clone()
    } else {
        value
    }
}

/// The state behind every entry handle.
pub(crate) struct State<T> {
    key: Rc<str>,
    comments: Vec<String>,
    default: T,
    value: Option<T>,
    /// Inclusive clamp bounds; set only for ranged entries.
    bounds: Option<(T, T)>,
    /// When present, a set value matching this predicate reads as unset.
    /// String entries use it so a blank value falls back to the default.
    unset_if: Option<fn(&T) -> bool>,
}

impl<T> State<T> {
    pub(crate) fn shared(
        key: &str,
        default: T,
        bounds: Option<(T, T)>,
        unset_if: Option<fn(&T) -> bool>,
        comments: Vec<String>,
    ) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            key: key.into(),
            comments,
            default,
            value: None,
            bounds,
            unset_if,
        }))
    }
}

impl<T: Clone> State<T> {
    /// Current value, default-substituted: unset (or unset-equivalent,
    /// e.g. a blank string) reads as the default.
    fn current(&self) -> T {
        match &self.value {
            Some(v) if !self.unset_if.is_some_and(|unset| unset(v)) => v.clone(),
            _ => self.default.clone(),
        }
    }
}

impl<T: Clone + PartialOrd> State<T> {
    /// The single write path for ordered values: clamps into the bounds
    /// when the entry has any, then overwrites.
    fn store(&mut self, value: T) {
        let value = match &self.bounds {
            Some((min, max)) => clamp(value, min, max),
            None => value,
        };
        self.value = Some(value);
    }
}

/// A named, typed, defaulted setting registered in a store.
///
/// `get` never fails and never returns an unset value; `set` never fails
/// and never rejects. All failure handling lives in the store's parser.
#[derive(Clone)]
pub struct Entry<T> {
    inner: Rc<RefCell<State<T>>>,
}

impl<T: Clone> Entry<T> {
    pub(crate) fn from_inner(inner: Rc<RefCell<State<T>>>) -> Self {
        Self { inner }
    }

    pub(crate) fn raw_key(&self) -> Rc<str> {
        self.inner.borrow().key.clone()
    }

    /// Unset the value so `get` falls back to the default.
    pub(crate) fn reset(&self) {
        self.inner.borrow_mut().value = None;
    }

    /// The entry's unique key.
    pub fn key(&self) -> String {
        self.inner.borrow().key.to_string()
    }

    /// The current value, or the default when unset.
    pub fn get(&self) -> T {
        self.inner.borrow().current()
    }

    /// The immutable default.
    pub fn default_value(&self) -> T {
        self.inner.borrow().default.clone()
    }

    /// Inclusive clamp bounds, present only on ranged entries. Exposed so
    /// option screens can render a slider from metadata alone.
    pub fn bounds(&self) -> Option<(T, T)> {
        self.inner.borrow().bounds.clone()
    }

    /// Doc lines written above the entry on save.
    pub fn comments(&self) -> Vec<String> {
        self.inner.borrow().comments.clone()
    }

    /// Append a doc line. Chainable, and usable after the define call too:
    /// comments accumulate until the next save.
    pub fn comment(&self, text: impl Into<String>) -> &Self {
        self.inner.borrow_mut().comments.push(text.into());
        self
    }
}

impl<T: Clone + PartialOrd> Entry<T> {
    /// Overwrite the value. On a ranged entry this clamps exactly like
    /// [`RangedEntry::set`] — the bounds travel with the state, not with
    /// the handle type.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().store(value);
    }
}

/// A numeric entry clamped to an inclusive `[min, max]` range.
///
/// `set` is total: out-of-range input is stored as the nearer bound, never
/// rejected. Settings files are hand-edited; a typo'd number should degrade
/// to the closest legal value rather than fail the load.
#[derive(Clone)]
pub struct RangedEntry<T> {
    inner: Rc<RefCell<State<T>>>,
    min: T,
    max: T,
}

impl<T: Clone + PartialOrd> RangedEntry<T> {
    pub(crate) fn from_inner(inner: Rc<RefCell<State<T>>>, min: T, max: T) -> Self {
        Self { inner, min, max }
    }

    /// The entry's unique key.
    pub fn key(&self) -> String {
        self.inner.borrow().key.to_string()
    }

    /// The current value, or the default when unset. Always within
    /// `[min, max]`: the default is clamped at declaration and every write
    /// clamps on the way in.
    pub fn get(&self) -> T {
        self.inner.borrow().current()
    }

    /// Overwrite the value, clamped into `[min, max]`.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().store(value);
    }

    /// The immutable (already clamped) default.
    pub fn default_value(&self) -> T {
        self.inner.borrow().default.clone()
    }

    /// Lower inclusive bound.
    pub fn min(&self) -> T {
        self.min.clone()
    }

    /// Upper inclusive bound.
    pub fn max(&self) -> T {
        self.max.clone()
    }

    /// Doc lines written above the entry on save.
    pub fn comments(&self) -> Vec<String> {
        self.inner.borrow().comments.clone()
    }

    /// Append a doc line.
    pub fn comment(&self, text: impl Into<String>) -> &Self {
        self.inner.borrow_mut().comments.push(text.into());
        self
    }
}

/// An entry whose domain is a fixed set of named constants.
///
/// Values persist by name (see [`Choice`] for the case rules). Unlike the
/// other entry kinds, text conversion can fail here, which is why
/// [`set_from_name`](Self::set_from_name) returns a `Result` — the store's
/// parser absorbs that failure into a default-restore.
#[derive(Clone)]
pub struct EnumEntry<E: Choice> {
    inner: Rc<RefCell<State<E>>>,
}

impl<E: Choice> EnumEntry<E> {
    pub(crate) fn from_inner(inner: Rc<RefCell<State<E>>>) -> Self {
        Self { inner }
    }

    pub(crate) fn raw_key(&self) -> Rc<str> {
        self.inner.borrow().key.clone()
    }

    /// The entry's unique key.
    pub fn key(&self) -> String {
        self.inner.borrow().key.to_string()
    }

    /// The current constant, or the default when unset.
    pub fn get(&self) -> E {
        self.inner.borrow().current()
    }

    /// Overwrite the value. No validation: every constant of `E` is legal.
    pub fn set(&self, value: E) {
        self.inner.borrow_mut().value = Some(value);
    }

    /// Set the value from a constant name, ignoring ASCII case.
    pub fn set_from_name(&self, name: &str) -> Result<(), UnknownChoice> {
        match E::from_name(name) {
            Some(value) => {
                self.set(value);
                Ok(())
            }
            None => Err(UnknownChoice {
                key: self.key(),
                name: name.to_string(),
            }),
        }
    }

    /// The full constant set, in declaration order.
    pub fn choices(&self) -> &'static [E] {
        E::ALL
    }

    /// The immutable default.
    pub fn default_value(&self) -> E {
        self.inner.borrow().default
    }

    /// Doc lines written above the entry on save.
    pub fn comments(&self) -> Vec<String> {
        self.inner.borrow().comments.clone()
    }

    /// Append a doc line.
    pub fn comment(&self, text: impl Into<String>) -> &Self {
        self.inner.borrow_mut().comments.push(text.into());
        self
    }
}

/// Name-based view of an enum entry, independent of its constant type.
///
/// This is what the store registers and what [`AnyEntry`](crate::AnyEntry)
/// hands to collaborators that drive an entry without knowing `E` — an
/// options screen cycling through `names()` and calling `select`, for
/// example.
pub trait ChoiceEntry {
    /// The entry's unique key.
    fn key(&self) -> String;

    /// Doc lines written above the entry on save.
    fn comments(&self) -> Vec<String>;

    /// Every choice name, in declaration order.
    fn names(&self) -> Vec<&'static str>;

    /// Name of the default constant.
    fn default_name(&self) -> &'static str;

    /// Name of the current constant (default-substituted).
    fn current_name(&self) -> &'static str;

    /// Select a constant by name, ignoring ASCII case.
    fn select(&self, name: &str) -> Result<(), UnknownChoice>;

    /// Unset the value so the entry reads as its default.
    fn reset(&self);
}

impl<E: Choice> ChoiceEntry for EnumEntry<E> {
    fn key(&self) -> String {
        EnumEntry::key(self)
    }

    fn comments(&self) -> Vec<String> {
        EnumEntry::comments(self)
    }

    fn names(&self) -> Vec<&'static str> {
        E::ALL.iter().map(Choice::name).collect()
    }

    fn default_name(&self) -> &'static str {
        self.default_value().name()
    }

    fn current_name(&self) -> &'static str {
        self.get().name()
    }

    fn select(&self, name: &str) -> Result<(), UnknownChoice> {
        self.set_from_name(name)
    }

    fn reset(&self) {
        self.inner.borrow_mut().value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::Palette;

    fn plain(key: &str, default: i32) -> Entry<i32> {
        Entry::from_inner(State::shared(key, default, None, None, Vec::new()))
    }

    fn ranged(key: &str, default: i32, min: i32, max: i32) -> RangedEntry<i32> {
        let inner = State::shared(key, default, Some((min, max)), None, Vec::new());
        RangedEntry::from_inner(inner, min, max)
    }

    fn text(key: &str, default: &str) -> Entry<String> {
        Entry::from_inner(State::shared(
            key,
            default.to_string(),
            None,
            Some(|s: &String| s.trim().is_empty()),
            Vec::new(),
        ))
    }

    #[test]
    fn fresh_entry_returns_default() {
        let entry = plain("count", 10);
        assert_eq!(entry.get(), 10);
        assert_eq!(entry.default_value(), 10);
    }

    #[test]
    fn set_overwrites() {
        let entry = plain("count", 10);
        entry.set(42);
        assert_eq!(entry.get(), 42);
        assert_eq!(entry.default_value(), 10);
    }

    #[test]
    fn reset_restores_default() {
        let entry = plain("count", 10);
        entry.set(42);
        entry.reset();
        assert_eq!(entry.get(), 10);
    }

    #[test]
    fn blank_string_reads_as_default() {
        let entry = text("motd", "hello");
        entry.set(String::new());
        assert_eq!(entry.get(), "hello");
        entry.set("   ".to_string());
        assert_eq!(entry.get(), "hello");
        entry.set("set".to_string());
        assert_eq!(entry.get(), "set");
    }

    #[test]
    fn clamp_below_min_yields_min() {
        let entry = ranged("fov", 90, 30, 120);
        entry.set(10);
        assert_eq!(entry.get(), 30);
    }

    #[test]
    fn clamp_above_max_yields_max() {
        let entry = ranged("fov", 90, 30, 120);
        entry.set(500);
        assert_eq!(entry.get(), 120);
    }

    #[test]
    fn clamp_inside_range_unchanged() {
        let entry = ranged("fov", 90, 30, 120);
        entry.set(75);
        assert_eq!(entry.get(), 75);
    }

    #[test]
    fn clamp_accepts_exact_bounds() {
        let entry = ranged("fov", 90, 30, 120);
        entry.set(30);
        assert_eq!(entry.get(), 30);
        entry.set(120);
        assert_eq!(entry.get(), 120);
    }

    #[test]
    fn shared_handles_clamp_identically() {
        // A plain handle onto ranged state must clamp the same way the
        // ranged handle does.
        let inner = State::shared("fov", 90, Some((30, 120)), None, Vec::new());
        let ranged = RangedEntry::from_inner(inner.clone(), 30, 120);
        let alias: Entry<i32> = Entry::from_inner(inner);

        alias.set(999);
        assert_eq!(ranged.get(), 120);
    }

    #[test]
    fn bounds_exposed_on_ranged_state_only() {
        assert_eq!(plain("count", 1).bounds(), None);
        let inner = State::shared("fov", 90, Some((30, 120)), None, Vec::new());
        assert_eq!(Entry::from_inner(inner).bounds(), Some((30, 120)));
    }

    #[test]
    fn comment_chains_and_accumulates() {
        let entry = plain("count", 1);
        entry.comment("first").comment("second");
        assert_eq!(entry.comments(), vec!["first", "second"]);
    }

    fn palette_entry(default: Palette) -> EnumEntry<Palette> {
        EnumEntry::from_inner(State::shared("color", default, None, None, Vec::new()))
    }

    #[test]
    fn enum_set_from_name_is_case_insensitive() {
        let entry = palette_entry(Palette::Red);
        entry.set_from_name("blue").unwrap();
        assert_eq!(entry.get(), Palette::Blue);
        entry.set_from_name("GREEN").unwrap();
        assert_eq!(entry.get(), Palette::Green);
    }

    #[test]
    fn enum_unknown_name_fails_without_mutating() {
        let entry = palette_entry(Palette::Red);
        entry.set(Palette::Green);
        let err = entry.set_from_name("purple").unwrap_err();
        assert_eq!(err.name, "purple");
        assert_eq!(err.key, "color");
        assert_eq!(entry.get(), Palette::Green);
    }

    #[test]
    fn choice_view_reports_names_and_selects() {
        let entry = palette_entry(Palette::Red);
        let view: &dyn ChoiceEntry = &entry;
        assert_eq!(view.names(), vec!["Red", "Green", "Blue"]);
        assert_eq!(view.default_name(), "Red");
        assert_eq!(view.current_name(), "Red");

        view.select("blue").unwrap();
        assert_eq!(view.current_name(), "Blue");
        assert_eq!(entry.get(), Palette::Blue);

        view.reset();
        assert_eq!(view.current_name(), "Red");
    }
}
