//! Fluent declaration of entries into a store.
//!
//! An [`EntryBuilder`] stages comment lines, then a single `define_*` call
//! constructs the entry, registers it with the store, moves the staged
//! comments onto it, and consumes the builder. Consuming by value is what
//! guarantees comment isolation: staged comments cannot leak into the next
//! declaration because the buffer no longer exists.

use std::rc::Rc;

use crate::binding::{AnyEntry, Binding};
use crate::choice::Choice;
use crate::entry::{Entry, EnumEntry, RangedEntry, State, clamp};
use crate::store::Tunables;

/// Stages per-entry comments ahead of a `define_*` call.
///
/// Obtained from [`Tunables::entry_builder`]; one builder declares exactly
/// one entry.
pub struct EntryBuilder<'a> {
    store: &'a mut Tunables,
    staged: Vec<String>,
}

impl<'a> EntryBuilder<'a> {
    pub(crate) fn new(store: &'a mut Tunables) -> Self {
        Self {
            store,
            staged: Vec::new(),
        }
    }

    /// Stage a comment line for the entry about to be defined.
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.staged.push(text.into());
        self
    }

    /// Declare a boolean entry.
    pub fn define_bool(self, key: &str, default: bool) -> Entry<bool> {
        let inner = State::shared(key, default, None, None, self.staged);
        let entry = Entry::from_inner(inner);
        self.store
            .register(Binding::new(entry.raw_key(), AnyEntry::Bool(entry.clone())));
        entry
    }

    /// Declare an integer entry.
    pub fn define_int(self, key: &str, default: i32) -> Entry<i32> {
        let inner = State::shared(key, default, None, None, self.staged);
        let entry = Entry::from_inner(inner);
        self.store
            .register(Binding::new(entry.raw_key(), AnyEntry::Int(entry.clone())));
        entry
    }

    /// Declare a long integer entry.
    pub fn define_long(self, key: &str, default: i64) -> Entry<i64> {
        let inner = State::shared(key, default, None, None, self.staged);
        let entry = Entry::from_inner(inner);
        self.store
            .register(Binding::new(entry.raw_key(), AnyEntry::Long(entry.clone())));
        entry
    }

    /// Declare a floating-point entry.
    pub fn define_double(self, key: &str, default: f64) -> Entry<f64> {
        let inner = State::shared(key, default, None, None, self.staged);
        let entry = Entry::from_inner(inner);
        self.store.register(Binding::new(
            entry.raw_key(),
            AnyEntry::Double(entry.clone()),
        ));
        entry
    }

    /// Declare a string entry. A blank value (empty or whitespace-only)
    /// reads as the default.
    pub fn define_string(self, key: &str, default: impl Into<String>) -> Entry<String> {
        let inner = State::shared(
            key,
            default.into(),
            None,
            Some(|s: &String| s.trim().is_empty()),
            self.staged,
        );
        let entry = Entry::from_inner(inner);
        self.store
            .register(Binding::new(entry.raw_key(), AnyEntry::Text(entry.clone())));
        entry
    }

    /// Declare an enum entry whose domain is `E`'s constant set.
    pub fn define_enum<E: Choice>(self, key: &str, default: E) -> EnumEntry<E> {
        let inner = State::shared(key, default, None, None, self.staged);
        let entry = EnumEntry::from_inner(inner);
        self.store.register(Binding::new(
            entry.raw_key(),
            AnyEntry::Choice(Rc::new(entry.clone())),
        ));
        entry
    }

    /// Declare an integer entry clamped to `[min, max]` inclusive.
    ///
    /// The default itself is clamped into the range at declaration, so a
    /// fresh entry can never read out of bounds.
    pub fn define_int_in_range(
        self,
        key: &str,
        default: i32,
        min: i32,
        max: i32,
    ) -> RangedEntry<i32> {
        self.define_ranged(key, default, min, max, AnyEntry::Int)
    }

    /// Declare a long integer entry clamped to `[min, max]` inclusive.
    pub fn define_long_in_range(
        self,
        key: &str,
        default: i64,
        min: i64,
        max: i64,
    ) -> RangedEntry<i64> {
        self.define_ranged(key, default, min, max, AnyEntry::Long)
    }

    /// Declare a floating-point entry clamped to `[min, max]` inclusive.
    pub fn define_double_in_range(
        self,
        key: &str,
        default: f64,
        min: f64,
        max: f64,
    ) -> RangedEntry<f64> {
        self.define_ranged(key, default, min, max, AnyEntry::Double)
    }

    fn define_ranged<T: Clone + PartialOrd>(
        self,
        key: &str,
        default: T,
        min: T,
        max: T,
        kind: fn(Entry<T>) -> AnyEntry,
    ) -> RangedEntry<T> {
        let default = clamp(default, &min, &max);
        let inner = State::shared(
            key,
            default,
            Some((min.clone(), max.clone())),
            None,
            self.staged,
        );
        let entry = RangedEntry::from_inner(inner.clone(), min, max);
        let alias = Entry::from_inner(inner);
        self.store
            .register(Binding::new(alias.raw_key(), kind(alias.clone())));
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Palette, store_in};
    use tempfile::TempDir;

    #[test]
    fn staged_comments_transfer_to_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(dir.path());
        let entry = store
            .entry_builder()
            .comment("first line")
            .comment("second line")
            .define_int("count", 5);
        assert_eq!(entry.comments(), vec!["first line", "second line"]);
    }

    #[test]
    fn comments_do_not_leak_to_next_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(dir.path());
        let first = store
            .entry_builder()
            .comment("only for the first")
            .define_int("first", 1);
        let second = store.entry_builder().define_int("second", 2);

        assert_eq!(first.comments(), vec!["only for the first"]);
        assert!(second.comments().is_empty());
    }

    #[test]
    fn out_of_range_default_is_clamped_at_declaration() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(dir.path());

        let low = store.entry_builder().define_int_in_range("low", 1, 10, 20);
        assert_eq!(low.default_value(), 10);
        assert_eq!(low.get(), 10);

        let high = store
            .entry_builder()
            .define_int_in_range("high", 99, 10, 20);
        assert_eq!(high.default_value(), 20);
        assert_eq!(high.get(), 20);

        let inside = store
            .entry_builder()
            .define_int_in_range("inside", 15, 10, 20);
        assert_eq!(inside.default_value(), 15);
    }

    #[test]
    fn ranged_entry_reports_bounds() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(dir.path());
        let entry = store
            .entry_builder()
            .define_double_in_range("volume", 0.5, 0.0, 1.0);
        assert_eq!(entry.min(), 0.0);
        assert_eq!(entry.max(), 1.0);
    }

    #[test]
    fn entries_register_in_declaration_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(dir.path());
        store.entry_builder().define_bool("a", true);
        store.entry_builder().define_string("b", "x");
        store.entry_builder().define_enum("c", Palette::Red);

        let keys: Vec<String> = store.entries().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn long_and_double_kinds_round_through_handles() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(dir.path());
        let ticks = store.entry_builder().define_long("ticks", 25_000);
        let ratio = store.entry_builder().define_double("ratio", 1.5);

        ticks.set(100_000);
        ratio.set(2.25);
        assert_eq!(ticks.get(), 100_000);
        assert_eq!(ratio.get(), 2.25);
    }
}
