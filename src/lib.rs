//! Typed, self-healing settings files. Declare entries with defaults,
//! build once, and hand-edited corruption degrades to defaults instead of
//! failures.
//!
//! ```no_run
//! use tunables::{Scope, Tunables};
//!
//! tunables::choices! {
//!     enum Quality {
//!         Low,
//!         Medium,
//!         High,
//!     }
//! }
//!
//! let mut settings = Tunables::new("config", "myapp", Scope::Client);
//! settings.comment("myapp client settings");
//!
//! let fullscreen = settings
//!     .entry_builder()
//!     .comment("Run in borderless fullscreen")
//!     .define_bool("fullscreen", true);
//! let fov = settings
//!     .entry_builder()
//!     .comment("Horizontal field of view, degrees")
//!     .define_int_in_range("fov", 90, 30, 120);
//! let quality = settings.entry_builder().define_enum("quality", Quality::Medium);
//!
//! for issue in settings.build() {
//!     eprintln!("recovered: {issue}");
//! }
//!
//! // Typed handles stay live for the life of the store.
//! fov.set(150); // stored as 120 — ranged entries clamp, never reject
//! if fullscreen.get() {
//!     let _ = quality.get();
//! }
//! settings.save();
//! ```
//!
//! That `build()` call reads `config/myapp-client.properties` if it exists,
//! applies every value it can, then rewrites the file in canonical form —
//! creating it when missing, and scrubbing it when mangled.
//!
//! # Why tunables
//!
//! Settings files get hand-edited, and hand-edited files break: a typo'd
//! number, a renamed key left behind by an old version, a value pasted from
//! the wrong field. A settings layer that answers any of that with a hard
//! error turns a text file into a way to brick the program. Tunables takes
//! the opposite contract: **loading cannot fail**. Every fault is absorbed
//! at the line where it happens — the line is dropped or the entry returns
//! to its default — reported as a [`LoadIssue`], logged, and the load moves
//! on. The next save writes the repaired, canonical file back.
//!
//! The same philosophy applies to values at runtime. A ranged entry clamps
//! out-of-range writes to the nearest bound rather than rejecting them, and
//! `get()` never returns an unset value — it falls back to the declared
//! default.
//!
//! # Design: a declared registry, not a schema struct
//!
//! Entries are declared programmatically, one
//! [`entry_builder()`](Tunables::entry_builder) call each, and every define
//! returns a cheap typed handle ([`Entry`], [`RangedEntry`], [`EnumEntry`])
//! that shares state with the store. Whoever holds the handle reads and
//! writes the live value; the store persists it. There is no global
//! registry — a store is an ordinary owned value you pass to whatever needs
//! it.
//!
//! Each entry is one of a closed set of kinds — bool, i32, i64, f64,
//! string, or a named-choice enum — and its parser is fixed when it is
//! declared. [`AnyEntry`] exposes that kind-tagged view, plus the metadata
//! an options screen needs (default, bounds, choice names) without knowing
//! any Rust types.
//!
//! # The file format
//!
//! Line-oriented UTF-8 text, written canonically on every save:
//!
//! ```text
//! # myapp client settings
//!
//! [Settings]
//!
//! # Horizontal field of view, degrees
//! # Range: min=30, max=120
//! # Default = 90
//! fov=120
//! ```
//!
//! `#` starts a comment, `[` starts a (single, literal) section header, and
//! everything else non-blank is a `key=value` line split on the first `=`
//! only. Range bounds, choice lists, and defaults are embedded as comments
//! so the file documents itself.
//!
//! # Concurrency
//!
//! None, deliberately. Handles are `Rc`-based and `!Send`; `build`, `load`,
//! and `save` do blocking I/O on the calling thread. One owner, synchronous
//! use — the model a local settings file actually has.

pub mod error;

mod binding;
mod builder;
mod choice;
mod entry;
mod store;

#[cfg(test)]
mod fixtures;

pub use binding::AnyEntry;
pub use builder::EntryBuilder;
pub use choice::Choice;
pub use entry::{ChoiceEntry, Entry, EnumEntry, RangedEntry};
pub use error::{LoadIssue, UnknownChoice};
pub use store::{Scope, Tunables};
