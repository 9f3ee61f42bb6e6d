//! The settings store and its persistence protocol.
//!
//! A [`Tunables`] owns one backing text file and an ordered registry of
//! entries. [`build`](Tunables::build) is the startup handshake: load the
//! file if it exists (self-healing, line by line), then unconditionally
//! rewrite it in canonical form so hand-mangled files come back normalized
//! and metadata comments track the current declarations.
//!
//! Nothing in this module returns a `Result`. A settings file must never
//! be able to prevent startup: every parse fault degrades to the entry's
//! default plus a logged [`LoadIssue`], and I/O faults are logged and
//! abandoned. The pure halves of the protocol — [`render`](Tunables::render)
//! and [`apply`](Tunables::apply) — are split from the I/O wrappers so the
//! interesting behavior is testable without touching a disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::binding::{AnyEntry, Binding};
use crate::builder::EntryBuilder;
use crate::error::LoadIssue;

const FILE_EXTENSION: &str = ".properties";

/// File-classification suffix baked into the backing file name.
///
/// One store manages one file; programs that split settings by audience
/// (shared, client-only, server-only) create one store per scope and get
/// distinct files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Common,
    Client,
    Server,
}

impl Scope {
    /// The suffix as it appears in the file name.
    pub fn suffix(self) -> &'static str {
        match self {
            Scope::Common => "common",
            Scope::Client => "client",
            Scope::Server => "server",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A typed settings store backed by one `key=value` text file.
///
/// Declare entries through [`entry_builder`](Self::entry_builder), call
/// [`build`](Self::build) once at startup, keep the typed handles the
/// define calls returned, and call [`save`](Self::save) whenever runtime
/// changes should persist.
pub struct Tunables {
    path: PathBuf,
    scope: Scope,
    file_comments: Vec<String>,
    bindings: Vec<Binding>,
}

impl Tunables {
    /// Create a store whose backing file is
    /// `{dir}/{name}-{scope}.properties`.
    ///
    /// Directory policy stays with the caller; nothing is read or written
    /// until [`build`](Self::build) or [`save`](Self::save).
    pub fn new(dir: impl AsRef<Path>, name: &str, scope: Scope) -> Self {
        let path = dir.as_ref().join(format!("{name}-{scope}{FILE_EXTENSION}"));
        Self {
            path,
            scope,
            file_comments: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Like [`new`](Self::new), but resolving the platform config
    /// directory for `name` (XDG on Linux, `~/Library/Application Support`
    /// on macOS). `None` if no home directory can be found.
    pub fn in_platform_dir(name: &str, scope: Scope) -> Option<Self> {
        let proj = directories::ProjectDirs::from("", "", name)?;
        Some(Self::new(proj.config_dir(), name, scope))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The store's file-classification scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Add a file-level comment, written at the top of the file before any
    /// entry. Chainable.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.file_comments.push(text.into());
        self
    }

    /// Start declaring one entry. See [`EntryBuilder`].
    pub fn entry_builder(&mut self) -> EntryBuilder<'_> {
        EntryBuilder::new(self)
    }

    pub(crate) fn register(&mut self, binding: Binding) {
        debug_assert!(
            !self.bindings.iter().any(|b| b.matches(binding.key())),
            "duplicate entry key `{}`",
            binding.key()
        );
        self.bindings.push(binding);
    }

    /// Look an entry up by key.
    pub fn get_entry(&self, key: &str) -> Option<AnyEntry> {
        self.bindings
            .iter()
            .find(|b| b.matches(key))
            .map(|b| b.view().clone())
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &AnyEntry> {
        self.bindings.iter().map(Binding::view)
    }

    /// Build the backing file: load existing values if the file is
    /// present, then rewrite it in canonical form (which also creates a
    /// missing file). Call once at startup, after all declarations.
    ///
    /// Returns every recoverable fault the load encountered; empty when
    /// the file was absent or clean.
    pub fn build(&self) -> Vec<LoadIssue> {
        let issues = if self.path.exists() {
            self.load()
        } else {
            Vec::new()
        };
        self.save();
        issues
    }

    /// Write the current values to the backing file, creating parent
    /// directories as needed. Best-effort: an I/O failure is logged and
    /// the call returns; there is no atomic replace.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent()
            && let Err(source) = fs::create_dir_all(parent)
        {
            let issue = LoadIssue::Io {
                path: parent.to_path_buf(),
                source,
            };
            error!("{issue}");
            return;
        }

        if let Err(source) = fs::write(&self.path, self.render()) {
            let issue = LoadIssue::Io {
                path: self.path.clone(),
                source,
            };
            error!("{issue}");
        }
    }

    /// Read the backing file and apply its values to the registered
    /// entries. An unreadable file yields a single `Io` issue and leaves
    /// all entries as they were.
    fn load(&self) -> Vec<LoadIssue> {
        match fs::read_to_string(&self.path) {
            Ok(content) => self.apply(&content),
            Err(source) => {
                let issue = LoadIssue::Io {
                    path: self.path.clone(),
                    source,
                };
                error!("{issue}");
                vec![issue]
            }
        }
    }

    /// Apply file content to the registered entries, line by line.
    ///
    /// A line is a value line iff it is non-empty and starts with neither
    /// `#` nor `[`; everything else is skipped. Value lines split on the
    /// first `=` only, so values may themselves contain `=`. Faults are
    /// line-granular: a malformed line is dropped, an unparseable value
    /// resets its entry to the default, and processing always continues.
    pub(crate) fn apply(&self, content: &str) -> Vec<LoadIssue> {
        let mut issues = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let number = index + 1;
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }

            let Some((name, raw)) = line.split_once('=') else {
                self.report(&mut issues, LoadIssue::MalformedLine {
                    line: number,
                    text: line.to_string(),
                });
                continue;
            };

            let Some(binding) = self.bindings.iter().find(|b| b.matches(name)) else {
                self.report(&mut issues, LoadIssue::MalformedLine {
                    line: number,
                    text: name.to_string(),
                });
                continue;
            };

            if !binding.view().apply_text(raw) {
                binding.view().reset();
                self.report(&mut issues, LoadIssue::InvalidValue {
                    line: number,
                    key: name.to_string(),
                    value: raw.to_string(),
                });
            }
        }

        issues
    }

    fn report(&self, issues: &mut Vec<LoadIssue>, issue: LoadIssue) {
        warn!(path = %self.path.display(), "{issue}");
        issues.push(issue);
    }

    /// Render the canonical file content: file comments, the `[Settings]`
    /// header, then every entry with its comments, metadata, default, and
    /// current (default-substituted) value.
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();

        for comment in &self.file_comments {
            out.push_str(&format!("# {comment}\n"));
        }

        out.push('\n');
        out.push_str("[Settings]\n");
        out.push('\n');

        for binding in &self.bindings {
            let view = binding.view();
            for comment in view.comments() {
                out.push_str(&format!("# {comment}\n"));
            }
            if let Some(metadata) = view.metadata_line() {
                out.push_str(&format!("# {metadata}\n"));
            }
            out.push_str(&format!("# Default = {}\n", view.default_text()));
            out.push_str(&format!("{}={}\n", binding.key(), view.value_text()));
            out.push('\n');
        }

        out
    }
}
