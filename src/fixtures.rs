#[cfg(test)]
pub mod test {
    use std::path::Path;

    use crate::entry::{Entry, EnumEntry, RangedEntry, State};
    use crate::{Scope, Tunables};

    crate::choices! {
        /// Three-color palette used across the test modules.
        pub enum Palette {
            Red,
            Green,
            Blue,
        }
    }

    /// A store named `fixture`, scoped `common`, backed under `dir`.
    pub fn store_in(dir: &Path) -> Tunables {
        Tunables::new(dir, "fixture", Scope::Common)
    }

    // -- Bare entry handles, bypassing a store, for the unit tests that
    // -- exercise entries and bindings in isolation.

    pub fn plain_int(key: &str, default: i32) -> Entry<i32> {
        Entry::from_inner(State::shared(key, default, None, None, Vec::new()))
    }

    pub fn plain_bool(key: &str, default: bool) -> Entry<bool> {
        Entry::from_inner(State::shared(key, default, None, None, Vec::new()))
    }

    /// A ranged entry plus a plain alias handle onto the same state.
    pub fn ranged_int(
        key: &str,
        default: i32,
        min: i32,
        max: i32,
    ) -> (RangedEntry<i32>, Entry<i32>) {
        let inner = State::shared(key, default, Some((min, max)), None, Vec::new());
        (
            RangedEntry::from_inner(inner.clone(), min, max),
            Entry::from_inner(inner),
        )
    }

    pub fn palette_entry(key: &str, default: Palette) -> EnumEntry<Palette> {
        EnumEntry::from_inner(State::shared(key, default, None, None, Vec::new()))
    }

    #[test]
    fn fixture_store_path_is_stable() {
        let store = store_in(Path::new("/tmp"));
        assert!(store.path().ends_with("fixture-common.properties"));
    }
}
