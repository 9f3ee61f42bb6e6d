//! Closed sets of named constants for enum-valued entries.
//!
//! An enum entry's domain is fixed at declaration time: the full constant
//! list, each constant's name, and a name-to-constant lookup all come from
//! the [`Choice`] trait. The persisted form of a value is its declared name
//! verbatim; lookup is ASCII-case-insensitive, so a hand-edited `blue`,
//! `BLUE`, or `Blue` all resolve to the same constant. That asymmetry is
//! deliberate — the file is written canonically but read forgivingly.

/// A fixed set of named constants usable as the domain of an enum entry.
///
/// Implement by hand, or declare the enum through the [`choices!`] macro
/// which generates both the type and this impl.
///
/// [`choices!`]: crate::choices
pub trait Choice: Copy + PartialEq + 'static {
    /// Every constant of the set, in declaration order. Declaration order
    /// is what the `Options:` metadata comment shows in the file.
    const ALL: &'static [Self];

    /// The constant's declared name, used as its persisted form.
    fn name(&self) -> &'static str;

    /// Look a constant up by name, ignoring ASCII case.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.name().eq_ignore_ascii_case(name))
    }
}

/// Declare an enum and implement [`Choice`] for it in one go.
///
/// ```
/// tunables::choices! {
///     /// Render quality presets.
///     pub enum Quality {
///         Low,
///         Medium,
///         High,
///     }
/// }
///
/// use tunables::Choice;
/// assert_eq!(Quality::Medium.name(), "Medium");
/// assert_eq!(Quality::from_name("high"), Some(Quality::High));
/// ```
#[macro_export]
macro_rules! choices {
    (
        $(#[$outer:meta])*
        $vis:vis enum $name:ident {
            $($(#[$inner:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($(#[$inner])* $variant,)+
        }

        impl $crate::Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::choices! {
        enum Direction {
            North,
            South,
            East,
            West,
        }
    }

    #[test]
    fn all_preserves_declaration_order() {
        assert_eq!(
            Direction::ALL,
            &[
                Direction::North,
                Direction::South,
                Direction::East,
                Direction::West
            ]
        );
    }

    #[test]
    fn name_is_declared_name() {
        assert_eq!(Direction::North.name(), "North");
        assert_eq!(Direction::West.name(), "West");
    }

    #[test]
    fn from_name_exact() {
        assert_eq!(Direction::from_name("South"), Some(Direction::South));
    }

    #[test]
    fn from_name_ignores_ascii_case() {
        assert_eq!(Direction::from_name("south"), Some(Direction::South));
        assert_eq!(Direction::from_name("EAST"), Some(Direction::East));
        assert_eq!(Direction::from_name("nOrTh"), Some(Direction::North));
    }

    #[test]
    fn from_name_unknown_is_none() {
        assert_eq!(Direction::from_name("up"), None);
        assert_eq!(Direction::from_name(""), None);
    }
}
