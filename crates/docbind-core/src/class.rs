use serde::Serialize;
use std::fmt;

///
/// ClassId
///
/// Stable opaque handle identifying one declared class. The wrapped path
/// is the metadata map key; two ids name the same class exactly when
/// their paths are equal.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ClassId(&'static str);

impl ClassId {
    /// Build an id from a fully-qualified class path.
    #[must_use]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    /// Id of a statically declared class.
    #[must_use]
    pub const fn of<C: ClassKind>() -> Self {
        Self(C::PATH)
    }

    /// The fully-qualified path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        self.0
    }

    /// Last path segment, the bare class identifier.
    #[must_use]
    pub fn ident(self) -> &'static str {
        self.0.rsplit_once("::").map_or(self.0, |(_, ident)| ident)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

///
/// ClassKind
///
/// Fully-qualified identity for a statically declared class, plus its
/// position in the declared hierarchy. `PARENT` is the single source for
/// the parent link written at declaration time.
///

pub trait ClassKind: 'static {
    const PATH: &'static str;
    const PARENT: Option<ClassId> = None;
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    struct Creature;

    impl ClassKind for Creature {
        const PATH: &'static str = "bestiary::Creature";
    }

    struct Beast;

    impl ClassKind for Beast {
        const PATH: &'static str = "bestiary::Beast";
        const PARENT: Option<ClassId> = Some(ClassId::of::<Creature>());
    }

    #[test]
    fn class_id_of_matches_declared_path() {
        assert_eq!(
            ClassId::of::<Creature>(),
            ClassId::new("bestiary::Creature")
        );
        assert_eq!(ClassId::of::<Creature>().ident(), "Creature");
    }

    #[test]
    fn parent_defaults_to_none_and_carries_declared_links() {
        assert_eq!(<Creature as ClassKind>::PARENT, None);
        assert_eq!(
            <Beast as ClassKind>::PARENT,
            Some(ClassId::of::<Creature>())
        );
    }

    #[test]
    fn bare_path_is_its_own_ident() {
        assert_eq!(ClassId::new("Loner").ident(), "Loner");
    }

    #[test]
    fn display_renders_the_full_path() {
        assert_eq!(
            ClassId::new("bestiary::Creature").to_string(),
            "bestiary::Creature"
        );
    }
}
