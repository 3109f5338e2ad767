//! Entity trait: identity + continuity across revisions.

/// Entity marker + minimal interface.
///
/// A declared program element keeps its identity while its marker set is
/// replaced commit after commit.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Number of committed changes since the entity was first observed.
    fn revision(&self) -> u64;
}
