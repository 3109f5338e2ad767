//! Value object trait: equality by value, not identity.
//!
//! Marker values are looked up by content. Two qualifier values built
//! independently from the same attributes must be interchangeable as map keys,
//! so every value type in the model implements this trait.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. On top of the
/// usual `Clone + PartialEq + Debug`, the qualifier model needs them to be
/// usable as hash keys, hence `Eq + Hash`.
///
/// ## Contract
///
/// - `a == a`, `a == b ⇔ b == a`, `a == b && b == c ⇒ a == c`
/// - `a == b ⇒ hash(a) == hash(b)`
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct ScopeName(String);
///
/// impl ValueObject for ScopeName {}
/// ```
pub trait ValueObject: Clone + Eq + core::hash::Hash + core::fmt::Debug {}
