//! Order-independent qualifier sets, used as resolution keys.

use serde::Serialize;

use qualia_core::ValueObject;

use crate::qualifier::QualifierValue;

/// A duplicate-free set of qualifier values.
///
/// Membership uses qualifier equality, so two values differing only in a
/// non-binding attribute count once. Equality and hash ignore insertion order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct QualifierSet {
    members: Vec<QualifierValue>,
}

impl QualifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if an equal value is already present.
    pub fn insert(&mut self, value: QualifierValue) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.members.push(value);
        true
    }

    pub fn remove(&mut self, value: &QualifierValue) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != value);
        self.members.len() != before
    }

    pub fn contains(&self, value: &QualifierValue) -> bool {
        self.members.iter().any(|m| m == value)
    }

    pub fn is_superset_of(&self, other: &QualifierSet) -> bool {
        other.members.iter().all(|m| self.contains(m))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, QualifierValue> {
        self.members.iter()
    }

    /// Wrapping sum of member hashes.
    pub fn hash_code(&self) -> i32 {
        self.members
            .iter()
            .map(QualifierValue::hash_code)
            .fold(0i32, i32::wrapping_add)
    }
}

impl PartialEq for QualifierSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_superset_of(other)
    }
}

impl Eq for QualifierSet {}

impl core::hash::Hash for QualifierSet {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl ValueObject for QualifierSet {}

impl FromIterator<QualifierValue> for QualifierSet {
    fn from_iter<I: IntoIterator<Item = QualifierValue>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a QualifierSet {
    type Item = &'a QualifierValue;
    type IntoIter = core::slice::Iter<'a, QualifierValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl core::fmt::Display for QualifierSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("{")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{member}")?;
        }
        f.write_str("}")
    }
}
