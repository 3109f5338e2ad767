//! Declared program elements.

use serde::Serialize;

use qualia_core::{ElementId, Entity};
use qualia_qualifier::{MarkerType, QualifierSet, QualifierValue};

/// What kind of program element carries the markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Type,
    Field,
    Method,
    Parameter,
}

impl core::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ElementKind::Type => "type",
            ElementKind::Field => "field",
            ElementKind::Method => "method",
            ElementKind::Parameter => "parameter",
        };
        f.write_str(s)
    }
}

/// Immutable snapshot of a program element and the markers attached to it.
///
/// Marker order carries no meaning. A snapshot is never edited in place: a
/// commit produces a new snapshot with the same id and `revision + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredElement {
    id: ElementId,
    kind: ElementKind,
    declaring_type: String,
    name: String,
    markers: Vec<QualifierValue>,
    revision: u64,
}

impl DeclaredElement {
    /// Snapshot as produced by introspection (revision 0).
    pub fn new(
        id: ElementId,
        kind: ElementKind,
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        markers: impl IntoIterator<Item = QualifierValue>,
    ) -> Self {
        Self {
            id,
            kind,
            declaring_type: declaring_type.into(),
            name: name.into(),
            markers: markers.into_iter().collect(),
            revision: 0,
        }
    }

    /// Field snapshot with a fresh id.
    pub fn field(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        markers: impl IntoIterator<Item = QualifierValue>,
    ) -> Self {
        Self::new(
            ElementId::new(),
            ElementKind::Field,
            declaring_type,
            name,
            markers,
        )
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn markers(&self) -> &[QualifierValue] {
        &self.markers
    }

    pub fn has_marker(&self, marker_type: &MarkerType) -> bool {
        self.markers.iter().any(|m| m.is_of(marker_type))
    }

    pub fn markers_of<'a>(
        &'a self,
        marker_type: &'a MarkerType,
    ) -> impl Iterator<Item = &'a QualifierValue> + 'a {
        self.markers.iter().filter(move |m| m.is_of(marker_type))
    }

    /// The qualifier-kind markers, as a resolution key.
    pub fn qualifiers(&self) -> QualifierSet {
        self.markers
            .iter()
            .filter(|m| m.is_qualifier())
            .cloned()
            .collect()
    }

    /// Successor snapshot carrying `markers`.
    pub(crate) fn with_markers(&self, markers: Vec<QualifierValue>) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            declaring_type: self.declaring_type.clone(),
            name: self.name.clone(),
            markers,
            revision: self.revision + 1,
        }
    }
}

impl Entity for DeclaredElement {
    type Id = ElementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

impl core::fmt::Display for DeclaredElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}.{}", self.kind, self.declaring_type, self.name)
    }
}
