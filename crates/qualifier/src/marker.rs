//! Marker type descriptors.
//!
//! A [`MarkerType`] is the registration-time description of a kind of marker:
//! its name, what it is used for, and the attributes an instance carries. Each
//! attribute states whether it takes part in equality ("binding") or not.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use qualia_core::{ModelError, ModelResult};

use crate::qualifier::QualifierLiteral;
use crate::value::AttributeValue;

/// What a marker type is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Takes part in resolution keys.
    Qualifier,
    /// Names a lifecycle scope.
    Scope,
    /// Bundles other markers.
    Stereotype,
    /// Any other marker (injection points, alternatives, vetoes, ...).
    Plain,
}

/// Declared value type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    String,
    /// Reference to a type, by name.
    Type,
    /// Enumerant of the named enum type.
    Enum(String),
    /// Nested marker of the named marker type.
    Marker(String),
    Array(Box<AttributeKind>),
}

impl AttributeKind {
    pub fn array_of(element: AttributeKind) -> Self {
        Self::Array(Box::new(element))
    }

    /// Whether `value` is a legal value for an attribute of this kind.
    pub fn accepts(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Self::Bool, AttributeValue::Bool(_))
            | (Self::Byte, AttributeValue::Byte(_))
            | (Self::Short, AttributeValue::Short(_))
            | (Self::Int, AttributeValue::Int(_))
            | (Self::Long, AttributeValue::Long(_))
            | (Self::Char, AttributeValue::Char(_))
            | (Self::Float, AttributeValue::Float(_))
            | (Self::Double, AttributeValue::Double(_))
            | (Self::String, AttributeValue::String(_))
            | (Self::Type, AttributeValue::Type(_)) => true,
            (Self::Enum(expected), AttributeValue::Enum { enum_type, .. }) => expected == enum_type,
            (Self::Marker(expected), AttributeValue::Marker(nested)) => {
                nested.marker_type().name() == expected
            }
            (Self::Array(element), AttributeValue::Array(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            _ => false,
        }
    }
}

impl core::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Byte => f.write_str("byte"),
            Self::Short => f.write_str("short"),
            Self::Int => f.write_str("int"),
            Self::Long => f.write_str("long"),
            Self::Char => f.write_str("char"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::String => f.write_str("string"),
            Self::Type => f.write_str("type"),
            Self::Enum(name) => write!(f, "enum {name}"),
            Self::Marker(name) => write!(f, "@{name}"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// One declared attribute of a marker type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    name: String,
    kind: AttributeKind,
    binding: bool,
    default: Option<AttributeValue>,
}

impl AttributeDescriptor {
    /// A binding attribute without a default.
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            binding: true,
            default: None,
        }
    }

    /// Exclude this attribute from equality, hashing and remove-matching.
    pub fn non_binding(mut self) -> Self {
        self.binding = false;
        self
    }

    /// Value used when a literal does not set the attribute.
    pub fn with_default(mut self, value: impl Into<AttributeValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn is_binding(&self) -> bool {
        self.binding
    }

    pub fn default_value(&self) -> Option<&AttributeValue> {
        self.default.as_ref()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct MarkerTypeDef {
    name: String,
    kind: MarkerKind,
    attributes: Vec<AttributeDescriptor>,
}

/// Shared handle to a marker type descriptor.
///
/// Cloning is cheap. Two handles denote the same marker type when their whole
/// descriptors agree: name, kind, and every attribute with its kind, binding
/// flag and default. Hashing uses the name alone.
#[derive(Clone)]
pub struct MarkerType(Arc<MarkerTypeDef>);

impl MarkerType {
    /// Start describing a marker type. The kind defaults to [`MarkerKind::Qualifier`].
    pub fn builder(name: impl Into<String>) -> MarkerTypeBuilder {
        MarkerTypeBuilder {
            name: name.into(),
            kind: MarkerKind::Qualifier,
            attributes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> MarkerKind {
        self.0.kind
    }

    pub fn is_qualifier(&self) -> bool {
        self.0.kind == MarkerKind::Qualifier
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.0.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.0.attributes.iter().find(|a| a.name == name)
    }

    pub fn binding_attributes(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.0.attributes.iter().filter(|a| a.binding)
    }

    /// A new literal of this type with declared defaults filled in.
    pub fn literal(&self) -> QualifierLiteral {
        QualifierLiteral::new(self.clone())
    }
}

impl PartialEq for MarkerType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for MarkerType {}

impl core::hash::Hash for MarkerType {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl core::fmt::Debug for MarkerType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MarkerType")
            .field("name", &self.0.name)
            .field("kind", &self.0.kind)
            .field("attributes", &self.0.attributes.len())
            .finish()
    }
}

impl core::fmt::Display for MarkerType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "@{}", self.0.name)
    }
}

impl Serialize for MarkerType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.name)
    }
}

/// Builder for [`MarkerType`].
#[derive(Debug)]
pub struct MarkerTypeBuilder {
    name: String,
    kind: MarkerKind,
    attributes: Vec<AttributeDescriptor>,
}

impl MarkerTypeBuilder {
    pub fn kind(mut self, kind: MarkerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Validate the descriptor table and freeze it.
    pub fn build(self) -> ModelResult<MarkerType> {
        if self.name.trim().is_empty() {
            return Err(ModelError::validation("marker type name cannot be empty"));
        }
        for (i, attribute) in self.attributes.iter().enumerate() {
            if attribute.name.trim().is_empty() {
                return Err(ModelError::validation(format!(
                    "@{}: attribute name cannot be empty",
                    self.name
                )));
            }
            if self.attributes[..i].iter().any(|a| a.name == attribute.name) {
                return Err(ModelError::validation(format!(
                    "@{}: attribute `{}` declared twice",
                    self.name, attribute.name
                )));
            }
            if let Some(default) = &attribute.default {
                if !attribute.kind.accepts(default) {
                    return Err(ModelError::validation(format!(
                        "@{}.{}: default {} is not a {}",
                        self.name, attribute.name, default, attribute.kind
                    )));
                }
            }
        }
        Ok(self.build_unchecked())
    }

    /// Freeze a descriptor table known to be valid.
    pub(crate) fn build_unchecked(self) -> MarkerType {
        MarkerType(Arc::new(MarkerTypeDef {
            name: self.name,
            kind: self.kind,
            attributes: self.attributes,
        }))
    }
}
