//! Attribute values.

use serde::Serialize;

use qualia_core::ValueObject;

use crate::hash;
use crate::qualifier::QualifierValue;

/// A concrete attribute value.
///
/// Only types with well-defined value equality are representable. Floats
/// compare by canonical bit pattern so equality stays an equivalence relation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Char(char),
    Float(f32),
    Double(f64),
    String(String),
    /// Reference to a type, by name.
    Type(String),
    Enum { enum_type: String, variant: String },
    Marker(QualifierValue),
    Array(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn type_ref(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }

    pub fn enumerant(enum_type: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum {
            enum_type: enum_type.into(),
            variant: variant.into(),
        }
    }

    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AttributeValue>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_type_name(&self) -> Option<&str> {
        match self {
            Self::Type(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Canonical hash of this value; arrays combine their elements.
    pub fn hash_code(&self) -> i32 {
        match self {
            Self::Bool(v) => hash::bool_hash(*v),
            Self::Byte(v) => i32::from(*v),
            Self::Short(v) => i32::from(*v),
            Self::Int(v) => *v,
            Self::Long(v) => hash::long_hash(*v),
            Self::Char(v) => hash::char_hash(*v),
            Self::Float(v) => hash::float_hash(*v),
            Self::Double(v) => hash::double_hash(*v),
            Self::String(v) | Self::Type(v) => hash::string_hash(v),
            Self::Enum { enum_type, variant } => hash::string_hash(enum_type)
                .wrapping_mul(31)
                .wrapping_add(hash::string_hash(variant)),
            Self::Marker(nested) => nested.hash_code(),
            Self::Array(items) => hash::array_hash(items.iter().map(AttributeValue::hash_code)),
        }
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => hash::float_bits(*a) == hash::float_bits(*b),
            (Self::Double(a), Self::Double(b)) => hash::double_bits(*a) == hash::double_bits(*b),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Type(a), Self::Type(b)) => a == b,
            (
                Self::Enum {
                    enum_type: ta,
                    variant: va,
                },
                Self::Enum {
                    enum_type: tb,
                    variant: vb,
                },
            ) => ta == tb && va == vb,
            (Self::Marker(a), Self::Marker(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for AttributeValue {}

impl core::hash::Hash for AttributeValue {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl ValueObject for AttributeValue {}

impl core::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Double(v) => write!(f, "{v:?}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Type(name) => write!(f, "<{name}>"),
            Self::Enum { enum_type, variant } => write!(f, "{enum_type}::{variant}"),
            Self::Marker(nested) => write!(f, "{nested}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for AttributeValue {
                fn from(value: $t) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive!(
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    char => Char,
    f32 => Float,
    f64 => Double,
    String => String,
    QualifierValue => Marker,
);

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(items: Vec<T>) -> Self {
        Self::array(items)
    }
}
