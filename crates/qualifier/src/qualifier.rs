//! Qualifier values and their equality contract.
//!
//! Two forms exist:
//!
//! - [`QualifierLiteral`] is an unchecked instance, the shape a marker has when
//!   it is first assembled. Any binding attribute may still be missing, so its
//!   equality, hash and string conversion are fallible.
//! - [`QualifierValue`] is the validated form. A missing binding attribute is
//!   unrepresentable, so it implements `Eq`, `Hash` and `Display` directly and
//!   can be used as a map key.
//!
//! Equality: same marker type, and every *binding* attribute equal. Non-binding
//! attributes are ignored by equality and by the hash.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use qualia_core::{ModelError, ModelResult, ValueObject};

use crate::hash;
use crate::marker::MarkerType;
use crate::value::AttributeValue;

type Values = BTreeMap<String, AttributeValue>;

/// Unchecked marker instance.
#[derive(Debug, Clone)]
pub struct QualifierLiteral {
    marker_type: MarkerType,
    values: Values,
}

impl QualifierLiteral {
    /// A literal of `marker_type` with every declared default applied.
    pub fn new(marker_type: MarkerType) -> Self {
        let values = marker_type
            .attributes()
            .iter()
            .filter_map(|a| a.default_value().map(|v| (a.name().to_owned(), v.clone())))
            .collect();
        Self {
            marker_type,
            values,
        }
    }

    pub fn marker_type(&self) -> &MarkerType {
        &self.marker_type
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Clear an attribute, defaults included.
    pub fn without(mut self, name: &str) -> Self {
        self.values.remove(name);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Equality under the qualifier contract.
    ///
    /// Fails if either operand is malformed, even when the marker types differ.
    pub fn try_eq(&self, other: &QualifierLiteral) -> ModelResult<bool> {
        self.check()?;
        other.check()?;
        Ok(binding_eq(
            &self.marker_type,
            &self.values,
            &other.marker_type,
            &other.values,
        ))
    }

    pub fn try_hash_code(&self) -> ModelResult<i32> {
        self.check()?;
        Ok(canonical_hash(&self.marker_type, &self.values))
    }

    pub fn try_to_string(&self) -> ModelResult<String> {
        self.check()?;
        Ok(render(&self.marker_type, &self.values))
    }

    /// Validated construction.
    pub fn build(self) -> ModelResult<QualifierValue> {
        self.check()?;
        Ok(QualifierValue {
            marker_type: self.marker_type,
            values: self.values,
        })
    }

    fn check(&self) -> ModelResult<()> {
        let t = &self.marker_type;
        if let Some(missing) = t
            .binding_attributes()
            .find(|a| !self.values.contains_key(a.name()))
        {
            return Err(ModelError::malformed(format!(
                "{t}.{} is a binding attribute with no value",
                missing.name()
            )));
        }
        for (name, value) in &self.values {
            let Some(attribute) = t.attribute(name) else {
                return Err(ModelError::validation(format!(
                    "{t} declares no attribute `{name}`"
                )));
            };
            if !attribute.kind().accepts(value) {
                return Err(ModelError::validation(format!(
                    "{t}.{name}: {value} is not a {}",
                    attribute.kind()
                )));
            }
        }
        Ok(())
    }
}

impl From<QualifierValue> for QualifierLiteral {
    fn from(value: QualifierValue) -> Self {
        Self {
            marker_type: value.marker_type,
            values: value.values,
        }
    }
}

/// Validated, immutable marker instance.
///
/// Used both for qualifiers proper and for any other marker attached to a
/// declared element; [`MarkerType::kind`] tells them apart.
#[derive(Debug, Clone)]
pub struct QualifierValue {
    marker_type: MarkerType,
    values: Values,
}

impl QualifierValue {
    /// Wrap a literal known to satisfy every invariant (built-in markers).
    pub(crate) fn assume_valid(literal: QualifierLiteral) -> Self {
        debug_assert!(literal.check().is_ok(), "invalid built-in literal");
        Self {
            marker_type: literal.marker_type,
            values: literal.values,
        }
    }

    pub fn marker_type(&self) -> &MarkerType {
        &self.marker_type
    }

    pub fn is_qualifier(&self) -> bool {
        self.marker_type.is_qualifier()
    }

    pub fn is_of(&self, marker_type: &MarkerType) -> bool {
        &self.marker_type == marker_type
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Binding attributes in declaration order.
    pub fn binding_values(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.marker_type
            .binding_attributes()
            .filter_map(move |a| self.values.get(a.name()).map(|v| (a.name(), v)))
    }

    /// `sum over binding k of (127 * name_hash(k)) ^ value_hash(self[k])`.
    pub fn hash_code(&self) -> i32 {
        canonical_hash(&self.marker_type, &self.values)
    }

    /// Re-open as a literal, e.g. to derive a variant.
    pub fn to_literal(&self) -> QualifierLiteral {
        QualifierLiteral::from(self.clone())
    }
}

impl PartialEq for QualifierValue {
    fn eq(&self, other: &Self) -> bool {
        binding_eq(
            &self.marker_type,
            &self.values,
            &other.marker_type,
            &other.values,
        )
    }
}

impl Eq for QualifierValue {}

impl core::hash::Hash for QualifierValue {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl ValueObject for QualifierValue {}

impl core::fmt::Display for QualifierValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_rendered(f, &self.marker_type, &self.values)
    }
}

impl Serialize for QualifierValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("QualifierValue", 2)?;
        s.serialize_field("type", &self.marker_type)?;
        s.serialize_field("attributes", &AttributesView(self))?;
        s.end()
    }
}

/// Attributes in declaration order, for serialization.
struct AttributesView<'a>(&'a QualifierValue);

impl Serialize for AttributesView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        let mut map = serializer.serialize_map(None)?;
        for attribute in value.marker_type.attributes() {
            if let Some(v) = value.values.get(attribute.name()) {
                map.serialize_entry(attribute.name(), v)?;
            }
        }
        map.end()
    }
}

fn binding_eq(a_type: &MarkerType, a: &Values, b_type: &MarkerType, b: &Values) -> bool {
    a_type == b_type
        && a_type
            .binding_attributes()
            .all(|attr| a.get(attr.name()) == b.get(attr.name()))
}

fn canonical_hash(marker_type: &MarkerType, values: &Values) -> i32 {
    marker_type
        .binding_attributes()
        .filter_map(|attr| {
            values
                .get(attr.name())
                .map(|v| hash::member_hash(attr.name(), v.hash_code()))
        })
        .fold(0i32, i32::wrapping_add)
}

fn render(marker_type: &MarkerType, values: &Values) -> String {
    struct Rendered<'a>(&'a MarkerType, &'a Values);

    impl core::fmt::Display for Rendered<'_> {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            write_rendered(f, self.0, self.1)
        }
    }

    Rendered(marker_type, values).to_string()
}

fn write_rendered(
    f: &mut core::fmt::Formatter<'_>,
    marker_type: &MarkerType,
    values: &Values,
) -> core::fmt::Result {
    write!(f, "{marker_type}")?;
    if marker_type.attributes().is_empty() {
        return Ok(());
    }
    f.write_str("(")?;
    for (i, attribute) in marker_type.attributes().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match values.get(attribute.name()) {
            Some(v) => write!(f, "{}={v}", attribute.name())?,
            None => write!(f, "{}=<unset>", attribute.name())?,
        }
    }
    f.write_str(")")
}
