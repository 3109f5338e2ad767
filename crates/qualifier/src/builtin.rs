//! Built-in marker types and ready-made values.
//!
//! Hand-built literals of these types compare equal to the values returned
//! here, so callers may use either.

use std::sync::LazyLock;

use crate::marker::{AttributeDescriptor, AttributeKind, MarkerKind, MarkerType};
use crate::qualifier::QualifierValue;
use crate::value::AttributeValue;

fn marker(name: &str, kind: MarkerKind) -> MarkerType {
    MarkerType::builder(name).kind(kind).build_unchecked()
}

fn type_valued(name: &str, kind: MarkerKind, default: Option<&str>) -> MarkerType {
    let mut value = AttributeDescriptor::new("value", AttributeKind::Type);
    if let Some(default) = default {
        value = value.with_default(AttributeValue::type_ref(default));
    }
    MarkerType::builder(name)
        .kind(kind)
        .attribute(value)
        .build_unchecked()
}

// Qualifiers.
pub static ANY: LazyLock<MarkerType> = LazyLock::new(|| marker("Any", MarkerKind::Qualifier));
pub static DEFAULT: LazyLock<MarkerType> =
    LazyLock::new(|| marker("Default", MarkerKind::Qualifier));
pub static NAMED: LazyLock<MarkerType> = LazyLock::new(|| {
    MarkerType::builder("Named")
        .attribute(AttributeDescriptor::new("value", AttributeKind::String).with_default(""))
        .build_unchecked()
});
pub static NEW: LazyLock<MarkerType> =
    LazyLock::new(|| type_valued("New", MarkerKind::Qualifier, Some("New")));
/// Observes initialization of the scope named by `value`.
pub static INITIALIZED: LazyLock<MarkerType> =
    LazyLock::new(|| type_valued("Initialized", MarkerKind::Qualifier, None));
/// Observes destruction of the scope named by `value`.
pub static DESTROYED: LazyLock<MarkerType> =
    LazyLock::new(|| type_valued("Destroyed", MarkerKind::Qualifier, None));

// Scopes.
pub static APPLICATION_SCOPED: LazyLock<MarkerType> =
    LazyLock::new(|| marker("ApplicationScoped", MarkerKind::Scope));
pub static REQUEST_SCOPED: LazyLock<MarkerType> =
    LazyLock::new(|| marker("RequestScoped", MarkerKind::Scope));
pub static SESSION_SCOPED: LazyLock<MarkerType> =
    LazyLock::new(|| marker("SessionScoped", MarkerKind::Scope));
pub static CONVERSATION_SCOPED: LazyLock<MarkerType> =
    LazyLock::new(|| marker("ConversationScoped", MarkerKind::Scope));
pub static DEPENDENT: LazyLock<MarkerType> =
    LazyLock::new(|| marker("Dependent", MarkerKind::Scope));
pub static SINGLETON: LazyLock<MarkerType> =
    LazyLock::new(|| marker("Singleton", MarkerKind::Scope));

// Plain markers.
pub static INJECT: LazyLock<MarkerType> = LazyLock::new(|| marker("Inject", MarkerKind::Plain));
pub static ALTERNATIVE: LazyLock<MarkerType> =
    LazyLock::new(|| marker("Alternative", MarkerKind::Plain));
pub static VETOED: LazyLock<MarkerType> = LazyLock::new(|| marker("Vetoed", MarkerKind::Plain));
pub static SPECIALIZES: LazyLock<MarkerType> =
    LazyLock::new(|| marker("Specializes", MarkerKind::Plain));
pub static TRANSIENT_REFERENCE: LazyLock<MarkerType> =
    LazyLock::new(|| marker("TransientReference", MarkerKind::Plain));
pub static NONBINDING: LazyLock<MarkerType> =
    LazyLock::new(|| marker("Nonbinding", MarkerKind::Plain));
pub static QUALIFIER: LazyLock<MarkerType> =
    LazyLock::new(|| marker("Qualifier", MarkerKind::Plain));
/// Restricts the bean types of the annotated element.
pub static TYPED: LazyLock<MarkerType> = LazyLock::new(|| {
    MarkerType::builder("Typed")
        .kind(MarkerKind::Plain)
        .attribute(
            AttributeDescriptor::new("value", AttributeKind::array_of(AttributeKind::Type))
                .with_default(AttributeValue::Array(Vec::new())),
        )
        .build_unchecked()
});

/// The only value of a marker type whose attributes all have defaults.
pub fn instance(marker_type: &MarkerType) -> Option<QualifierValue> {
    marker_type.literal().build().ok()
}

fn defaulted(marker_type: &MarkerType) -> QualifierValue {
    QualifierValue::assume_valid(marker_type.literal())
}

pub fn any() -> QualifierValue {
    defaulted(&ANY)
}

pub fn default_qualifier() -> QualifierValue {
    defaulted(&DEFAULT)
}

/// `@Named("")`.
pub fn named_default() -> QualifierValue {
    defaulted(&NAMED)
}

pub fn named(value: impl Into<String>) -> QualifierValue {
    QualifierValue::assume_valid(NAMED.literal().with("value", value.into()))
}

/// `@New(New)`.
pub fn new_qualifier() -> QualifierValue {
    defaulted(&NEW)
}

pub fn new_of(type_name: impl Into<String>) -> QualifierValue {
    QualifierValue::assume_valid(NEW.literal().with("value", AttributeValue::type_ref(type_name)))
}

pub fn initialized(scope: &MarkerType) -> QualifierValue {
    QualifierValue::assume_valid(
        INITIALIZED
            .literal()
            .with("value", AttributeValue::type_ref(scope.name())),
    )
}

pub fn destroyed(scope: &MarkerType) -> QualifierValue {
    QualifierValue::assume_valid(
        DESTROYED
            .literal()
            .with("value", AttributeValue::type_ref(scope.name())),
    )
}

pub fn typed<I, S>(type_names: I) -> QualifierValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let types = AttributeValue::array(
        type_names
            .into_iter()
            .map(|name| AttributeValue::type_ref(name)),
    );
    QualifierValue::assume_valid(TYPED.literal().with("value", types))
}

pub fn inject() -> QualifierValue {
    defaulted(&INJECT)
}

pub fn application_scoped() -> QualifierValue {
    defaulted(&APPLICATION_SCOPED)
}

pub fn request_scoped() -> QualifierValue {
    defaulted(&REQUEST_SCOPED)
}

pub fn dependent() -> QualifierValue {
    defaulted(&DEPENDENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_built(name: &str, kind: MarkerKind) -> QualifierValue {
        MarkerType::builder(name)
            .kind(kind)
            .build()
            .unwrap()
            .literal()
            .build()
            .unwrap()
    }

    #[test]
    fn hand_built_literals_equal_builtins() {
        assert_eq!(hand_built("Default", MarkerKind::Qualifier), default_qualifier());
        assert_eq!(hand_built("Any", MarkerKind::Qualifier), any());
        assert_eq!(hand_built("Inject", MarkerKind::Plain), inject());
        assert_eq!(hand_built("RequestScoped", MarkerKind::Scope), request_scoped());
        assert_eq!(
            hand_built("Nonbinding", MarkerKind::Plain),
            instance(&NONBINDING).unwrap()
        );
    }

    #[test]
    fn named_defaults_to_empty_string() {
        assert_eq!(named_default().get("value").and_then(|v| v.as_str()), Some(""));
        assert_eq!(named("foo").get("value").and_then(|v| v.as_str()), Some("foo"));
        assert_eq!(named(""), named_default());
        assert_eq!(named_default().hash_code(), 1_335_633_679);
    }

    #[test]
    fn new_defaults_to_itself() {
        assert_eq!(
            new_qualifier().get("value").and_then(|v| v.as_type_name()),
            Some("New")
        );
        assert_eq!(
            new_of("Boolean").get("value").and_then(|v| v.as_type_name()),
            Some("Boolean")
        );
    }

    #[test]
    fn typed_defaults_to_no_types() {
        let empty = instance(&TYPED).unwrap();
        assert_eq!(empty.get("value").and_then(|v| v.as_array()).map(<[_]>::len), Some(0));

        let one = typed(["String"]);
        let types = one.get("value").and_then(|v| v.as_array()).unwrap();
        assert_eq!(types[0].as_type_name(), Some("String"));
    }

    #[test]
    fn lifecycle_qualifiers_carry_their_scope() {
        let init = initialized(&REQUEST_SCOPED);
        assert_eq!(init.get("value").and_then(|v| v.as_type_name()), Some("RequestScoped"));
        assert_ne!(init, initialized(&SESSION_SCOPED));

        let gone = destroyed(&CONVERSATION_SCOPED);
        assert_eq!(
            gone.get("value").and_then(|v| v.as_type_name()),
            Some("ConversationScoped")
        );
        assert_eq!(gone.to_string(), "@Destroyed(value=<ConversationScoped>)");
    }

    #[test]
    fn initialized_has_no_instance_without_a_scope() {
        assert!(instance(&INITIALIZED).is_none());
    }

    #[test]
    fn kinds() {
        assert!(named("x").is_qualifier());
        assert!(!application_scoped().is_qualifier());
        assert!(!dependent().is_qualifier());
        assert_eq!(SINGLETON.kind(), MarkerKind::Scope);
        assert_eq!(ALTERNATIVE.kind(), MarkerKind::Plain);
    }
}
