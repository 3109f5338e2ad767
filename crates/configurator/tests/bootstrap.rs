//! End-to-end bootstrap flow: introspected elements are registered, configured,
//! committed, and then looked up by qualifier set.

use qualia_configurator::{DeclaredElement, ElementKind, ElementRegistry};
use qualia_core::{ElementId, Entity};
use qualia_qualifier::{
    AttributeDescriptor, AttributeKind, AttributeValue, MarkerKind, MarkerType, QualifierSet,
    QualifierValue, builtin,
};

fn init_tracing() {
    qualia_observability::init();
}

/// `@Datasource(region: enum Region, pool: String [non-binding])`
fn datasource_type() -> MarkerType {
    MarkerType::builder("Datasource")
        .kind(MarkerKind::Qualifier)
        .attribute(AttributeDescriptor::new(
            "region",
            AttributeKind::Enum("Region".into()),
        ))
        .attribute(
            AttributeDescriptor::new("pool", AttributeKind::String)
                .non_binding()
                .with_default("default"),
        )
        .build()
        .unwrap()
}

fn datasource(region: &str, pool: &str) -> QualifierValue {
    datasource_type()
        .literal()
        .with("region", AttributeValue::enumerant("Region", region))
        .with("pool", pool)
        .build()
        .unwrap()
}

#[test]
fn configure_commit_and_resolve() {
    init_tracing();

    let mut registry = ElementRegistry::new();
    let field_id = ElementId::new();
    registry
        .register(DeclaredElement::new(
            field_id,
            ElementKind::Field,
            "ReportService",
            "reportsDb",
            [builtin::inject(), datasource("Eu", "reports")],
        ))
        .unwrap();
    let param = registry
        .register(DeclaredElement::new(
            ElementId::new(),
            ElementKind::Parameter,
            "AuditService",
            "db",
            [datasource("Us", "audit")],
        ))
        .unwrap();

    // A portable extension moves the field to the US region and marks it @Named.
    let mut cfg = registry.configure(&field_id).unwrap();
    cfg.remove(&datasource("Eu", "any-pool"))
        .unwrap()
        .add(datasource("Us", "reports"))
        .unwrap()
        .add(builtin::named("reports"))
        .unwrap();
    assert_eq!(cfg.annotated().markers().len(), 2);
    let committed = registry.commit(&mut cfg).unwrap();

    assert_eq!(committed.revision(), 1);
    assert!(committed.has_marker(&builtin::INJECT));

    // The key only cares about binding attributes: the pool name is irrelevant.
    let key: QualifierSet = [datasource("Us", "whatever")].into_iter().collect();
    let found = registry.find_by_qualifiers(&key);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), param.id());

    let key: QualifierSet = [builtin::named("reports"), datasource("Us", "x")]
        .into_iter()
        .collect();
    let found = registry.find_by_qualifiers(&key);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), &field_id);
}

#[test]
fn configurator_is_unusable_after_commit() {
    init_tracing();

    let mut registry = ElementRegistry::new();
    let element = registry
        .register(DeclaredElement::field("Mailer", "transport", [builtin::default_qualifier()]))
        .unwrap();

    let mut cfg = registry.configure(element.id()).unwrap();
    cfg.remove_all().unwrap();
    let committed = registry.commit(&mut cfg).unwrap();
    assert!(committed.markers().is_empty());

    let err = cfg.add(builtin::any()).unwrap_err();
    assert!(err.is_lifecycle());
    assert!(err.to_string().contains("already committed"));

    // A fresh configurator picks up the committed snapshot.
    let mut next = registry.configure(element.id()).unwrap();
    assert!(next.pending().is_empty());
    next.add(builtin::any()).unwrap();
    assert_eq!(registry.commit(&mut next).unwrap().revision(), 2);
}
