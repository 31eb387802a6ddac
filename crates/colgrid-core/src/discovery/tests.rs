use super::{AnnotationDiscovery, ReflectionDiscovery};
use crate::{
    ACTION_COLUMN_KEY,
    model::{
        column::{ActionKind, ColumnOptions},
        entity::IdentifierStrategy,
    },
    provider::{ActionDeclaration, ColumnAnnotation, DeclaredAction, GridAnnotation},
    test_fixtures::{FakeAnnotations, FakeMetadata, USER},
};
use std::path::Path;

//
// reflection
//

#[test]
fn reflection_skips_auto_identifier() {
    let meta = FakeMetadata::user();
    let columns = ReflectionDiscovery::new(&meta).discover(USER);

    assert_eq!(columns.keys().collect::<Vec<_>>(), ["name", "email"]);
    for column in &columns {
        assert!(column.options.is_empty(), "unexpected options: {column:?}");
        assert!(!column.searchable);
        assert!(!column.is_action());
    }
}

#[test]
fn reflection_keeps_manual_and_unknown_identifiers() {
    for strategy in [IdentifierStrategy::Manual, IdentifierStrategy::Unknown] {
        let meta = FakeMetadata {
            strategy,
            ..FakeMetadata::user()
        };
        let columns = ReflectionDiscovery::new(&meta).discover(USER);

        assert_eq!(
            columns.keys().collect::<Vec<_>>(),
            ["id", "name", "email"],
            "strategy {strategy}"
        );
    }
}

#[test]
fn reflection_prefers_label_option() {
    let mut meta = FakeMetadata::user();
    meta.fields = vec!["id", "firstName", "email"];
    meta.labels.insert("email", "E-mail address");

    let columns = ReflectionDiscovery::new(&meta).discover(USER);

    assert_eq!(
        columns.get("firstName").map(|c| c.label.as_str()),
        Some("First Name")
    );
    assert_eq!(
        columns.get("email").map(|c| c.label.as_str()),
        Some("E-mail address")
    );
}

#[test]
fn reflection_on_empty_entity_is_empty() {
    let meta = FakeMetadata {
        fields: Vec::new(),
        ..FakeMetadata::user()
    };

    assert!(ReflectionDiscovery::new(&meta).discover(USER).is_empty());
}

//
// annotation
//

#[test]
fn annotation_columns_then_action_column_last() {
    let meta = FakeMetadata::user();
    let annotations = FakeAnnotations::user();

    let columns = AnnotationDiscovery::new(&meta, &annotations)
        .discover(USER)
        .expect("annotated entity");

    assert_eq!(
        columns.keys().collect::<Vec<_>>(),
        ["name", "email", ACTION_COLUMN_KEY]
    );

    let name = columns.get("name").expect("name column");
    assert_eq!(name.label, "Name");
    assert_eq!(name.options, ColumnOptions::sortable());
    assert!(name.searchable);

    let email = columns.get("email").expect("email column");
    assert!(email.options.is_empty());
    assert!(!email.searchable);

    let actions = columns.action_column().expect("action column").action_list();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].action, ActionKind::Show);
    assert_eq!(actions[0].route, "user_show");
}

#[test]
fn annotation_reads_declared_fields_not_persisted_ones() {
    let meta = FakeMetadata::user();
    let mut annotations = FakeAnnotations::default();
    annotations.columns.insert(
        "password",
        ColumnAnnotation {
            label: Some("Secret".into()),
            ..ColumnAnnotation::default()
        },
    );

    let columns = AnnotationDiscovery::new(&meta, &annotations)
        .discover(USER)
        .expect("annotated entity");

    assert_eq!(columns.keys().collect::<Vec<_>>(), ["password"]);
    assert_eq!(columns[0].label, "Secret");
}

#[test]
fn field_with_reserved_key_never_displaces_the_action_column() {
    let meta = FakeMetadata {
        declared: vec![ACTION_COLUMN_KEY, "name"],
        ..FakeMetadata::user()
    };
    let mut annotations = FakeAnnotations::user();
    annotations
        .columns
        .insert(ACTION_COLUMN_KEY, ColumnAnnotation::default());

    let columns = AnnotationDiscovery::new(&meta, &annotations)
        .discover(USER)
        .expect("annotated entity");

    assert_eq!(
        columns.keys().collect::<Vec<_>>(),
        ["name", ACTION_COLUMN_KEY]
    );
    assert!(columns[1].is_action());
}

#[test]
fn reflection_skips_field_with_reserved_key() {
    let meta = FakeMetadata {
        fields: vec!["name", ACTION_COLUMN_KEY],
        ..FakeMetadata::user()
    };

    let columns = ReflectionDiscovery::new(&meta).discover(USER);

    assert_eq!(columns.keys().collect::<Vec<_>>(), ["name"]);
}

#[test]
fn annotation_without_any_annotation_is_absent() {
    let meta = FakeMetadata::user();
    let annotations = FakeAnnotations::default();

    assert_eq!(
        AnnotationDiscovery::new(&meta, &annotations).discover(USER),
        None
    );
}

#[test]
fn grouping_alone_yields_only_the_action_column() {
    let meta = FakeMetadata::user();
    let annotations = FakeAnnotations {
        grid: Some(GridAnnotation {
            actions: vec![
                ActionDeclaration::new("Delete", "user_delete", DeclaredAction::Delete),
                ActionDeclaration::new(
                    "Archive",
                    "user_archive",
                    DeclaredAction::Custom("archive".into()),
                ),
            ],
        }),
        ..FakeAnnotations::default()
    };

    let columns = AnnotationDiscovery::new(&meta, &annotations)
        .discover(USER)
        .expect("grouping annotation");

    assert_eq!(columns.len(), 1);
    let kinds: Vec<_> = columns[0].action_list().iter().map(|a| a.action).collect();
    assert_eq!(kinds, [ActionKind::Delete, ActionKind::Other]);
}

#[test]
fn empty_annotation_label_falls_back_to_derived() {
    let meta = FakeMetadata::user();
    let mut annotations = FakeAnnotations::default();
    annotations.columns.insert(
        "email",
        ColumnAnnotation {
            label: Some(String::new()),
            ..ColumnAnnotation::default()
        },
    );

    let columns = AnnotationDiscovery::new(&meta, &annotations)
        .discover(USER)
        .expect("annotated entity");

    assert_eq!(columns[0].label, "Email");
}

#[test]
fn applicability_requires_source_and_cache_root() {
    let meta = FakeMetadata::user();
    let annotations = FakeAnnotations::user();
    let root = Path::new("/tmp/colgrid");

    assert!(AnnotationDiscovery::applicable(&meta, Some(&annotations), Some(root)).is_some());
    assert!(AnnotationDiscovery::applicable(&meta, Some(&annotations), None).is_none());
    assert!(
        AnnotationDiscovery::<_, FakeAnnotations>::applicable(&meta, None, Some(root)).is_none()
    );
}
