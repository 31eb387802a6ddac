//! In-memory providers shared by unit tests.

use crate::{
    model::entity::{EntityHandle, IdentifierStrategy},
    provider::{
        ActionDeclaration, AnnotationSource, ColumnAnnotation, DeclaredAction, GridAnnotation,
        MetadataProvider,
    },
};
use std::{cell::Cell, collections::BTreeMap, path::PathBuf, time::SystemTime};

pub(crate) const USER: &str = "app::model::User";

///
/// FakeMetadata
/// Records every call so tests can assert on provider access.
///

pub(crate) struct FakeMetadata {
    pub(crate) fields: Vec<&'static str>,
    pub(crate) declared: Vec<&'static str>,
    pub(crate) identifier: Option<&'static str>,
    pub(crate) strategy: IdentifierStrategy,
    pub(crate) labels: BTreeMap<&'static str, &'static str>,
    pub(crate) source_location: Option<PathBuf>,
    pub(crate) source_mtime: Option<SystemTime>,
    pub(crate) calls: Cell<usize>,
}

impl FakeMetadata {
    /// `{id (auto), name, email}` with no label options.
    pub(crate) fn user() -> Self {
        Self {
            fields: vec!["id", "name", "email"],
            declared: vec!["id", "name", "email", "password"],
            identifier: Some("id"),
            strategy: IdentifierStrategy::Auto,
            labels: BTreeMap::new(),
            source_location: None,
            source_mtime: Some(SystemTime::UNIX_EPOCH),
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    fn touch(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl MetadataProvider for FakeMetadata {
    fn field_names(&self, _: &str) -> Vec<String> {
        self.touch();
        self.fields.iter().map(ToString::to_string).collect()
    }

    fn identifier(&self, _: &str) -> Option<String> {
        self.touch();
        self.identifier.map(ToString::to_string)
    }

    fn identifier_strategy(&self, _: &str) -> IdentifierStrategy {
        self.touch();
        self.strategy
    }

    fn field_label_option(&self, _: &str, field: &str) -> Option<String> {
        self.touch();
        self.labels.get(field).map(ToString::to_string)
    }

    fn reflective_handle(&self, entity: &str) -> EntityHandle {
        self.touch();
        let module_path = entity.rsplit_once("::").map_or("", |(module, _)| module);

        let mut handle =
            EntityHandle::new(entity, module_path).with_declared_fields(self.declared.clone());
        handle.source_location.clone_from(&self.source_location);
        handle.source_mtime = self.source_mtime;

        handle
    }
}

///
/// FakeAnnotations
///

#[derive(Default)]
pub(crate) struct FakeAnnotations {
    pub(crate) grid: Option<GridAnnotation>,
    pub(crate) columns: BTreeMap<&'static str, ColumnAnnotation>,
    pub(crate) calls: Cell<usize>,
}

impl FakeAnnotations {
    /// `name` (sortable, searchable), `email` (plain) and one show action.
    pub(crate) fn user() -> Self {
        let mut columns = BTreeMap::new();
        columns.insert(
            "name",
            ColumnAnnotation {
                label: None,
                sortable: true,
                searchable: true,
            },
        );
        columns.insert("email", ColumnAnnotation::default());

        Self {
            grid: Some(GridAnnotation {
                actions: vec![ActionDeclaration::new(
                    "Show",
                    "user_show",
                    DeclaredAction::Show,
                )],
            }),
            columns,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl AnnotationSource for FakeAnnotations {
    fn class_grouping_annotation(&self, _: &str) -> Option<GridAnnotation> {
        self.calls.set(self.calls.get() + 1);
        self.grid.clone()
    }

    fn field_column_annotation(&self, _: &str, field: &str) -> Option<ColumnAnnotation> {
        self.calls.set(self.calls.get() + 1);
        self.columns.get(field).cloned()
    }
}
