//! Collaborator contracts consumed by discovery.
//!
//! Both traits take the entity path as a plain `&str` so one provider can
//! serve every entity in an application. Neither is fallible: an unknown
//! entity or field simply has no metadata.

use crate::model::{
    column::ActionKind,
    entity::{EntityHandle, IdentifierStrategy},
};

///
/// MetadataProvider
/// Generic persistence metadata for entity types.
///

pub trait MetadataProvider {
    /// Persisted field keys in provider-defined order.
    fn field_names(&self, entity: &str) -> Vec<String>;

    /// First identifier field, if the entity has one.
    fn identifier(&self, entity: &str) -> Option<String>;

    fn identifier_strategy(&self, entity: &str) -> IdentifierStrategy;

    /// Field-level `label` option, if one was mapped.
    fn field_label_option(&self, entity: &str, field: &str) -> Option<String>;

    fn reflective_handle(&self, entity: &str) -> EntityHandle;
}

impl<T: MetadataProvider + ?Sized> MetadataProvider for &T {
    fn field_names(&self, entity: &str) -> Vec<String> {
        (**self).field_names(entity)
    }

    fn identifier(&self, entity: &str) -> Option<String> {
        (**self).identifier(entity)
    }

    fn identifier_strategy(&self, entity: &str) -> IdentifierStrategy {
        (**self).identifier_strategy(entity)
    }

    fn field_label_option(&self, entity: &str, field: &str) -> Option<String> {
        (**self).field_label_option(entity, field)
    }

    fn reflective_handle(&self, entity: &str) -> EntityHandle {
        (**self).reflective_handle(entity)
    }
}

///
/// AnnotationSource
/// Declarative grid annotations attached to entity types and fields.
///

pub trait AnnotationSource {
    fn class_grouping_annotation(&self, entity: &str) -> Option<GridAnnotation>;

    fn field_column_annotation(&self, entity: &str, field: &str) -> Option<ColumnAnnotation>;
}

impl<T: AnnotationSource + ?Sized> AnnotationSource for &T {
    fn class_grouping_annotation(&self, entity: &str) -> Option<GridAnnotation> {
        (**self).class_grouping_annotation(entity)
    }

    fn field_column_annotation(&self, entity: &str, field: &str) -> Option<ColumnAnnotation> {
        (**self).field_column_annotation(entity, field)
    }
}

///
/// NoAnnotations
/// Placeholder source type for coordinators built without annotations.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnnotations;

impl AnnotationSource for NoAnnotations {
    fn class_grouping_annotation(&self, _: &str) -> Option<GridAnnotation> {
        None
    }

    fn field_column_annotation(&self, _: &str, _: &str) -> Option<ColumnAnnotation> {
        None
    }
}

///
/// GridAnnotation
/// Class-level grouping annotation.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GridAnnotation {
    pub actions: Vec<ActionDeclaration>,
}

///
/// ActionDeclaration
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionDeclaration {
    pub label: String,
    pub route: String,
    pub kind: DeclaredAction,
}

impl ActionDeclaration {
    pub fn new(label: impl Into<String>, route: impl Into<String>, kind: DeclaredAction) -> Self {
        Self {
            label: label.into(),
            route: route.into(),
            kind,
        }
    }
}

///
/// DeclaredAction
///
/// Concrete declaration kind. Anything other than show/delete keeps its
/// name but renders as a generic action.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeclaredAction {
    Show,
    Delete,
    Custom(String),
}

impl DeclaredAction {
    #[must_use]
    pub const fn action_kind(&self) -> ActionKind {
        match self {
            Self::Show => ActionKind::Show,
            Self::Delete => ActionKind::Delete,
            Self::Custom(_) => ActionKind::Other,
        }
    }
}

///
/// ColumnAnnotation
/// Per-field column annotation.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColumnAnnotation {
    pub label: Option<String>,
    pub sortable: bool,
    pub searchable: bool,
}
