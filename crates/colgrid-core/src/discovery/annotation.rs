use crate::{
    ACTION_COLUMN_KEY,
    label::derive_label,
    model::column::{ActionDescriptor, ColumnDescriptor, ColumnOptions, ColumnSet},
    provider::{AnnotationSource, MetadataProvider},
};
use std::path::Path;
use tracing::trace;

///
/// AnnotationDiscovery
///
/// Derives columns from per-field column annotations plus an optional
/// class-level grouping annotation. Only applicable when an annotation
/// source *and* a cache root are configured, since its answer is always
/// persisted to the compiled cache.
///

pub struct AnnotationDiscovery<'a, M: ?Sized, A: ?Sized> {
    metadata: &'a M,
    annotations: &'a A,
}

impl<'a, M, A> AnnotationDiscovery<'a, M, A>
where
    M: MetadataProvider + ?Sized,
    A: AnnotationSource + ?Sized,
{
    pub const fn new(metadata: &'a M, annotations: &'a A) -> Self {
        Self {
            metadata,
            annotations,
        }
    }

    /// Build the strategy if it is applicable, `None` otherwise.
    pub const fn applicable(
        metadata: &'a M,
        annotations: Option<&'a A>,
        cache_root: Option<&Path>,
    ) -> Option<Self> {
        match (annotations, cache_root) {
            (Some(annotations), Some(_)) => Some(Self::new(metadata, annotations)),
            _ => None,
        }
    }

    /// Discover annotated columns.
    ///
    /// Returns `None` when the entity carries no column annotations and no
    /// grouping annotation, which callers must treat differently from an
    /// empty answer.
    #[must_use]
    pub fn discover(&self, entity: &str) -> Option<ColumnSet> {
        let handle = self.metadata.reflective_handle(entity);
        let grid = self.annotations.class_grouping_annotation(entity);

        let mut columns = ColumnSet::new();
        for field in handle.declared_fields {
            // the reserved key belongs to the action column
            if field == ACTION_COLUMN_KEY {
                trace!(entity, field = %field, "skipping field with reserved column key");
                continue;
            }

            let Some(annotation) = self.annotations.field_column_annotation(entity, &field) else {
                continue;
            };
            trace!(entity, field = %field, ?annotation, "column annotation");

            let label = annotation
                .label
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| derive_label(&field));
            let options = if annotation.sortable {
                ColumnOptions::sortable()
            } else {
                ColumnOptions::default()
            };

            columns.insert(
                ColumnDescriptor::data(field, label)
                    .with_options(options)
                    .with_searchable(annotation.searchable),
            );
        }

        // action column always renders last
        if let Some(grid) = &grid {
            let actions = grid
                .actions
                .iter()
                .map(|decl| ActionDescriptor::new(&decl.label, &decl.route, decl.kind.action_kind()))
                .collect();

            columns.insert(ColumnDescriptor::actions(actions));
        }

        if columns.is_empty() && grid.is_none() {
            None
        } else {
            Some(columns)
        }
    }
}
