use crate::{
    ACTION_COLUMN_KEY,
    label::derive_label,
    model::column::{ColumnDescriptor, ColumnSet},
    provider::MetadataProvider,
};
use tracing::trace;

///
/// ReflectionDiscovery
///
/// Derives columns from persistence metadata alone. Without annotations
/// there is nothing to set options or searchability from, so every column
/// is a plain data column.
///

pub struct ReflectionDiscovery<'a, M: ?Sized> {
    metadata: &'a M,
}

impl<'a, M: MetadataProvider + ?Sized> ReflectionDiscovery<'a, M> {
    pub const fn new(metadata: &'a M) -> Self {
        Self { metadata }
    }

    #[must_use]
    pub fn discover(&self, entity: &str) -> ColumnSet {
        let identifier = self.metadata.identifier(entity);
        let mut columns = ColumnSet::new();

        for field in self.metadata.field_names(entity) {
            if field == ACTION_COLUMN_KEY {
                trace!(entity, field = %field, "skipping field with reserved column key");
                continue;
            }

            // generated identifiers carry nothing worth displaying
            if identifier.as_deref() == Some(field.as_str())
                && self.metadata.identifier_strategy(entity).is_auto()
            {
                trace!(entity, field = %field, "skipping auto-generated identifier");
                continue;
            }

            let label = self
                .metadata
                .field_label_option(entity, &field)
                .unwrap_or_else(|| derive_label(&field));

            columns.insert(ColumnDescriptor::data(field, label));
        }

        columns
    }
}
