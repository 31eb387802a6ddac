use crate::{
    coordinator::ColumnDiscovery,
    error::Error,
    model::column::ColumnSet,
    provider::{AnnotationSource, MetadataProvider, NoAnnotations},
};

///
/// GridSource
///
/// What a renderer needs from a source: the active columns and whether
/// rows can be addressed by id.
///

pub trait GridSource {
    fn columns(&self) -> &ColumnSet;

    fn set_columns(&mut self, columns: ColumnSet);

    fn has_id_column(&self) -> bool;
}

///
/// EntityGridSource
///
/// Grid source over one persisted entity type. Discovery is composed in,
/// not inherited; the active column list starts empty until columns are
/// discovered or set explicitly.
///

pub struct EntityGridSource<M, A = NoAnnotations> {
    discovery: ColumnDiscovery<M, A>,
    columns: ColumnSet,
}

impl<M: MetadataProvider, A: AnnotationSource> EntityGridSource<M, A> {
    pub fn new(discovery: ColumnDiscovery<M, A>) -> Self {
        Self {
            discovery,
            columns: ColumnSet::new(),
        }
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        self.discovery.entity()
    }

    #[must_use]
    pub const fn discovery(&self) -> &ColumnDiscovery<M, A> {
        &self.discovery
    }

    /// Discover columns and make them the active column list.
    pub fn autodiscover_columns(&mut self) -> Result<&ColumnSet, Error> {
        let columns = self.discovery.autodiscover_columns()?.clone();
        self.set_columns(columns);

        Ok(&self.columns)
    }
}

impl<M: MetadataProvider, A: AnnotationSource> GridSource for EntityGridSource<M, A> {
    fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    fn set_columns(&mut self, columns: ColumnSet) {
        self.columns = columns;
    }

    fn has_id_column(&self) -> bool {
        self.discovery.has_id_column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::column::ColumnDescriptor,
        test_fixtures::{FakeMetadata, USER},
    };

    #[test]
    fn autodiscovery_sets_active_columns() {
        let mut source = EntityGridSource::new(ColumnDiscovery::new(FakeMetadata::user(), USER));
        assert!(source.columns().is_empty());

        source.autodiscover_columns().unwrap();

        assert_eq!(source.entity(), USER);
        assert_eq!(source.columns().keys().collect::<Vec<_>>(), ["name", "email"]);
        assert!(source.has_id_column());
    }

    #[test]
    fn manual_columns_replace_the_active_list() {
        let mut source = EntityGridSource::new(ColumnDiscovery::new(FakeMetadata::user(), USER));
        source.autodiscover_columns().unwrap();

        source.set_columns([ColumnDescriptor::data("email", "Mail")].into_iter().collect());

        assert_eq!(source.columns().len(), 1);
        // discovery keeps its own memoized answer
        assert_eq!(
            source.discovery().state().memoized_columns.as_ref().map(|c| c.len()),
            Some(2)
        );
    }
}
