use crate::{
    cache::{CacheArtifact, CompiledCacheStore, LoadOutcome},
    config::DiscoveryConfig,
    discovery::{AnnotationDiscovery, ReflectionDiscovery},
    error::Error,
    model::column::ColumnSet,
    provider::{AnnotationSource, MetadataProvider, NoAnnotations},
};
use std::{cell::OnceCell, path::PathBuf};
use tracing::debug;

///
/// DiscoveryState
/// Per-coordinator memoized state; nothing here is shared across instances.
///

#[derive(Debug, Default)]
pub struct DiscoveryState {
    pub annotation_cache_filename: Option<PathBuf>,
    pub memoized_columns: Option<ColumnSet>,
    id_column: OnceCell<Option<String>>,
}

///
/// ColumnDiscovery
///
/// Column discovery for one entity type.
///
/// Annotation discovery (read through the compiled cache) takes priority;
/// reflection discovery is the fallback. The first answer is memoized for
/// the lifetime of the instance, even in debug mode.
///

pub struct ColumnDiscovery<M, A = NoAnnotations> {
    entity: String,
    metadata: M,
    annotations: Option<A>,
    config: DiscoveryConfig,
    store: Option<CompiledCacheStore>,
    state: DiscoveryState,
}

impl<M: MetadataProvider> ColumnDiscovery<M, NoAnnotations> {
    /// Reflection-only discovery until annotations and a cache dir are set.
    pub fn new(metadata: M, entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            metadata,
            annotations: None,
            config: DiscoveryConfig::default(),
            store: None,
            state: DiscoveryState::default(),
        }
    }
}

impl<M: MetadataProvider, A: AnnotationSource> ColumnDiscovery<M, A> {
    /// Attach an annotation source.
    #[must_use]
    pub fn with_annotations<B: AnnotationSource>(self, annotations: B) -> ColumnDiscovery<M, B> {
        ColumnDiscovery {
            entity: self.entity,
            metadata: self.metadata,
            annotations: Some(annotations),
            config: self.config,
            store: self.store,
            state: self.state,
        }
    }

    /// Apply a config, rebuilding the cache store from its `cache_dir`.
    #[must_use]
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.store = config.cache_dir.as_ref().map(CompiledCacheStore::new);
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_cache_dir(self, dir: impl Into<PathBuf>) -> Self {
        let config = self.config.clone().with_cache_dir(dir);
        self.with_config(config)
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Replace the cache store, keeping `cache_dir` in sync with its root.
    #[must_use]
    pub fn with_store(mut self, store: CompiledCacheStore) -> Self {
        self.config.cache_dir = store.root().parent().map(PathBuf::from);
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> &DiscoveryState {
        &self.state
    }

    #[must_use]
    pub const fn metadata(&self) -> &M {
        &self.metadata
    }

    /// Discover the entity's columns, memoizing the answer.
    pub fn autodiscover_columns(&mut self) -> Result<&ColumnSet, Error> {
        let columns = match self.state.memoized_columns.take() {
            Some(columns) => columns,
            None => match self.annotation_columns()? {
                Some(columns) => columns,
                None => {
                    debug!(entity = %self.entity, "falling back to reflection discovery");
                    ReflectionDiscovery::new(&self.metadata).discover(&self.entity)
                }
            },
        };

        Ok(self.state.memoized_columns.insert(columns))
    }

    /// True when the entity declares a non-empty identifier.
    #[must_use]
    pub fn has_id_column(&self) -> bool {
        self.id_column().is_some()
    }

    #[must_use]
    pub fn id_column(&self) -> Option<&str> {
        self.state
            .id_column
            .get_or_init(|| {
                self.metadata
                    .identifier(&self.entity)
                    .filter(|id| !id.is_empty())
            })
            .as_deref()
    }

    // Annotation columns read through the compiled cache.
    // `Ok(None)` means "no annotation answer": not applicable, or Absent.
    fn annotation_columns(&mut self) -> Result<Option<ColumnSet>, Error> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let Some(discovery) = AnnotationDiscovery::applicable(
            &self.metadata,
            self.annotations.as_ref(),
            Some(store.root()),
        ) else {
            return Ok(None);
        };

        let handle = self.metadata.reflective_handle(&self.entity);
        let path = match &self.state.annotation_cache_filename {
            Some(path) => path.clone(),
            None => {
                let path = store.artifact_path(&handle)?;
                self.state.annotation_cache_filename = Some(path.clone());
                path
            }
        };

        let artifact = match store.load(&path, &handle, self.config.debug)? {
            LoadOutcome::Hit(artifact) => {
                debug!(entity = %self.entity, path = %path.display(), "compiled columns hit");
                artifact
            }
            outcome => {
                debug!(
                    entity = %self.entity,
                    path = %path.display(),
                    ?outcome,
                    "regenerating compiled columns"
                );
                let artifact = CacheArtifact::from(discovery.discover(&self.entity));
                store.save(&path, &handle, &artifact)?;
                artifact
            }
        };

        Ok(artifact.into_columns())
    }
}
