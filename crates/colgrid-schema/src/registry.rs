use crate::prelude::*;
use colgrid_core::ACTION_COLUMN_KEY;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

///
/// SchemaRegistry
///
/// Registered entities keyed by fully-qualified path. Serves as both the
/// metadata provider and the annotation source for discovery; entities it
/// does not know have no fields and no annotations.
///
/// `source_root`, when set, is joined with each node's relative
/// `source_file` so debug-mode freshness checks can stat the file.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    entities: BTreeMap<String, &'static EntityNode>,
    source_root: Option<PathBuf>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn source_root(&self) -> Option<&Path> {
        self.source_root.as_deref()
    }

    /// Validate and register an entity node.
    pub fn register(&mut self, node: &'static EntityNode) -> Result<(), SchemaError> {
        let path = node.def.path();
        if self.entities.contains_key(&path) {
            return Err(SchemaError::DuplicateEntity(path));
        }

        validate_entity(&path, node)?;
        self.entities.insert(path, node);

        Ok(())
    }

    /// Register several nodes, stopping at the first rejection.
    pub fn register_all<I>(&mut self, nodes: I) -> Result<(), SchemaError>
    where
        I: IntoIterator<Item = &'static EntityNode>,
    {
        nodes.into_iter().try_for_each(|node| self.register(node))
    }

    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&'static EntityNode> {
        self.entities.get(entity).copied()
    }

    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = (&str, &'static EntityNode)> {
        self.entities.iter().map(|(path, node)| (path.as_str(), *node))
    }

    fn source_location(&self, file: &str) -> PathBuf {
        match &self.source_root {
            Some(root) => root.join(file),
            None => PathBuf::from(file),
        }
    }

    fn field(&self, entity: &str, field: &str) -> Option<&'static FieldNode> {
        self.get(entity)?.get_field(field)
    }
}

fn validate_entity(path: &str, node: &EntityNode) -> Result<(), SchemaError> {
    let mut seen = BTreeSet::new();

    for field in node.fields {
        if field.ident.is_empty() {
            return Err(SchemaError::EmptyField {
                entity: path.to_string(),
            });
        }
        if field.ident == ACTION_COLUMN_KEY {
            return Err(SchemaError::ReservedField {
                entity: path.to_string(),
                field: field.ident.to_string(),
            });
        }
        if !seen.insert(field.ident) {
            return Err(SchemaError::DuplicateField {
                entity: path.to_string(),
                field: field.ident.to_string(),
            });
        }
    }

    if let Some(pk) = &node.primary_key {
        match node.get_field(pk.field) {
            None => {
                return Err(SchemaError::PrimaryKeyNotFound {
                    entity: path.to_string(),
                    field: pk.field.to_string(),
                });
            }
            Some(field) if !field.persisted => {
                return Err(SchemaError::TransientPrimaryKey {
                    entity: path.to_string(),
                    field: pk.field.to_string(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

impl MetadataProvider for SchemaRegistry {
    fn field_names(&self, entity: &str) -> Vec<String> {
        self.get(entity)
            .map(|node| {
                node.persisted_fields()
                    .map(|f| f.ident.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn identifier(&self, entity: &str) -> Option<String> {
        let pk = self.get(entity)?.primary_key?;

        Some(pk.field.to_string())
    }

    fn identifier_strategy(&self, entity: &str) -> IdentifierStrategy {
        self.get(entity)
            .and_then(|node| node.primary_key)
            .map_or(IdentifierStrategy::Unknown, |pk| pk.source.into())
    }

    fn field_label_option(&self, entity: &str, field: &str) -> Option<String> {
        self.field(entity, field)?.label.map(ToString::to_string)
    }

    fn reflective_handle(&self, entity: &str) -> EntityHandle {
        let Some(node) = self.get(entity) else {
            let module_path = entity.rsplit_once("::").map_or("", |(module, _)| module);

            return EntityHandle::new(entity, module_path);
        };

        let mut handle = EntityHandle::new(entity, node.def.module_path)
            .with_declared_fields(node.fields.iter().map(|f| f.ident));
        if let Some(file) = node.def.source_file {
            handle = handle.with_source_location(self.source_location(file));
        }

        handle
    }
}

impl AnnotationSource for SchemaRegistry {
    fn class_grouping_annotation(&self, entity: &str) -> Option<GridAnnotation> {
        self.get(entity)?.grid.as_ref().map(GridAnnotation::from)
    }

    fn field_column_annotation(&self, entity: &str, field: &str) -> Option<ColumnAnnotation> {
        self.field(entity, field)?.column.map(ColumnAnnotation::from)
    }
}
