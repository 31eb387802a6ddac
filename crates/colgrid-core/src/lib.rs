//! Column discovery for data grids: turn an entity type into an ordered list
//! of display columns, from declarative annotations when present and from
//! persistence metadata otherwise, with annotation results compiled into a
//! per-entity on-disk cache.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod discovery;
pub mod error;
pub mod label;
pub mod model;
pub mod provider;
pub mod source;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Reserved column key of the synthetic action column.
/// `$` cannot start a field identifier, so it never collides with a field.
pub const ACTION_COLUMN_KEY: &str = "$-action";

/// Header label of the synthetic action column.
pub const ACTION_COLUMN_LABEL: &str = "Actions";

/// Fixed subdirectory of the configured cache dir holding artifacts.
pub const CACHE_SUBDIR: &str = "colgrid";

/// File extension of compiled column artifacts.
pub const ARTIFACT_EXTENSION: &str = "cgc";

///
/// Prelude
///
/// Domain vocabulary plus the two collaborator traits.
///

pub mod prelude {
    pub use crate::{
        config::DiscoveryConfig,
        coordinator::ColumnDiscovery,
        error::Error,
        label::derive_label,
        model::{
            column::{
                ActionDescriptor, ActionKind, ColumnDescriptor, ColumnKind, ColumnOptions,
                ColumnSet,
            },
            entity::{EntityHandle, IdentifierStrategy},
        },
        provider::{
            ActionDeclaration, AnnotationSource, ColumnAnnotation, DeclaredAction, GridAnnotation,
            MetadataProvider, NoAnnotations,
        },
        source::{EntityGridSource, GridSource},
    };
}
