//! # colgrid
//!
//! Column discovery for data grids over persisted entities.
//!
//! ## Crate layout
//! - `core`: column model, discovery, compiled cache, config and errors.
//! - `schema`: `'static` entity nodes and the registry that serves them.
//!
//! The `prelude` module covers grid-facing code; `design::prelude` covers
//! code that declares entity nodes.

pub use colgrid_core as core;
pub use colgrid_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::error::Error;

use crate::{
    core::{config::DiscoveryConfig, coordinator::ColumnDiscovery, source::EntityGridSource},
    schema::registry::SchemaRegistry,
};

/// Grid source over a registered entity, discovering from the registry's
/// nodes and caching per `config`.
#[must_use]
pub fn entity_grid<'a>(
    registry: &'a SchemaRegistry,
    entity: &str,
    config: DiscoveryConfig,
) -> EntityGridSource<&'a SchemaRegistry, &'a SchemaRegistry> {
    EntityGridSource::new(
        ColumnDiscovery::new(registry, entity)
            .with_annotations(registry)
            .with_config(config),
    )
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::prelude::*,
        entity_grid,
        schema::registry::SchemaRegistry,
    };
}

//
// Design Prelude
// For code that declares entity nodes.
//

pub mod design {
    pub mod prelude {
        pub use crate::schema::{
            def,
            node::{
                ActionNode, ActionNodeKind, ColumnNode, Def, EntityNode, FieldNode, GridNode,
                PrimaryKey, PrimaryKeySource,
            },
        };
    }
}
