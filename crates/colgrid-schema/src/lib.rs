//! Schema-first metadata for column discovery.
//!
//! Entities are declared once as `'static` nodes and registered in a
//! [`SchemaRegistry`](registry::SchemaRegistry), which answers both the
//! persistence-metadata and the annotation questions discovery asks.
#![warn(unreachable_pub)]

pub mod error;
pub mod node;
pub mod registry;

///
/// Prelude
///

pub mod prelude {
    pub(crate) use colgrid_core::prelude::*;
    pub(crate) use serde::Serialize;

    pub use crate::{
        error::SchemaError,
        node::{
            ActionNode, ActionNodeKind, ColumnNode, Def, EntityNode, FieldNode, GridNode,
            PrimaryKey, PrimaryKeySource,
        },
        registry::SchemaRegistry,
    };
}
