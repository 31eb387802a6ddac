//! Display-side data model.
//!
//! - `column` defines what a grid renders: descriptors, actions and the
//!   ordered, key-unique [`column::ColumnSet`].
//! - `entity` defines what discovery reads about an entity type.
pub mod column;
pub mod entity;
