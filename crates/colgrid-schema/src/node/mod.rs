mod def;
mod entity;
mod field;
mod grid;

pub use def::*;
pub use entity::*;
pub use field::*;
pub use grid::*;
