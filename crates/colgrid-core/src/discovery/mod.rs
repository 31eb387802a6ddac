//! Column discovery strategies.
//!
//! Annotation discovery is preferred when it is applicable and yields an
//! answer; reflection discovery is the unconditional fallback. Orchestration
//! lives in `crate::coordinator`.

mod annotation;
mod reflection;

#[cfg(test)]
mod tests;

pub use annotation::AnnotationDiscovery;
pub use reflection::ReflectionDiscovery;
