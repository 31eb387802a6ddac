use derive_more::Display;
use std::{path::PathBuf, time::SystemTime};

///
/// EntityHandle
///
/// Reflective facts about an entity's defining type. The qualified name
/// and module path identify the compiled-cache artifact; the source
/// location and mtime drive debug-mode freshness checks.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityHandle {
    /// Fully-qualified type path, e.g. `app::model::User`.
    pub qualified_name: String,
    /// Module the type is declared in, e.g. `app::model`.
    pub module_path: String,
    pub source_location: Option<PathBuf>,
    pub source_mtime: Option<SystemTime>,
    /// The type's own field declarations, persisted or not, in order.
    pub declared_fields: Vec<String>,
}

impl EntityHandle {
    pub fn new(qualified_name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            module_path: module_path.into(),
            source_location: None,
            source_mtime: None,
            declared_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_source_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_location = Some(path.into());
        self
    }

    #[must_use]
    pub const fn with_source_mtime(mut self, mtime: SystemTime) -> Self {
        self.source_mtime = Some(mtime);
        self
    }

    #[must_use]
    pub fn with_declared_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Last-modified time of the defining source, preferring the provider's
    /// own answer and falling back to the filesystem.
    #[must_use]
    pub fn resolve_source_mtime(&self) -> Option<SystemTime> {
        if let Some(mtime) = self.source_mtime {
            return Some(mtime);
        }

        let path = self.source_location.as_ref()?;
        let meta = std::fs::metadata(path).ok()?;
        if !meta.is_file() {
            return None;
        }

        meta.modified().ok()
    }
}

///
/// IdentifierStrategy
/// How primary-key values are produced.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum IdentifierStrategy {
    #[display("auto")]
    Auto,
    #[display("manual")]
    Manual,
    #[default]
    #[display("unknown")]
    Unknown,
}

impl IdentifierStrategy {
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}
