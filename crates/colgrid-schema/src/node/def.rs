use crate::prelude::*;

///
/// Def
///
/// Where a node was declared. Normally built with [`def!`](crate::def),
/// which captures `module_path!()` and `file!()` at the declaration site.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Def {
    pub module_path: &'static str,
    pub ident: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<&'static str>,
}

impl Def {
    #[must_use]
    pub const fn new(module_path: &'static str, ident: &'static str) -> Self {
        Self {
            module_path,
            ident,
            source_file: None,
        }
    }

    #[must_use]
    pub const fn with_source_file(mut self, file: &'static str) -> Self {
        self.source_file = Some(file);
        self
    }

    /// Fully-qualified path, e.g. `app::model::User`.
    #[must_use]
    pub fn path(&self) -> String {
        if self.module_path.is_empty() {
            self.ident.to_string()
        } else {
            format!("{}::{}", self.module_path, self.ident)
        }
    }
}

/// Build a [`Def`] for an identifier declared in the current module.
#[macro_export]
macro_rules! def {
    ($ident:ident) => {
        $crate::node::Def::new(::core::module_path!(), ::core::stringify!($ident))
            .with_source_file(::core::file!())
    };
}
