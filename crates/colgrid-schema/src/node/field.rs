use crate::prelude::*;

///
/// FieldNode
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct FieldNode {
    pub ident: &'static str,

    /// Transient fields are declared on the type but never stored.
    pub persisted: bool,

    /// Mapping-level `label` option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnNode>,
}

impl FieldNode {
    #[must_use]
    pub const fn new(ident: &'static str) -> Self {
        Self {
            ident,
            persisted: true,
            label: None,
            column: None,
        }
    }

    #[must_use]
    pub const fn transient(mut self) -> Self {
        self.persisted = false;
        self
    }

    #[must_use]
    pub const fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub const fn column(mut self, column: ColumnNode) -> Self {
        self.column = Some(column);
        self
    }
}

///
/// ColumnNode
/// Grid column annotation on a field.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ColumnNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub sortable: bool,
    pub searchable: bool,
}

impl ColumnNode {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            label: None,
            sortable: false,
            searchable: false,
        }
    }

    #[must_use]
    pub const fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }
}

impl From<ColumnNode> for ColumnAnnotation {
    fn from(node: ColumnNode) -> Self {
        Self {
            label: node.label.map(ToString::to_string),
            sortable: node.sortable,
            searchable: node.searchable,
        }
    }
}
