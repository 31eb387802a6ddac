use crate::prelude::*;

///
/// EntityNode
///

#[derive(Clone, Debug, Serialize)]
pub struct EntityNode {
    pub def: Def,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,

    pub fields: &'static [FieldNode],

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridNode>,
}

impl EntityNode {
    #[must_use]
    pub fn get_field(&self, ident: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.ident == ident)
    }

    /// Fields backed by storage, in declaration order.
    pub fn persisted_fields(&self) -> impl Iterator<Item = &FieldNode> {
        self.fields.iter().filter(|f| f.persisted)
    }

    #[must_use]
    pub fn get_pk_field(&self) -> Option<&FieldNode> {
        self.get_field(self.primary_key.as_ref()?.field)
    }
}

///
/// PrimaryKey
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PrimaryKey {
    pub field: &'static str,

    pub source: PrimaryKeySource,
}

///
/// PrimaryKeySource
///
/// Declares where primary-key values originate.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum PrimaryKeySource {
    /// Generated by the store.
    #[default]
    Internal,

    /// Assigned by the application.
    External,
}

impl From<PrimaryKeySource> for IdentifierStrategy {
    fn from(source: PrimaryKeySource) -> Self {
        match source {
            PrimaryKeySource::Internal => Self::Auto,
            PrimaryKeySource::External => Self::Manual,
        }
    }
}
