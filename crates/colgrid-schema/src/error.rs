use colgrid_core::error::Error;
use thiserror::Error as ThisError;

///
/// SchemaError
/// Rejected entity registrations.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("entity '{0}' is already registered")]
    DuplicateEntity(String),

    #[error("entity '{entity}' declares field '{field}' more than once")]
    DuplicateField { entity: String, field: String },

    #[error("entity '{entity}' has an empty field identifier")]
    EmptyField { entity: String },

    #[error("entity '{entity}' primary key '{field}' is not a declared field")]
    PrimaryKeyNotFound { entity: String, field: String },

    #[error("entity '{entity}' field '{field}' uses the reserved action column key")]
    ReservedField { entity: String, field: String },

    #[error("entity '{entity}' primary key '{field}' is not persisted")]
    TransientPrimaryKey { entity: String, field: String },
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Self::schema_invariant(err.to_string())
    }
}
