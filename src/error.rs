//! Error surface for the debug-blocker core.

#[derive(Debug, thiserror::Error)]
pub enum DebugBlockerError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("unknown column: {column} not present in {table}")]
    UnknownColumn { table: String, column: String },

    #[error("correspondence list is empty after filtering: specify a correspondence or check column types")]
    EmptyCorrespondence,

    #[error("duplicate key in {table}: {key}")]
    DuplicateKey { table: String, key: String },

    #[error("schema mismatch: ltable has {left_cols} aligned columns, rtable has {right_cols}")]
    SchemaMismatch { left_cols: usize, right_cols: usize },

    #[error("unknown key in candidate set: {key} not present in {table}")]
    UnknownKey { table: String, key: String },
}

pub type Result<T> = std::result::Result<T, DebugBlockerError>;
