use thiserror::Error;

/// Structural failures that abort the whole transform.
///
/// Per-row defects are never reported here; they are tallied as
/// [`fleximart_model::RejectReason`]s.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{source_name} source is missing required column(s): {}", .columns.join(", "))]
    MissingColumns {
        source_name: &'static str,
        columns: Vec<String>,
    },

    #[error("failed to serialize clean records: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TransformError>;
