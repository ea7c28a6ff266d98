use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("invalid diagram {}: {}", .path.display(), .reason)]
    Ingestion { path: PathBuf, reason: String },

    #[error("diagram JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot render threat map: {0}")]
    Render(#[source] serde_json::Error),

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("edge '{edge}' references unknown {role} node '{node}'")]
    DanglingReference {
        edge: String,
        role: EdgeRole,
        node: String,
    },

    #[error("cannot write {}: {}", .path.display(), .source)]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which end of a flow a node reference fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRole {
    Source,
    Destination,
    Process,
}

impl std::fmt::Display for EdgeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EdgeRole::Source => "source",
            EdgeRole::Destination => "destination",
            EdgeRole::Process => "process",
        })
    }
}

impl MaterializeError {
    pub fn ingestion(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        MaterializeError::Ingestion {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Pipeline stage that produced the error, for user-facing messages.
    pub fn stage(&self) -> &'static str {
        match self {
            MaterializeError::Ingestion { .. }
            | MaterializeError::Json(_)
            | MaterializeError::DuplicateId { .. } => "ingestion",
            MaterializeError::DanglingReference { .. } => "classification",
            MaterializeError::Output { .. } | MaterializeError::Render(_) => "output",
        }
    }
}

pub type Result<T> = std::result::Result<T, MaterializeError>;
