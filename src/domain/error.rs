// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Backend unreachable: {0}")]
    Network(String),
    #[error("Backend returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Malformed backend response: {0}")]
    Parse(String),
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("No note is open")]
    NoNoteSelected,
    #[error("Create/select a folder first")]
    NoFolderSelected,
    #[error("Feature disabled: {0}")]
    FeatureDisabled(&'static str),
    #[error("Unknown {kind}: {value}")]
    InvalidChoice { kind: &'static str, value: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
