// src/application/backend.rs
use crate::domain::{DomainError, Folder, FolderId, NewNote, Note, NoteId, NoteSummary, SearchHit, Tone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote note storage and AI service.
///
/// One method per endpoint. Calls are independent: no batching, retries or
/// cancellation.
pub trait DiaryBackend {
    fn list_folders(&mut self) -> Result<Vec<Folder>, DomainError>;

    /// Create a folder. Backends may answer with the folder, its id, or a bare ack.
    fn create_folder(&mut self, name: &str, icon: Option<&str>) -> Result<Option<FolderId>, DomainError>;

    /// List notes; `None` lists unfiled notes.
    fn list_notes(&mut self, folder: Option<&str>) -> Result<Vec<NoteSummary>, DomainError>;

    fn get_note(&mut self, id: &str) -> Result<Note, DomainError>;

    fn create_note(&mut self, note: &NewNote) -> Result<NoteId, DomainError>;

    fn update_note(&mut self, id: &str, title: &str, content: &str) -> Result<(), DomainError>;

    fn delete_note(&mut self, id: &str) -> Result<(), DomainError>;

    fn rewrite(&mut self, text: &str, tone: Tone) -> Result<String, DomainError>;

    fn ideas(&mut self, topic: &str) -> Result<Vec<String>, DomainError>;

    fn search(&mut self, query: &str, limit: usize) -> Result<Vec<SearchHit>, DomainError>;

    /// Render a note to PDF on the backend and return the document bytes.
    fn export_pdf(&mut self, id: &str, title: &str) -> Result<Vec<u8>, DomainError>;

    fn transcribe(&mut self, audio_url: &str) -> Result<String, DomainError>;
}

/// Names a remote operation, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListFolders,
    CreateFolder,
    ListNotes,
    GetNote,
    CreateNote,
    UpdateNote,
    DeleteNote,
    Rewrite,
    Ideas,
    Search,
    Export,
    Transcribe,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListFolders => "list folders",
            Operation::CreateFolder => "create folder",
            Operation::ListNotes => "list notes",
            Operation::GetNote => "load note",
            Operation::CreateNote => "create note",
            Operation::UpdateNote => "save note",
            Operation::DeleteNote => "delete note",
            Operation::Rewrite => "rewrite",
            Operation::Ideas => "generate ideas",
            Operation::Search => "search",
            Operation::Export => "export",
            Operation::Transcribe => "transcribe",
        };
        f.write_str(name)
    }
}
