// src/domain/search.rs
use crate::domain::{NoteId, NoteSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub note_id: NoteId,
    pub title: String,
    pub snippet: String,
}

impl From<SearchHit> for NoteSummary {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.note_id,
            title: hit.title,
            content: hit.snippet,
            folder_id: None,
        }
    }
}
