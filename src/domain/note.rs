// src/domain/note.rs
use crate::constants::UNTITLED;
use crate::domain::FolderId;
use serde::{Deserialize, Serialize};

pub type NoteId = String;

/// A full note as returned by fetch-by-id; also the editor buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub folder_id: Option<FolderId>,
}

impl Note {
    pub fn display_title(&self) -> &str {
        display_title(&self.title)
    }
}

/// A row of the note list.
///
/// For search results `content` carries the snippet, not the note body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub folder_id: Option<FolderId>,
}

impl NoteSummary {
    pub fn display_title(&self) -> &str {
        display_title(&self.title)
    }
}

impl From<Note> for NoteSummary {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            folder_id: note.folder_id,
        }
    }
}

/// Payload for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub folder_id: Option<FolderId>,
}

impl NewNote {
    pub fn empty(folder_id: Option<FolderId>) -> Self {
        Self {
            title: UNTITLED.to_string(),
            content: String::new(),
            folder_id,
        }
    }
}

fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        UNTITLED
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_blank_title_when_displaying_then_shows_untitled() {
        let note = Note {
            id: "1".to_string(),
            title: "  ".to_string(),
            content: String::new(),
            folder_id: None,
        };
        assert_eq!(note.display_title(), "Untitled");
    }

    #[test]
    fn given_empty_draft_when_creating_then_uses_default_title() {
        let draft = NewNote::empty(Some("f1".to_string()));
        assert_eq!(draft.title, "Untitled");
        assert!(draft.content.is_empty());
        assert_eq!(draft.folder_id.as_deref(), Some("f1"));
    }
}
