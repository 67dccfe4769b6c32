// src/domain/mod.rs
pub mod checklist;
pub mod error;
pub mod folder;
pub mod note;
pub mod search;
pub mod template;
pub mod theme;
pub mod tone;

pub use error::DomainError;
pub use folder::{Folder, FolderId};
pub use note::{NewNote, Note, NoteId, NoteSummary};
pub use search::SearchHit;
pub use template::Template;
pub use theme::{HeaderStyle, Theme, ThemeProfile};
pub use tone::Tone;
