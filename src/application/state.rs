// src/application/state.rs
use crate::application::Operation;
use crate::domain::{checklist, Folder, FolderId, HeaderStyle, Note, NoteId, NoteSummary, SearchHit, Template, Theme};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A class of request whose latest response wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Folders,
    NoteList,
    NoteFetch,
}

/// Issued when a request starts; its response is applied only while the
/// ticket is still the newest one for the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub slot: Slot,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Generations {
    folders: u64,
    note_list: u64,
    note_fetch: u64,
}

impl Generations {
    fn counter(&mut self, slot: Slot) -> &mut u64 {
        match slot {
            Slot::Folders => &mut self.folders,
            Slot::NoteList => &mut self.note_list,
            Slot::NoteFetch => &mut self.note_fetch,
        }
    }

    fn current(&self, slot: Slot) -> u64 {
        match slot {
            Slot::Folders => self.folders,
            Slot::NoteList => self.note_list,
            Slot::NoteFetch => self.note_fetch,
        }
    }
}

/// What the note list currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListView {
    #[default]
    Folder,
    Search { query: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiToggles {
    pub handwriting: bool,
    pub header_style: HeaderStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedOperation {
    pub operation: Operation,
    pub message: String,
}

/// Every change to the view state is one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ThemeChosen(Theme),
    HandwritingSet(bool),
    HeaderStyleChosen(HeaderStyle),
    FoldersLoaded { ticket: Ticket, folders: Vec<Folder> },
    FolderSelected(Option<FolderId>),
    NotesLoaded { ticket: Ticket, notes: Vec<NoteSummary> },
    SearchResultsLoaded { ticket: Ticket, query: String, hits: Vec<SearchHit> },
    NoteSelected(NoteId),
    NoteLoaded { ticket: Ticket, note: Note },
    TitleEdited(String),
    ContentEdited(String),
    ContentAppended(String),
    TemplateApplied(Template),
    ChecklistToggled,
    SelectionCleared,
    OperationFailed { operation: Operation, message: String },
    /// A remote call succeeded.
    ErrorCleared,
}

/// Client-side view of the diary: selections, lists and the editor buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub theme: Theme,
    pub folders: Vec<Folder>,
    pub selected_folder: Option<FolderId>,
    pub notes: Vec<NoteSummary>,
    pub list_view: ListView,
    pub selected_note: Option<NoteId>,
    /// Unsaved working copy of the selected note.
    pub buffer: Option<Note>,
    pub toggles: UiToggles,
    pub last_error: Option<FailedOperation>,
    generations: Generations,
}

impl ViewState {
    pub fn new(theme: Theme, toggles: UiToggles) -> Self {
        Self {
            theme,
            toggles,
            ..Self::default()
        }
    }

    /// Start a request for `slot`, superseding any request still in flight.
    pub fn begin(&mut self, slot: Slot) -> Ticket {
        let counter = self.generations.counter(slot);
        *counter += 1;
        trace!(?slot, generation = *counter, "Request started");
        Ticket {
            slot,
            generation: *counter,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generations.current(ticket.slot) == ticket.generation
    }

    /// Apply an event. Returns false when the event was dropped as stale or
    /// had nothing to act on.
    pub fn dispatch(&mut self, event: Event) -> bool {
        trace!(?event, "Dispatching");
        match event {
            Event::ThemeChosen(theme) => self.theme = theme,
            Event::HandwritingSet(on) => self.toggles.handwriting = on,
            Event::HeaderStyleChosen(style) => self.toggles.header_style = style,
            Event::FoldersLoaded { ticket, folders } => {
                if !self.accept(ticket) {
                    return false;
                }
                self.folders = folders;
                self.last_error = None;
            }
            Event::FolderSelected(folder) => self.selected_folder = folder,
            Event::NotesLoaded { ticket, notes } => {
                if !self.accept(ticket) {
                    return false;
                }
                self.notes = notes;
                self.list_view = ListView::Folder;
                self.last_error = None;
            }
            Event::SearchResultsLoaded { ticket, query, hits } => {
                if !self.accept(ticket) {
                    return false;
                }
                self.notes = hits.into_iter().map(NoteSummary::from).collect();
                self.list_view = ListView::Search { query };
                self.last_error = None;
            }
            Event::NoteSelected(id) => {
                self.buffer = None;
                self.selected_note = Some(id);
            }
            Event::NoteLoaded { ticket, note } => {
                if !self.accept(ticket) {
                    return false;
                }
                if self.selected_note.as_deref() != Some(note.id.as_str()) {
                    debug!(note_id = %note.id, "Dropping note that is no longer selected");
                    return false;
                }
                self.buffer = Some(note);
                self.last_error = None;
            }
            Event::TitleEdited(title) => return self.edit(|note| note.title = title),
            Event::ContentEdited(content) => return self.edit(|note| note.content = content),
            Event::ContentAppended(extra) => return self.edit(|note| note.content.push_str(&extra)),
            Event::TemplateApplied(template) => {
                return self.edit(|note| note.content = template.text().to_string())
            }
            Event::ChecklistToggled => {
                return self.edit(|note| note.content = checklist::toggle(&note.content))
            }
            Event::SelectionCleared => {
                self.selected_note = None;
                self.buffer = None;
            }
            Event::OperationFailed { operation, message } => {
                self.last_error = Some(FailedOperation { operation, message });
            }
            Event::ErrorCleared => self.last_error = None,
        }
        true
    }

    fn accept(&self, ticket: Ticket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!(?ticket, "Dropping stale response");
        }
        current
    }

    fn edit(&mut self, f: impl FnOnce(&mut Note)) -> bool {
        match self.buffer.as_mut() {
            Some(note) => {
                f(note);
                true
            }
            None => false,
        }
    }
}
