// src/application/session.rs
use crate::application::state::{Event, Slot, UiToggles, ViewState};
use crate::application::{DiaryBackend, Operation};
use crate::constants::{DEFAULT_FOLDER_ICON, DEFAULT_SEARCH_LIMIT};
use crate::domain::{DomainError, FolderId, HeaderStyle, NewNote, Note, NoteId, Template, Theme, Tone};
use crate::util::text::export_file_name;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Optional behaviours, each switchable from the `[features]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub checklist: bool,
    pub ideas: bool,
    pub export: bool,
    pub transcribe: bool,
    /// Refuse to create a template note unless a folder is selected.
    pub require_folder_for_templates: bool,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            checklist: true,
            ideas: true,
            export: true,
            transcribe: true,
            require_folder_for_templates: true,
        }
    }
}

/// A PDF produced by the backend, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Use cases of the diary client, driving a [`ViewState`] against a backend.
///
/// Every remote response goes through the state dispatcher; failures are
/// recorded in `state.last_error` before being returned.
pub struct DiarySession<B: DiaryBackend> {
    backend: B,
    state: ViewState,
    features: FeatureSet,
    search_limit: usize,
}

impl<B: DiaryBackend> DiarySession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: ViewState::default(),
            features: FeatureSet::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_ui(mut self, theme: Theme, toggles: UiToggles) -> Self {
        self.state = ViewState::new(theme, toggles);
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn features(&self) -> FeatureSet {
        self.features
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn buffer(&self) -> Option<&Note> {
        self.state.buffer.as_ref()
    }

    /// Initial load: folders and the unscoped note list.
    pub fn load(&mut self) -> Result<(), DomainError> {
        self.refresh_folders()?;
        self.refresh_notes()
    }

    pub fn refresh_folders(&mut self) -> Result<(), DomainError> {
        let ticket = self.state.begin(Slot::Folders);
        let result = self.backend.list_folders();
        let folders = self.track(Operation::ListFolders, result)?;
        self.state.dispatch(Event::FoldersLoaded { ticket, folders });
        Ok(())
    }

    /// Reload the list for the selected folder, leaving any search view.
    pub fn refresh_notes(&mut self) -> Result<(), DomainError> {
        let ticket = self.state.begin(Slot::NoteList);
        let folder = self.state.selected_folder.clone();
        let result = self.backend.list_notes(folder.as_deref());
        let notes = self.track(Operation::ListNotes, result)?;
        debug!(count = notes.len(), ?folder, "Notes loaded");
        self.state.dispatch(Event::NotesLoaded { ticket, notes });
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn create_folder(&mut self, name: &str, icon: Option<&str>) -> Result<Option<FolderId>, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("folder name is empty".to_string()));
        }
        let icon = icon.unwrap_or(DEFAULT_FOLDER_ICON);
        let result = self.backend.create_folder(name, Some(icon));
        let id = self.track(Operation::CreateFolder, result)?;
        info!(name, ?id, "Created folder");
        self.settle(Self::refresh_folders);
        Ok(id)
    }

    /// Scope the note list to `folder` (`None` for unfiled notes).
    pub fn select_folder(&mut self, folder: Option<FolderId>) -> Result<(), DomainError> {
        self.state.dispatch(Event::FolderSelected(folder));
        self.refresh_notes()
    }

    /// Open a note into a fresh buffer, discarding the current one.
    #[instrument(level = "debug", skip(self))]
    pub fn open_note(&mut self, id: &str) -> Result<&Note, DomainError> {
        self.state.dispatch(Event::NoteSelected(id.to_string()));
        let ticket = self.state.begin(Slot::NoteFetch);
        let result = self.backend.get_note(id);
        let note = self.track(Operation::GetNote, result)?;
        if note.id != id {
            // Servers may normalise ids, e.g. `07` comes back as `7`
            debug!(requested = id, returned = %note.id, "Following the returned note id");
            self.state.dispatch(Event::NoteSelected(note.id.clone()));
        }
        self.state.dispatch(Event::NoteLoaded { ticket, note });
        self.state.buffer.as_ref().ok_or(DomainError::NoNoteSelected)
    }

    /// Create a note in the selected folder, optionally from a template, and open it.
    ///
    /// Once the backend has created the note this returns its id; a failed
    /// open or list reload only shows up in `state.last_error`.
    #[instrument(level = "debug", skip(self))]
    pub fn new_note(&mut self, template: Option<Template>) -> Result<NoteId, DomainError> {
        let folder = self.state.selected_folder.clone();
        let draft = match template {
            Some(t) => NewNote {
                title: t.title().to_string(),
                content: t.text().to_string(),
                folder_id: folder,
            },
            None => NewNote::empty(folder),
        };
        let result = self.backend.create_note(&draft);
        let id = self.track(Operation::CreateNote, result)?;
        info!(note_id = %id, "Created note");
        if let Err(err) = self.open_note(&id) {
            debug!(note_id = %id, error = %err, "Created note could not be opened");
        }
        self.settle(Self::refresh_notes);
        Ok(id)
    }

    pub fn edit_title(&mut self, title: impl Into<String>) -> Result<(), DomainError> {
        self.apply_to_buffer(Event::TitleEdited(title.into()))
    }

    pub fn edit_content(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.apply_to_buffer(Event::ContentEdited(content.into()))
    }

    pub fn append_content(&mut self, extra: impl Into<String>) -> Result<(), DomainError> {
        self.apply_to_buffer(Event::ContentAppended(extra.into()))
    }

    /// Push the buffer's title and content, then reload the list.
    #[instrument(level = "debug", skip(self))]
    pub fn save(&mut self) -> Result<(), DomainError> {
        let note = self.state.buffer.clone().ok_or(DomainError::NoNoteSelected)?;
        let result = self.backend.update_note(&note.id, &note.title, &note.content);
        self.track(Operation::UpdateNote, result)?;
        info!(note_id = %note.id, "Saved note");
        self.settle(Self::refresh_notes);
        Ok(())
    }

    /// Delete the open note once `confirm` agrees. Returns whether it was deleted.
    #[instrument(level = "debug", skip(self, confirm))]
    pub fn delete(&mut self, confirm: impl FnOnce(&Note) -> bool) -> Result<bool, DomainError> {
        let note = self.state.buffer.as_ref().ok_or(DomainError::NoNoteSelected)?;
        if !confirm(note) {
            debug!(note_id = %note.id, "Delete cancelled");
            return Ok(false);
        }
        let id = note.id.clone();
        let result = self.backend.delete_note(&id);
        self.track(Operation::DeleteNote, result)?;
        info!(note_id = %id, "Deleted note");
        self.state.dispatch(Event::SelectionCleared);
        self.settle(Self::refresh_notes);
        Ok(true)
    }

    /// Overwrite the open note with a template, or start a new note from it.
    pub fn apply_template(&mut self, template: Template) -> Result<(), DomainError> {
        if self.state.buffer.is_some() {
            self.state.dispatch(Event::TemplateApplied(template));
            return Ok(());
        }
        if self.features.require_folder_for_templates && self.state.selected_folder.is_none() {
            let err = DomainError::NoFolderSelected;
            self.record(Operation::CreateNote, &err);
            return Err(err);
        }
        self.new_note(Some(template)).map(|_| ())
    }

    pub fn toggle_checklist(&mut self) -> Result<(), DomainError> {
        self.require(self.features.checklist, "checklist")?;
        self.apply_to_buffer(Event::ChecklistToggled)
    }

    /// Replace the buffer content with an AI rewrite in `tone`.
    #[instrument(level = "debug", skip(self))]
    pub fn rewrite(&mut self, tone: Tone) -> Result<(), DomainError> {
        let text = self
            .state
            .buffer
            .as_ref()
            .map(|n| n.content.clone())
            .ok_or(DomainError::NoNoteSelected)?;
        let result = self.backend.rewrite(&text, tone);
        let rewritten = self.track(Operation::Rewrite, result)?;
        self.state.dispatch(Event::ContentEdited(rewritten));
        Ok(())
    }

    /// Ask for ideas on `topic`; appended as bullets when a note is open.
    #[instrument(level = "debug", skip(self))]
    pub fn ideas(&mut self, topic: &str) -> Result<Vec<String>, DomainError> {
        self.require(self.features.ideas, "ideas")?;
        let result = self.backend.ideas(topic);
        let ideas = self.track(Operation::Ideas, result)?;
        if self.state.buffer.is_some() {
            let bullets: Vec<String> = ideas.iter().map(|i| format!("• {i}")).collect();
            self.state
                .dispatch(Event::ContentAppended(format!("\n\n{}", bullets.join("\n"))));
        }
        Ok(ideas)
    }

    /// Semantic search. An empty query restores the folder list.
    #[instrument(level = "debug", skip(self))]
    pub fn search(&mut self, query: &str) -> Result<(), DomainError> {
        if query.is_empty() {
            return self.refresh_notes();
        }
        let ticket = self.state.begin(Slot::NoteList);
        let result = self.backend.search(query, self.search_limit);
        let hits = self.track(Operation::Search, result)?;
        debug!(count = hits.len(), "Search results");
        self.state.dispatch(Event::SearchResultsLoaded {
            ticket,
            query: query.to_string(),
            hits,
        });
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn export(&mut self) -> Result<ExportedDocument, DomainError> {
        self.require(self.features.export, "export")?;
        let note = self.state.buffer.clone().ok_or(DomainError::NoNoteSelected)?;
        let result = self.backend.export_pdf(&note.id, &note.title);
        let bytes = self.track(Operation::Export, result)?;
        info!(note_id = %note.id, size = bytes.len(), "Exported note");
        Ok(ExportedDocument {
            file_name: export_file_name(&note.title),
            bytes,
        })
    }

    /// Transcribe audio at `audio_url`; appended when a note is open.
    #[instrument(level = "debug", skip(self))]
    pub fn transcribe(&mut self, audio_url: &str) -> Result<String, DomainError> {
        self.require(self.features.transcribe, "transcribe")?;
        let audio_url = audio_url.trim();
        if audio_url.is_empty() {
            return Err(DomainError::InvalidInput("audio URL is empty".to_string()));
        }
        let result = self.backend.transcribe(audio_url);
        let text = self.track(Operation::Transcribe, result)?;
        if self.state.buffer.is_some() {
            self.state.dispatch(Event::ContentAppended(format!("\n\n{text}")));
        }
        Ok(text)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.dispatch(Event::ThemeChosen(theme));
    }

    pub fn set_handwriting(&mut self, on: bool) {
        self.state.dispatch(Event::HandwritingSet(on));
    }

    pub fn set_header_style(&mut self, style: HeaderStyle) {
        self.state.dispatch(Event::HeaderStyleChosen(style));
    }

    fn apply_to_buffer(&mut self, event: Event) -> Result<(), DomainError> {
        if self.state.dispatch(event) {
            Ok(())
        } else {
            Err(DomainError::NoNoteSelected)
        }
    }

    fn require(&self, enabled: bool, feature: &'static str) -> Result<(), DomainError> {
        if enabled {
            Ok(())
        } else {
            Err(DomainError::FeatureDisabled(feature))
        }
    }

    /// Reload after a mutation that already went through. A failed reload is
    /// left in `state.last_error` and does not fail the mutation.
    fn settle(&mut self, reload: fn(&mut Self) -> Result<(), DomainError>) {
        if let Err(err) = reload(self) {
            debug!(error = %err, "Reload after change failed");
        }
    }

    fn track<T>(&mut self, operation: Operation, result: Result<T, DomainError>) -> Result<T, DomainError> {
        match result {
            Ok(value) => {
                self.state.dispatch(Event::ErrorCleared);
                Ok(value)
            }
            Err(err) => {
                self.record(operation, &err);
                Err(err)
            }
        }
    }

    fn record(&mut self, operation: Operation, err: &DomainError) {
        warn!(%operation, error = %err, "Operation failed");
        self.state.dispatch(Event::OperationFailed {
            operation,
            message: err.to_string(),
        });
    }
}
