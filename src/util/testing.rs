// src/util/testing.rs

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{DiaryBackend, Operation};
use crate::domain::{DomainError, Folder, FolderId, NewNote, Note, NoteId, NoteSummary, SearchHit, Tone};
use crate::util::text::preview;

/// Build a note for fixtures.
pub fn sample_note(id: &str, title: &str, content: &str, folder: Option<&str>) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        folder_id: folder.map(str::to_string),
    }
}

/// In-memory backend for testing use cases that depend on DiaryBackend
///
/// Behaves like a small, well-mannered server: folders and notes live in
/// insertion order, list calls filter by folder, rewrites tag the text with
/// the tone. Every call is recorded so tests can assert on traffic.
///
/// # Examples
///
/// ```
/// use dear_diary::application::Operation;
/// use dear_diary::util::testing::{sample_note, MockDiaryBackend};
///
/// let mock = MockDiaryBackend::builder()
///     .with_folder("f1", "School")
///     .with_note(sample_note("1", "Exam", "▢ Revise", Some("f1")))
///     .with_failure(Operation::Export)
///     .build();
/// assert!(mock.has_note("1"));
/// ```
pub struct MockDiaryBackend {
    folders: Vec<Folder>,
    notes: Vec<Note>,
    next_id: u64,
    next_folder_id: u64,
    aliases: HashMap<String, NoteId>,
    search_results: HashMap<String, Vec<SearchHit>>,
    ideas: Vec<String>,
    transcript: String,
    failures: HashSet<Operation>,
    calls: Vec<String>,
}

impl MockDiaryBackend {
    pub fn builder() -> MockDiaryBackendBuilder {
        MockDiaryBackendBuilder::new()
    }

    /// Calls received so far, e.g. `"get_note 1"` or `"list_notes -"`.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn has_note(&self, id: &str) -> bool {
        self.notes.iter().any(|n| n.id == id)
    }

    pub fn stored_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    fn check(&mut self, operation: Operation, call: String) -> Result<(), DomainError> {
        self.calls.push(call);
        if self.failures.contains(&operation) {
            return Err(DomainError::Server {
                status: 500,
                message: format!("injected {operation} failure"),
            });
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn allocate_folder_id(&mut self) -> FolderId {
        loop {
            self.next_folder_id += 1;
            let id = format!("f{}", self.next_folder_id);
            if !self.folders.iter().any(|f| f.id == id) {
                return id;
            }
        }
    }

    fn note_mut(&mut self, id: &str) -> Result<&mut Note, DomainError> {
        self.notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }
}

impl DiaryBackend for MockDiaryBackend {
    fn list_folders(&mut self) -> Result<Vec<Folder>, DomainError> {
        self.check(Operation::ListFolders, "list_folders".to_string())?;
        Ok(self.folders.clone())
    }

    fn create_folder(&mut self, name: &str, icon: Option<&str>) -> Result<Option<FolderId>, DomainError> {
        self.check(Operation::CreateFolder, format!("create_folder {name}"))?;
        let id = self.allocate_folder_id();
        self.folders.push(Folder {
            id: id.clone(),
            name: name.to_string(),
            icon: icon.map(str::to_string),
        });
        Ok(Some(id))
    }

    fn list_notes(&mut self, folder: Option<&str>) -> Result<Vec<NoteSummary>, DomainError> {
        self.check(Operation::ListNotes, format!("list_notes {}", folder.unwrap_or("-")))?;
        Ok(self
            .notes
            .iter()
            .filter(|n| n.folder_id.as_deref() == folder)
            .cloned()
            .map(NoteSummary::from)
            .collect())
    }

    fn get_note(&mut self, id: &str) -> Result<Note, DomainError> {
        self.check(Operation::GetNote, format!("get_note {id}"))?;
        let key = self.aliases.get(id).map(String::as_str).unwrap_or(id);
        self.notes
            .iter()
            .find(|n| n.id == key)
            .cloned()
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }

    fn create_note(&mut self, note: &NewNote) -> Result<NoteId, DomainError> {
        self.check(Operation::CreateNote, "create_note".to_string())?;
        let id = self.allocate_id();
        self.notes.push(Note {
            id: id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            folder_id: note.folder_id.clone(),
        });
        Ok(id)
    }

    fn update_note(&mut self, id: &str, title: &str, content: &str) -> Result<(), DomainError> {
        self.check(Operation::UpdateNote, format!("update_note {id}"))?;
        let note = self.note_mut(id)?;
        note.title = title.to_string();
        note.content = content.to_string();
        Ok(())
    }

    fn delete_note(&mut self, id: &str) -> Result<(), DomainError> {
        self.check(Operation::DeleteNote, format!("delete_note {id}"))?;
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Err(DomainError::NoteNotFound(id.to_string()));
        }
        Ok(())
    }

    fn rewrite(&mut self, text: &str, tone: Tone) -> Result<String, DomainError> {
        self.check(Operation::Rewrite, format!("rewrite {tone}"))?;
        Ok(format!("[{tone}] {text}"))
    }

    fn ideas(&mut self, topic: &str) -> Result<Vec<String>, DomainError> {
        self.check(Operation::Ideas, format!("ideas {topic}"))?;
        Ok(self.ideas.clone())
    }

    fn search(&mut self, query: &str, limit: usize) -> Result<Vec<SearchHit>, DomainError> {
        self.check(Operation::Search, format!("search {query}"))?;
        if let Some(results) = self.search_results.get(query) {
            return Ok(results.iter().take(limit).cloned().collect());
        }

        // Default behavior: case-insensitive substring match on title and content
        let needle = query.to_lowercase();
        Ok(self
            .notes
            .iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle) || n.content.to_lowercase().contains(&needle)
            })
            .take(limit)
            .map(|n| SearchHit {
                note_id: n.id.clone(),
                title: n.title.clone(),
                snippet: preview(&n.content, 40),
            })
            .collect())
    }

    fn export_pdf(&mut self, id: &str, title: &str) -> Result<Vec<u8>, DomainError> {
        self.check(Operation::Export, format!("export {id}"))?;
        self.note_mut(id)?;
        Ok(format!("%PDF-1.4\n% {title}\n%%EOF\n").into_bytes())
    }

    fn transcribe(&mut self, audio_url: &str) -> Result<String, DomainError> {
        self.check(Operation::Transcribe, format!("transcribe {audio_url}"))?;
        Ok(self.transcript.clone())
    }
}

/// Builder for MockDiaryBackend
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockDiaryBackendBuilder {
    folders: Vec<Folder>,
    notes: Vec<Note>,
    search_results: HashMap<String, Vec<SearchHit>>,
    ideas: Vec<String>,
    transcript: String,
    failures: HashSet<Operation>,
    aliases: HashMap<String, NoteId>,
}

impl MockDiaryBackendBuilder {
    pub fn new() -> Self {
        Self {
            folders: vec![],
            notes: vec![],
            search_results: HashMap::new(),
            ideas: vec![],
            transcript: String::new(),
            failures: HashSet::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn with_folder(mut self, id: &str, name: &str) -> Self {
        self.folders.push(Folder {
            id: id.to_string(),
            name: name.to_string(),
            icon: None,
        });
        self
    }

    /// Add a note that can be listed, fetched, updated and deleted
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Configure the hits returned for an exact search query
    pub fn with_search_result(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.search_results.insert(query.to_string(), hits);
        self
    }

    pub fn with_ideas(mut self, ideas: Vec<String>) -> Self {
        self.ideas = ideas;
        self
    }

    pub fn with_transcript(mut self, text: &str) -> Self {
        self.transcript = text.to_string();
        self
    }

    /// Make every call of `operation` fail with a server error
    pub fn with_failure(mut self, operation: Operation) -> Self {
        self.failures.insert(operation);
        self
    }

    /// Answer `get_note(alias)` with the note stored under `id`, the way a
    /// server normalising ids would
    pub fn with_id_alias(mut self, alias: &str, id: &str) -> Self {
        self.aliases.insert(alias.to_string(), id.to_string());
        self
    }

    pub fn build(self) -> MockDiaryBackend {
        // Fresh ids continue after the largest numeric fixture id
        let next_id = self
            .notes
            .iter()
            .filter_map(|n| n.id.parse::<u64>().ok())
            .max()
            .unwrap_or(100);
        MockDiaryBackend {
            folders: self.folders,
            notes: self.notes,
            next_id,
            next_folder_id: 0,
            aliases: self.aliases,
            search_results: self.search_results,
            ideas: self.ideas,
            transcript: self.transcript,
            failures: self.failures,
            calls: vec![],
        }
    }
}

impl Default for MockDiaryBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["reqwest", "hyper", "hyper_util", "rustls", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_notes_in_folders_when_listing_folder_then_returns_only_that_folder() {
        let mut mock = MockDiaryBackend::builder()
            .with_note(sample_note("1", "A", "", Some("f1")))
            .with_note(sample_note("2", "B", "", Some("f2")))
            .with_note(sample_note("3", "C", "", None))
            .build();

        let result = mock.list_notes(Some("f1")).expect("List should succeed");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");

        let unfiled = mock.list_notes(None).expect("List should succeed");
        assert_eq!(unfiled.len(), 1);
        assert_eq!(unfiled[0].id, "3");
    }

    #[test]
    fn given_fixture_ids_when_creating_note_then_allocates_fresh_id() {
        let mut mock = MockDiaryBackend::builder()
            .with_note(sample_note("7", "A", "", None))
            .build();

        let id = mock.create_note(&NewNote::empty(None)).expect("Create should succeed");

        assert_eq!(id, "8");
    }

    #[test]
    fn given_no_note_when_getting_note_then_returns_error() {
        let mut mock = MockDiaryBackend::builder().build();

        let result = mock.get_note("999");
        assert!(matches!(result, Err(DomainError::NoteNotFound(id)) if id == "999"));
    }

    #[test]
    fn given_injected_failure_when_calling_then_returns_server_error_and_records_call() {
        let mut mock = MockDiaryBackend::builder()
            .with_failure(Operation::Ideas)
            .build();

        let result = mock.ideas("spring");

        assert!(matches!(result, Err(DomainError::Server { status: 500, .. })));
        assert_eq!(mock.calls(), ["ideas spring".to_string()]);
    }

    #[test]
    fn given_custom_search_result_when_searching_then_returns_configured_hits() {
        let hits = vec![SearchHit {
            note_id: "42".to_string(),
            title: "Custom".to_string(),
            snippet: "configured".to_string(),
        }];
        let mut mock = MockDiaryBackend::builder()
            .with_search_result("custom", hits)
            .build();

        let result = mock.search("custom", 20).expect("Search should succeed");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].note_id, "42");
    }

    #[test]
    fn given_notes_when_searching_without_configuration_then_matches_text() {
        let mut mock = MockDiaryBackend::builder()
            .with_note(sample_note("1", "Beach day", "sun", None))
            .with_note(sample_note("2", "Exam", "revise BEACH ecology", None))
            .with_note(sample_note("3", "Groceries", "milk", None))
            .build();

        let result = mock.search("beach", 20).expect("Search should succeed");

        let ids: Vec<_> = result.iter().map(|h| h.note_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn given_fixture_folder_ids_when_creating_folders_then_ids_never_collide() {
        let mut mock = MockDiaryBackend::builder()
            .with_folder("f2", "Home")
            .with_folder("f1", "School")
            .build();

        let first = mock.create_folder("Work", None).expect("Create should succeed");
        let second = mock.create_folder("Play", None).expect("Create should succeed");

        assert_eq!(first.as_deref(), Some("f3"));
        assert_eq!(second.as_deref(), Some("f4"));
        let folders = mock.list_folders().expect("List should succeed");
        let mut ids: Vec<_> = folders.iter().map(|f| f.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn given_id_alias_when_getting_note_then_returns_stored_note() {
        let mut mock = MockDiaryBackend::builder()
            .with_note(sample_note("7", "Lucky", "", None))
            .with_id_alias("07", "7")
            .build();

        let note = mock.get_note("07").expect("Get should succeed");

        assert_eq!(note.id, "7");
    }
}
