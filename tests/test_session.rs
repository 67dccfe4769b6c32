use dear_diary::application::{DiarySession, Event, ListView, Operation, Slot, ViewState};
use dear_diary::domain::{DomainError, SearchHit, Template};
use dear_diary::util::testing::{sample_note, MockDiaryBackend};

fn diary() -> DiarySession<MockDiaryBackend> {
    let backend = MockDiaryBackend::builder()
        .with_folder("f1", "School")
        .with_folder("f2", "Home")
        .with_note(sample_note("1", "Exam", "▢ Revise", Some("f1")))
        .with_note(sample_note("2", "Groceries", "milk", Some("f2")))
        .with_note(sample_note("3", "Loose thought", "hmm", None))
        .with_search_result(
            "summer",
            vec![SearchHit {
                note_id: "2".to_string(),
                title: "Groceries".to_string(),
                snippet: "ice cream".to_string(),
            }],
        )
        .build();
    let mut session = DiarySession::new(backend);
    session.load().expect("Initial load should succeed");
    session
}

#[test]
fn given_selected_folder_when_listing_then_only_its_notes_are_shown() {
    // Arrange
    let mut session = diary();

    // Act
    session.select_folder(Some("f1".to_string())).unwrap();

    // Assert
    let state = session.state();
    assert_eq!(state.folders.len(), 2);
    assert_eq!(state.notes.len(), 1);
    assert!(state.notes.iter().all(|n| n.folder_id.as_deref() == Some("f1")));
    assert_eq!(session.backend().calls().last().unwrap(), "list_notes f1");
}

#[test]
fn given_todo_template_in_folder_when_creating_note_then_content_matches_template() {
    // Arrange
    let mut session = diary();
    session.select_folder(Some("f2".to_string())).unwrap();

    // Act
    session.apply_template(Template::Todo).unwrap();

    // Assert
    let note = session.buffer().expect("Template should open the new note");
    assert_eq!(note.content, Template::Todo.text());
    assert_eq!(note.folder_id.as_deref(), Some("f2"));
    let stored = session.backend().stored_note(&note.id).unwrap();
    assert_eq!(stored.content, Template::Todo.text());
}

#[test]
fn given_journal_template_when_creating_note_then_title_is_daily_journal() {
    // Arrange
    let mut session = diary();
    session.select_folder(Some("f1".to_string())).unwrap();

    // Act
    let id = session.new_note(Some(Template::Journal)).unwrap();

    // Assert
    assert_eq!(session.backend().stored_note(&id).unwrap().title, "Daily Journal");
    assert_eq!(session.state().selected_note.as_deref(), Some(id.as_str()));
}

#[test]
fn given_search_results_when_searching_empty_then_list_matches_plain_reload() {
    // Arrange
    let mut session = diary();
    session.select_folder(Some("f2".to_string())).unwrap();
    let before = session.state().notes.clone();

    // Act
    session.search("summer").unwrap();
    let during = session.state().notes.clone();
    session.search("").unwrap();

    // Assert
    assert_eq!(during.len(), 1);
    assert_eq!(during[0].content, "ice cream");
    assert_eq!(session.state().list_view, ListView::Folder);
    assert_eq!(session.state().notes, before);
}

#[test]
fn given_edited_note_when_saving_and_reopening_then_changes_persist() {
    // Arrange
    let mut session = diary();
    session.select_folder(Some("f1".to_string())).unwrap();
    session.open_note("1").unwrap();

    // Act
    session.edit_title("Weekend Plans").unwrap();
    session.edit_content("▢ Task 1").unwrap();
    session.save().unwrap();
    let reopened = session.open_note("1").unwrap().clone();

    // Assert
    assert_eq!(reopened.title, "Weekend Plans");
    assert_eq!(reopened.content, "▢ Task 1");
    assert_eq!(session.state().notes[0].title, "Weekend Plans");
}

#[test]
fn given_checklist_when_toggling_and_saving_then_backend_stores_checked_lines() {
    // Arrange
    let mut session = diary();
    session.select_folder(Some("f1".to_string())).unwrap();
    session.open_note("1").unwrap();

    // Act
    session.toggle_checklist().unwrap();
    session.save().unwrap();

    // Assert
    assert_eq!(session.backend().stored_note("1").unwrap().content, "✅ Revise");
}

#[test]
fn given_open_note_when_deleting_then_selection_is_cleared_and_list_reloaded() {
    // Arrange
    let mut session = diary();
    session.open_note("3").unwrap();

    // Act
    let deleted = session.delete(|_| true).unwrap();

    // Assert
    assert!(deleted);
    assert!(!session.backend().has_note("3"));
    assert_eq!(session.state().selected_note, None);
    assert!(session.buffer().is_none());
    assert!(session.state().notes.iter().all(|n| n.id != "3"));
}

#[test]
fn given_missing_note_when_opening_then_error_is_recorded() {
    // Arrange
    let mut session = diary();

    // Act
    let result = session.open_note("999");

    // Assert
    assert_eq!(result.unwrap_err(), DomainError::NoteNotFound("999".to_string()));
    let failed = session.state().last_error.as_ref().expect("Error should be visible");
    assert_eq!(failed.operation, Operation::GetNote);
}

#[test]
fn given_unsaved_edits_when_opening_other_note_then_edits_are_discarded() {
    // Arrange
    let mut session = diary();
    session.open_note("3").unwrap();
    session.edit_content("draft that never got saved").unwrap();

    // Act
    session.select_folder(Some("f1".to_string())).unwrap();
    session.open_note("1").unwrap();

    // Assert
    assert_eq!(session.backend().stored_note("3").unwrap().content, "hmm");
    assert_eq!(session.buffer().unwrap().content, "▢ Revise");
}

#[test]
fn given_two_list_requests_when_older_response_arrives_last_then_it_is_ignored() {
    // Arrange
    let mut state = ViewState::default();
    let older = state.begin(Slot::NoteList);
    let newer = state.begin(Slot::NoteList);

    // Act
    let newer_applied = state.dispatch(Event::NotesLoaded {
        ticket: newer,
        notes: vec![sample_note("2", "Groceries", "milk", Some("f2")).into()],
    });
    let older_applied = state.dispatch(Event::NotesLoaded {
        ticket: older,
        notes: vec![sample_note("1", "Exam", "", Some("f1")).into()],
    });

    // Assert
    assert!(newer_applied);
    assert!(!older_applied);
    assert_eq!(state.notes.len(), 1);
    assert_eq!(state.notes[0].id, "2");
}

#[test]
fn given_slow_fetch_when_selection_changes_then_late_note_does_not_replace_buffer() {
    // Arrange
    let mut state = ViewState::default();
    state.dispatch(Event::NoteSelected("1".to_string()));
    let first = state.begin(Slot::NoteFetch);
    state.dispatch(Event::NoteSelected("2".to_string()));
    let second = state.begin(Slot::NoteFetch);

    // Act
    state.dispatch(Event::NoteLoaded {
        ticket: second,
        note: sample_note("2", "Groceries", "milk", None),
    });
    state.dispatch(Event::NoteLoaded {
        ticket: first,
        note: sample_note("1", "Exam", "▢ Revise", None),
    });

    // Assert
    assert_eq!(state.buffer.as_ref().unwrap().id, "2");
    assert_eq!(state.selected_note.as_deref(), Some("2"));
}
