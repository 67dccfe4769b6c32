// src/ports/terminal.rs
use crate::application::{ListView, ViewState};
use crate::constants::PREVIEW_CHARS;
use crate::domain::{Folder, Note, NoteSummary};
use crate::util::text::preview;
use std::io::{self, BufRead, Write};

pub fn folder_line(folder: &Folder, selected: bool) -> String {
    let marker = if selected { "*" } else { " " };
    format!("{marker} {:<12} {}", folder.id, folder.label())
}

pub fn note_line(note: &NoteSummary, selected: bool) -> String {
    let marker = if selected { "*" } else { " " };
    let snippet = preview(&note.content, PREVIEW_CHARS);
    if snippet.is_empty() {
        format!("{marker} {:<12} {}", note.id, note.display_title())
    } else {
        format!("{marker} {:<12} {}  {snippet}", note.id, note.display_title())
    }
}

pub fn note_block(note: &Note) -> String {
    let folder = note.folder_id.as_deref().unwrap_or("-");
    format!(
        "# {}\n[id {} · folder {}]\n\n{}",
        note.display_title(),
        note.id,
        folder,
        note.content
    )
}

/// Folder list followed by the note list, marking the current selections.
pub fn overview(state: &ViewState) -> String {
    let mut out = Vec::new();
    out.push("Folders:".to_string());
    if state.folders.is_empty() {
        out.push("  (none)".to_string());
    }
    for folder in &state.folders {
        let selected = state.selected_folder.as_deref() == Some(folder.id.as_str());
        out.push(folder_line(folder, selected));
    }

    match &state.list_view {
        ListView::Folder => out.push("Notes:".to_string()),
        ListView::Search { query } => out.push(format!("Search results for {query:?}:")),
    }
    if state.notes.is_empty() {
        out.push("  (none)".to_string());
    }
    for note in &state.notes {
        let selected = state.selected_note.as_deref() == Some(note.id.as_str());
        out.push(note_line(note, selected));
    }

    if let Some(failed) = &state.last_error {
        out.push(format!("! {} failed: {}", failed.operation, failed.message));
    }
    out.join("\n")
}

/// Ring the terminal bell after a save. Failures are ignored.
pub fn chime(out: &mut impl Write) {
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

/// Ask a yes/no question on `out`, reading the answer from `input`.
///
/// Anything but `y`/`yes` (including end of input) counts as no.
pub fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
