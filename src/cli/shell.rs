// src/cli/shell.rs
use crate::application::{DiaryBackend, DiarySession};
use crate::domain::{DomainError, HeaderStyle, Template, Theme, Tone};
use crate::infrastructure::{export, PageRenderer};
use crate::ports::{terminal, HtmlPresenter};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

pub const HELP: &str = "\
Commands:
  folders                 reload and list folders
  mkdir <name>            create a folder
  cd [<folder-id>|-]      scope the note list to a folder (- or nothing: unfiled)
  ls                      show folders and notes
  open <note-id>          open a note into the editor
  new [<template>]        create a note (templates: study, journal, todo)
  title <text>            set the title of the open note
  write <text>            replace the content (\\n for line breaks)
  append <text>           append to the content (\\n for line breaks)
  show                    print the open note
  save                    save the open note
  rm                      delete the open note
  template <name>         overwrite the open note with a template, or start one
  toggle                  flip ▢/✅ checklist lines
  tone <tone>             AI rewrite (soft, cute, formal, casual, motivational, study, academic)
  ideas <topic>           AI ideas, appended to the open note
  search [<query>]        search by meaning; empty query restores the list
  export                  save the open note as PDF
  transcribe <url>        transcribe audio, appended to the open note
  theme <name>            blush, matcha, sakura, night
  handwriting on|off      handwriting font in previews
  header <style>          soft, minimal, kawaii, serif
  view                    open the note in the browser
  state                   dump the view state as JSON
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Folders,
    Mkdir(String),
    Cd(Option<String>),
    Ls,
    Open(String),
    New(Option<Template>),
    Title(String),
    Write(String),
    Append(String),
    Show,
    Save,
    Rm,
    Template(Template),
    Toggle,
    Tone(Tone),
    Ideas(String),
    Search(String),
    Export,
    Transcribe(String),
    Theme(Theme),
    Handwriting(bool),
    Header(HeaderStyle),
    View,
    State,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, DomainError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line.trim(), ""),
        };
        if word.is_empty() {
            return Ok(None);
        }

        let required = |what: &str| -> Result<String, DomainError> {
            if rest.is_empty() {
                Err(DomainError::InvalidInput(format!("{word} needs {what}")))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => ShellCommand::Help,
            "folders" => ShellCommand::Folders,
            "mkdir" => ShellCommand::Mkdir(required("a folder name")?),
            "cd" => ShellCommand::Cd(match rest {
                "" | "-" => None,
                id => Some(id.to_string()),
            }),
            "ls" => ShellCommand::Ls,
            "open" => ShellCommand::Open(required("a note id")?),
            "new" => ShellCommand::New(match rest {
                "" => None,
                name => Some(name.parse()?),
            }),
            "title" => ShellCommand::Title(rest.to_string()),
            "write" => ShellCommand::Write(unescape(rest)),
            "append" => ShellCommand::Append(unescape(rest)),
            "show" => ShellCommand::Show,
            "save" => ShellCommand::Save,
            "rm" | "delete" => ShellCommand::Rm,
            "template" => ShellCommand::Template(required("a template")?.parse()?),
            "toggle" => ShellCommand::Toggle,
            "tone" | "rewrite" => ShellCommand::Tone(required("a tone")?.parse()?),
            "ideas" => ShellCommand::Ideas(rest.to_string()),
            "search" => ShellCommand::Search(rest.to_string()),
            "export" => ShellCommand::Export,
            "transcribe" => ShellCommand::Transcribe(required("an audio URL")?),
            "theme" => ShellCommand::Theme(required("a theme")?.parse()?),
            "handwriting" => ShellCommand::Handwriting(match rest.to_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => {
                    return Err(DomainError::InvalidChoice {
                        kind: "handwriting setting",
                        value: other.to_string(),
                    })
                }
            }),
            "header" => ShellCommand::Header(required("a header style")?.parse()?),
            "view" => ShellCommand::View,
            "state" => ShellCommand::State,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => {
                return Err(DomainError::InvalidChoice {
                    kind: "command",
                    value: other.to_string(),
                })
            }
        };
        Ok(Some(command))
    }
}

/// Turn the two-character sequence `\n` into a line break.
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub save_chime: bool,
    pub export_dir: PathBuf,
    pub open_browser: bool,
}

enum Flow {
    Continue,
    Quit,
}

/// Read commands from `input` until `quit` or end of input.
///
/// Command failures are reported on `out` and the session carries on.
pub fn run_shell<B: DiaryBackend>(
    session: &mut DiarySession<B>,
    input: &mut impl BufRead,
    out: &mut impl Write,
    options: &ShellOptions,
) -> Result<()> {
    if let Err(err) = session.load() {
        writeln!(out, "error: {err}")?;
    }
    writeln!(out, "Dear Diary. Type `help` for commands.")?;

    // Outlives each `view` so the browser can still read the page
    let mut renderer = PageRenderer::new();
    let mut line = String::new();
    loop {
        write!(out, "diary> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line).context("Failed to read command")? == 0 {
            writeln!(out)?;
            break;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };
        debug!(?command, "Shell command");

        match execute(session, command, &mut renderer, input, out, options) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(out, "error: {err:#}")?,
        }
    }
    Ok(())
}

fn execute<B: DiaryBackend>(
    session: &mut DiarySession<B>,
    command: ShellCommand,
    renderer: &mut PageRenderer,
    input: &mut impl BufRead,
    out: &mut impl Write,
    options: &ShellOptions,
) -> Result<Flow> {
    match command {
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Folders => {
            session.refresh_folders()?;
            let state = session.state();
            for folder in &state.folders {
                let selected = state.selected_folder.as_deref() == Some(folder.id.as_str());
                writeln!(out, "{}", terminal::folder_line(folder, selected))?;
            }
        }
        ShellCommand::Mkdir(name) => match session.create_folder(&name, None)? {
            Some(id) => writeln!(out, "Created folder {id}")?,
            None => writeln!(out, "Created folder")?,
        },
        ShellCommand::Cd(folder) => {
            session.select_folder(folder)?;
            writeln!(out, "{}", terminal::overview(session.state()))?;
        }
        ShellCommand::Ls => writeln!(out, "{}", terminal::overview(session.state()))?,
        ShellCommand::Open(id) => {
            let note = session.open_note(&id)?;
            writeln!(out, "{}", terminal::note_block(note))?;
        }
        ShellCommand::New(template) => {
            let id = session.new_note(template)?;
            writeln!(out, "Created note {id}")?;
        }
        ShellCommand::Title(title) => session.edit_title(title)?,
        ShellCommand::Write(content) => session.edit_content(content)?,
        ShellCommand::Append(extra) => session.append_content(extra)?,
        ShellCommand::Show => {
            let note = session.buffer().ok_or(DomainError::NoNoteSelected)?;
            writeln!(out, "{}", terminal::note_block(note))?;
        }
        ShellCommand::Save => {
            session.save()?;
            if options.save_chime {
                terminal::chime(out);
            }
            writeln!(out, "Saved.")?;
        }
        ShellCommand::Rm => {
            let deleted = session.delete(|note| {
                let prompt = format!("Delete \"{}\"?", note.display_title());
                terminal::confirm(&prompt, input, out).unwrap_or(false)
            })?;
            writeln!(out, "{}", if deleted { "Deleted." } else { "Kept." })?;
        }
        ShellCommand::Template(template) => {
            session.apply_template(template)?;
            writeln!(out, "Applied {template} template.")?;
        }
        ShellCommand::Toggle => session.toggle_checklist()?,
        ShellCommand::Tone(tone) => {
            session.rewrite(tone)?;
            if let Some(note) = session.buffer() {
                writeln!(out, "{}", note.content)?;
            }
        }
        ShellCommand::Ideas(topic) => {
            for idea in session.ideas(&topic)? {
                writeln!(out, "• {idea}")?;
            }
        }
        ShellCommand::Search(query) => {
            session.search(&query)?;
            writeln!(out, "{}", terminal::overview(session.state()))?;
        }
        ShellCommand::Export => {
            let document = session.export()?;
            let path = export::save_document(&options.export_dir, &document)?;
            writeln!(out, "Exported to {}", path.display())?;
        }
        ShellCommand::Transcribe(url) => {
            let text = session.transcribe(&url)?;
            writeln!(out, "{text}")?;
        }
        ShellCommand::Theme(theme) => {
            session.set_theme(theme);
            writeln!(out, "Theme: {}", theme.profile().name)?;
        }
        ShellCommand::Handwriting(on) => {
            session.set_handwriting(on);
            writeln!(out, "Handwriting {}", if on { "on" } else { "off" })?;
        }
        ShellCommand::Header(style) => {
            session.set_header_style(style);
            writeln!(out, "{}", style.preview())?;
        }
        ShellCommand::View => {
            let note = session.buffer().ok_or(DomainError::NoNoteSelected)?;
            let state = session.state();
            let html = HtmlPresenter::new(state.theme, state.toggles).render(note);
            let path = renderer.create_temp_file(&html)?;
            writeln!(out, "Preview at {}", path.display())?;
            if options.open_browser {
                renderer.open_in_browser(&path)?;
            }
        }
        ShellCommand::State => {
            let json = serde_json::to_string_pretty(session.state())?;
            writeln!(out, "{json}")?;
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cd", ShellCommand::Cd(None))]
    #[case("cd -", ShellCommand::Cd(None))]
    #[case("cd f1", ShellCommand::Cd(Some("f1".to_string())))]
    #[case("new", ShellCommand::New(None))]
    #[case("new todo", ShellCommand::New(Some(Template::Todo)))]
    #[case("write ▢ Task 1\\n▢ Task 2", ShellCommand::Write("▢ Task 1\n▢ Task 2".to_string()))]
    #[case("title  Weekend Plans ", ShellCommand::Title("Weekend Plans".to_string()))]
    #[case("tone Formal", ShellCommand::Tone(Tone::Formal))]
    #[case("search", ShellCommand::Search(String::new()))]
    #[case("handwriting on", ShellCommand::Handwriting(true))]
    #[case("THEME night", ShellCommand::Theme(Theme::Night))]
    #[case("q", ShellCommand::Quit)]
    fn given_line_when_parsing_then_returns_command(#[case] line: &str, #[case] expected: ShellCommand) {
        assert_eq!(ShellCommand::parse(line).unwrap(), Some(expected));
    }

    #[test]
    fn given_blank_line_when_parsing_then_returns_none() {
        assert_eq!(ShellCommand::parse("   \n").unwrap(), None);
    }

    #[rstest]
    #[case("dance")]
    #[case("open")]
    #[case("template recipe")]
    #[case("handwriting maybe")]
    fn given_bad_line_when_parsing_then_returns_error(#[case] line: &str) {
        assert!(ShellCommand::parse(line).is_err());
    }
}
