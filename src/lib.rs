// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::application::DiarySession;
use crate::cli::args::{Args, Command};
use crate::cli::shell::{run_shell, ShellOptions};
use crate::infrastructure::{export, Config, HttpBackend, PageRenderer};
use crate::ports::{terminal, HtmlPresenter};
use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use tracing::{debug, info};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting dear-diary with arguments");

    if let Command::InitConfig { path, force } = &args.command {
        return init_config(path.clone().or(args.config.clone()), *force);
    }

    let config = Config::resolve(args.config.as_deref(), args.backend.as_deref())?;
    debug!(?config, "Resolved configuration");

    let backend = HttpBackend::new(&config.backend.url, config.timeout())?;
    let mut session = DiarySession::new(backend)
        .with_features((&config.features).into())
        .with_search_limit(config.backend.search_limit)
        .with_ui(config.ui.theme, config.toggles());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Folders => {
            session.refresh_folders()?;
            for folder in &session.state().folders {
                writeln!(out, "{}", terminal::folder_line(folder, false))?;
            }
        }
        Command::NewFolder { name, icon } => {
            let id = session.create_folder(&name, icon.as_deref())?;
            match id {
                Some(id) => writeln!(out, "Created folder {id}")?,
                None => writeln!(out, "Created folder {name}")?,
            }
        }
        Command::Notes { folder } => {
            session.select_folder(folder)?;
            for note in &session.state().notes {
                writeln!(out, "{}", terminal::note_line(note, false))?;
            }
        }
        Command::Show { note_id, json } => {
            let note = session.open_note(&note_id)?;
            if json {
                let text = serde_json::to_string_pretty(note).context("Failed to serialize note")?;
                writeln!(out, "{text}")?;
            } else {
                writeln!(out, "{}", terminal::note_block(note))?;
            }
        }
        Command::View { note_id } => {
            info!(%note_id, "Viewing note");
            let note = session.open_note(&note_id)?.clone();
            let state = session.state();
            let html = HtmlPresenter::new(state.theme, state.toggles).render(&note);

            let mut renderer = PageRenderer::new();
            let temp_path = renderer.create_temp_file(&html)?;
            renderer.open_in_browser(&temp_path)?;
        }
        Command::New { template, title, folder } => {
            if folder.is_some() {
                session.select_folder(folder)?;
            }
            let id = match template {
                Some(template) => {
                    session.apply_template(template)?;
                    session.state().selected_note.clone().context("Template did not open a note")?
                }
                None => session.new_note(None)?,
            };
            if let Some(title) = title {
                session.edit_title(title)?;
                session.save()?;
            }
            writeln!(out, "Created note {id}")?;
        }
        Command::Delete { note_id, yes } => {
            session.open_note(&note_id)?;
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let deleted = session.delete(|note| {
                yes || terminal::confirm(
                    &format!("Delete \"{}\"?", note.display_title()),
                    &mut input,
                    &mut out,
                )
                .unwrap_or(false)
            })?;
            writeln!(out, "{}", if deleted { "Deleted." } else { "Kept." })?;
        }
        Command::Search { query, limit } => {
            if let Some(limit) = limit {
                session = session.with_search_limit(limit);
            }
            session.search(&query)?;
            for note in &session.state().notes {
                writeln!(out, "{}", terminal::note_line(note, false))?;
            }
        }
        Command::Ideas { topic } => {
            for idea in session.ideas(&topic)? {
                writeln!(out, "• {idea}")?;
            }
        }
        Command::Export { note_id, dir } => {
            session.open_note(&note_id)?;
            let document = session.export()?;
            let dir = dir.unwrap_or_else(|| config.export_dir());
            let path = export::save_document(&dir, &document)?;
            info!(?path, "Exported note");
            writeln!(out, "Exported to {}", path.display())?;
        }
        Command::Transcribe { audio_url } => {
            let text = session.transcribe(&audio_url)?;
            writeln!(out, "{text}")?;
        }
        Command::Shell => {
            let options = ShellOptions {
                save_chime: config.ui.save_chime,
                export_dir: config.export_dir(),
                open_browser: true,
            };
            let stdin = io::stdin();
            run_shell(&mut session, &mut stdin.lock(), &mut out, &options)?;
        }
        Command::InitConfig { .. } => unreachable!("handled before the backend is built"),
    }

    Ok(())
}

fn init_config(path: Option<std::path::PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path().context("Could not determine config directory")?,
    };
    if path.exists() && !force {
        bail!("Config file {} already exists (use --force to overwrite)", path.display());
    }
    Config::create_default(&path)?;
    info!(?path, "Wrote default config");
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
/// must be public to be used from integration tests
mod tests {
    use crate::util::testing;
    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
