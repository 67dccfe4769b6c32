// src/constants.rs
//
// Application-wide constants shared between the client layers.

/// Backend used when neither config, environment nor flags name one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured backend URL.
///
/// Used in: `infrastructure/config.rs`
pub const BACKEND_URL_ENV: &str = "DEAR_DIARY_BACKEND_URL";

/// Title given to notes created without one, and shown for blank titles.
pub const UNTITLED: &str = "Untitled";

/// Maximum number of hits requested from semantic search.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Characters of note content shown in a list row.
///
/// Used in: `ports/terminal.rs`
pub const PREVIEW_CHARS: usize = 80;

/// Icon sent with folders created from the client.
pub const DEFAULT_FOLDER_ICON: &str = "📁";

/// Delay in milliseconds after writing the HTML preview before returning.
///
/// The browser needs a moment to read the file before the temp dir can go away.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 200;
