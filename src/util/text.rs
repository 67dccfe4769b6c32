// src/util/text.rs
use regex::Regex;
use std::sync::LazyLock;

static PATH_HOSTILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("valid file name regex"));

/// File name a note is downloaded under: the title with characters that are
/// unsafe in paths replaced by `_`, or `note` for a blank title.
///
/// # Examples
///
/// ```
/// use dear_diary::util::text::export_file_name;
///
/// assert_eq!(export_file_name("Weekend Plans"), "Weekend Plans.pdf");
/// assert_eq!(export_file_name(""), "note.pdf");
/// ```
pub fn export_file_name(title: &str) -> String {
    let cleaned = PATH_HOSTILE.replace_all(title.trim(), "_");
    let stem = cleaned.trim_matches('.');
    if stem.is_empty() {
        "note.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}

/// Single-line preview of note content, cut to `max_chars` characters.
pub fn preview(content: &str, max_chars: usize) -> String {
    let flat: String = content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = flat.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
