// src/domain/checklist.rs
pub const UNCHECKED: char = '▢';
pub const CHECKED: char = '✅';

/// Flip every checklist line: `▢` becomes `✅` and back; other lines are kept.
///
/// Splits on `\n` only, so trailing newlines and `\r` survive untouched and
/// applying the toggle twice returns the input.
pub fn toggle(content: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            if let Some(rest) = line.strip_prefix(UNCHECKED) {
                format!("{CHECKED}{rest}")
            } else if let Some(rest) = line.strip_prefix(CHECKED) {
                format!("{UNCHECKED}{rest}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
