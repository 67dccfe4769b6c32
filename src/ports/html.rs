// src/ports/html.rs
use crate::application::UiToggles;
use crate::domain::checklist::{CHECKED, UNCHECKED};
use crate::domain::{Note, Theme};
use html_escape::encode_text;
use tracing::instrument;

const HANDWRITING_FONT: &str = r#""Caveat", "Patrick Hand", cursive"#;
const DEFAULT_FONT: &str = r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#;

/// Renders a note as a standalone page in the chosen theme.
#[derive(Debug, Clone, Copy)]
pub struct HtmlPresenter {
    theme: Theme,
    toggles: UiToggles,
}

impl HtmlPresenter {
    pub fn new(theme: Theme, toggles: UiToggles) -> Self {
        Self { theme, toggles }
    }

    /// One `<div>` per line; checklist lines get a class so they can be styled.
    #[instrument(level = "trace", ret)]
    fn process_content(&self, content: &str) -> String {
        content
            .split('\n')
            .map(|line| {
                let class = if line.starts_with(CHECKED) {
                    "line checked"
                } else if line.starts_with(UNCHECKED) {
                    "line unchecked"
                } else {
                    "line"
                };
                let text = if line.is_empty() {
                    "&nbsp;".to_string()
                } else {
                    encode_text(line).into_owned()
                };
                format!(r#"<div class="{class}">{text}</div>"#)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self, note: &Note) -> String {
        let profile = self.theme.profile();
        let panel = if self.theme.is_dark() {
            "rgba(30,30,30,0.6)"
        } else {
            "rgba(255,255,255,0.55)"
        };
        let font = if self.toggles.handwriting {
            HANDWRITING_FONT
        } else {
            DEFAULT_FONT
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: {font};
            line-height: 1.7;
            margin: 0;
            min-height: 100vh;
            color: {text};
            background: linear-gradient(135deg, {from}, {to});
        }}
        .page {{
            max-width: 760px;
            margin: 2rem auto;
            padding: 2rem;
            border-radius: 24px;
            background: {panel};
            box-shadow: 0 16px 48px rgba(0,0,0,0.12);
        }}
        .banner {{
            text-align: center;
            font-size: 1.5rem;
            font-weight: 600;
            margin-bottom: 1rem;
        }}
        h1 {{
            border-bottom: 2px solid {accent};
            padding-bottom: 0.5rem;
        }}
        .checked {{
            opacity: 0.6;
            text-decoration: line-through;
        }}
        .note-info {{
            margin-top: 1.5rem;
            font-size: 0.8em;
            opacity: 0.7;
        }}
    </style>
</head>
<body>
    <div class="page theme-{theme_key}">
        <div class="banner">{banner}</div>
        <h1>{title}</h1>
        <div class="content">
{content}
        </div>
        <div class="note-info">{theme_name} · Note {note_id}</div>
    </div>
</body>
</html>"#,
            title = encode_text(note.display_title()),
            font = font,
            text = profile.text,
            from = profile.from,
            to = profile.to,
            panel = panel,
            accent = profile.accent,
            theme_key = self.theme.key(),
            banner = self.toggles.header_style.preview(),
            content = self.process_content(&note.content),
            theme_name = profile.name,
            note_id = encode_text(&note.id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeaderStyle;
    use rstest::rstest;

    fn note(title: &str, content: &str) -> Note {
        Note {
            id: "n1".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            folder_id: None,
        }
    }

    #[rstest]
    #[case("<b>bold</b>", r#"<div class="line">&lt;b&gt;bold&lt;/b&gt;</div>"#)]
    #[case("▢ Water", r#"<div class="line unchecked">▢ Water</div>"#)]
    #[case("✅ Study", r#"<div class="line checked">✅ Study</div>"#)]
    #[case("", r#"<div class="line">&nbsp;</div>"#)]
    fn test_line_processing(#[case] input: &str, #[case] expected: &str) {
        let presenter = HtmlPresenter::new(Theme::Blush, UiToggles::default());

        assert_eq!(presenter.process_content(input), expected);
    }

    #[test]
    fn given_night_theme_when_rendering_then_uses_night_gradient() {
        let presenter = HtmlPresenter::new(Theme::Night, UiToggles::default());

        let html = presenter.render(&note("Late", "thoughts"));

        assert!(html.contains("linear-gradient(135deg, #1E1E1E, #2A2A2A)"));
        assert!(html.contains("Night Mode"));
    }

    #[test]
    fn given_handwriting_and_kawaii_header_when_rendering_then_page_reflects_toggles() {
        let toggles = UiToggles {
            handwriting: true,
            header_style: HeaderStyle::Kawaii,
        };
        let presenter = HtmlPresenter::new(Theme::Sakura, toggles);

        let html = presenter.render(&note("Plans", ""));

        assert!(html.contains("Patrick Hand"));
        assert!(html.contains(HeaderStyle::Kawaii.preview()));
    }

    #[test]
    fn given_blank_title_when_rendering_then_shows_untitled() {
        let presenter = HtmlPresenter::new(Theme::Matcha, UiToggles::default());

        let html = presenter.render(&note("", "x"));

        assert!(html.contains("<h1>Untitled</h1>"));
    }
}
