// src/domain/theme.rs
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Colour profile behind a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeProfile {
    pub name: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Blush,
    Matcha,
    Sakura,
    Night,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Blush, Theme::Matcha, Theme::Sakura, Theme::Night];

    pub fn key(&self) -> &'static str {
        match self {
            Theme::Blush => "blush",
            Theme::Matcha => "matcha",
            Theme::Sakura => "sakura",
            Theme::Night => "night",
        }
    }

    pub fn profile(&self) -> ThemeProfile {
        match self {
            Theme::Blush => ThemeProfile {
                name: "Blush Beige",
                from: "#F9EDE7",
                to: "#FFFBF7",
                accent: "#E7C6B8",
                text: "#881337",
            },
            Theme::Matcha => ThemeProfile {
                name: "Matcha Green",
                from: "#E6F5E7",
                to: "#C2DABD",
                accent: "#9BB69E",
                text: "#022C22",
            },
            Theme::Sakura => ThemeProfile {
                name: "Sakura Pink",
                from: "#FFD9E8",
                to: "#FFF3F9",
                accent: "#F4AEC7",
                text: "#701A75",
            },
            Theme::Night => ThemeProfile {
                name: "Night Mode",
                from: "#1E1E1E",
                to: "#2A2A2A",
                accent: "#B39DDB",
                text: "#F1F5F9",
            },
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Night)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or(DomainError::InvalidChoice {
                kind: "theme",
                value: s.to_string(),
            })
    }
}

/// Banner shown above the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    #[default]
    Soft,
    Minimal,
    Kawaii,
    Serif,
}

impl HeaderStyle {
    pub const ALL: [HeaderStyle; 4] = [
        HeaderStyle::Soft,
        HeaderStyle::Minimal,
        HeaderStyle::Kawaii,
        HeaderStyle::Serif,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            HeaderStyle::Soft => "soft",
            HeaderStyle::Minimal => "minimal",
            HeaderStyle::Kawaii => "kawaii",
            HeaderStyle::Serif => "serif",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeaderStyle::Soft => "Soft Girl",
            HeaderStyle::Minimal => "Minimal",
            HeaderStyle::Kawaii => "Kawaii",
            HeaderStyle::Serif => "Elegant Serif",
        }
    }

    pub fn preview(&self) -> &'static str {
        match self {
            HeaderStyle::Soft => "✨ 𝐓𝐡𝐨𝐮𝐠𝐡𝐭𝐬 ✨",
            HeaderStyle::Minimal => "Notes",
            HeaderStyle::Kawaii => "(✿ ◕‿◕) 𝐍𝐨𝐭𝐞𝐬",
            HeaderStyle::Serif => "❝ Journal ❞",
        }
    }
}

impl fmt::Display for HeaderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HeaderStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        HeaderStyle::ALL
            .into_iter()
            .find(|h| h.key() == key)
            .ok_or(DomainError::InvalidChoice {
                kind: "header style",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("blush", Theme::Blush)]
    #[case("Matcha", Theme::Matcha)]
    #[case(" sakura ", Theme::Sakura)]
    #[case("NIGHT", Theme::Night)]
    fn given_theme_key_when_parsing_then_returns_theme(#[case] input: &str, #[case] expected: Theme) {
        assert_eq!(input.parse::<Theme>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_theme_when_parsing_then_returns_invalid_choice() {
        let result = "neon".parse::<Theme>();
        assert!(matches!(
            result,
            Err(DomainError::InvalidChoice { kind: "theme", .. })
        ));
    }

    #[test]
    fn given_theme_when_serializing_then_uses_lowercase_key() {
        let json = serde_json::to_string(&Theme::Sakura).unwrap();
        assert_eq!(json, "\"sakura\"");
    }

    #[test]
    fn given_night_theme_when_checking_darkness_then_only_night_is_dark() {
        assert!(Theme::Night.is_dark());
        assert!(!Theme::Blush.is_dark());
    }

    #[test]
    fn given_header_style_when_parsing_then_round_trips_through_key() {
        for style in HeaderStyle::ALL {
            assert_eq!(style.key().parse::<HeaderStyle>().unwrap(), style);
        }
    }
}
