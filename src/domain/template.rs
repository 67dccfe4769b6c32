// src/domain/template.rs
use crate::constants::UNTITLED;
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const STUDY: &str = "📚 Study Notes\n\nTopic: ...\nKey Terms:\n- ...\n- ...\n\nSummary:\n...\n\nQuestions:\n- ...\n- ...";
const JOURNAL: &str = "🫶 Daily Journal\n\nMood: ...\nGratitude:\n- ...\n- ...\n\nToday I noticed:\n...\n\nTiny wins:\n- ...";
const TODO: &str = "\u{1F5D2}\u{FE0F} To\u{2011}Do Planner\n\n▢ Task 1\n▢ Task 2\n▢ Task 3\n\nNotes:\n...";

/// Starter text for a note body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Study,
    Journal,
    Todo,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Study, Template::Journal, Template::Todo];

    pub fn key(&self) -> &'static str {
        match self {
            Template::Study => "study",
            Template::Journal => "journal",
            Template::Todo => "todo",
        }
    }

    /// Fixed content, substituted wholesale into a note.
    pub fn text(&self) -> &'static str {
        match self {
            Template::Study => STUDY,
            Template::Journal => JOURNAL,
            Template::Todo => TODO,
        }
    }

    /// Title for a note created from this template.
    pub fn title(&self) -> &'static str {
        match self {
            Template::Journal => "Daily Journal",
            _ => UNTITLED,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Template {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Template::ALL
            .into_iter()
            .find(|t| t.key() == key || (key == "to-do" && *t == Template::Todo))
            .ok_or(DomainError::InvalidChoice {
                kind: "template",
                value: s.to_string(),
            })
    }
}
