// src/domain/tone.rs
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Register an AI rewrite should move the text into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Soft,
    Cute,
    Formal,
    Casual,
    Motivational,
    Study,
    Academic,
}

impl Tone {
    pub const ALL: [Tone; 7] = [
        Tone::Soft,
        Tone::Cute,
        Tone::Formal,
        Tone::Casual,
        Tone::Motivational,
        Tone::Study,
        Tone::Academic,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Tone::Soft => "soft",
            Tone::Cute => "cute",
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Motivational => "motivational",
            Tone::Study => "study",
            Tone::Academic => "academic",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or(DomainError::InvalidChoice {
                kind: "tone",
                value: s.to_string(),
            })
    }
}
