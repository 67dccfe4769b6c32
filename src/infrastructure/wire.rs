// src/infrastructure/wire.rs
//
// JSON shapes exchanged with the backend. Ids arrive as `id`, `_id` or
// both, as strings or integers.
use crate::constants::UNTITLED;
use crate::domain::{DomainError, Folder, Note, NoteSummary, SearchHit, Tone};
use serde::{Deserialize, Serialize};

mod opaque_id {
    use serde::de::{Error, Visitor};
    use serde::Deserializer;
    use std::fmt::Formatter;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }

    pub mod optional {
        use serde::{Deserialize, Deserializer};

        #[derive(Deserialize)]
        struct Wrapped(#[serde(deserialize_with = "super::deserialize")] String);

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
            Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(id)| id))
        }
    }
}

/// A document id sent as `id`, `_id` or both; `id` wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDocumentId")]
pub struct DocumentId(pub String);

#[derive(Deserialize)]
struct RawDocumentId {
    #[serde(default, deserialize_with = "opaque_id::optional::deserialize")]
    id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "opaque_id::optional::deserialize")]
    mongo_id: Option<String>,
}

impl TryFrom<RawDocumentId> for DocumentId {
    type Error = &'static str;

    fn try_from(raw: RawDocumentId) -> Result<Self, Self::Error> {
        raw.id
            .or(raw.mongo_id)
            .map(DocumentId)
            .ok_or("missing field `id` or `_id`")
    }
}

#[derive(Debug, Deserialize)]
pub struct FolderDto {
    #[serde(flatten)]
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<FolderDto> for Folder {
    fn from(dto: FolderDto) -> Self {
        Self {
            id: dto.id.0,
            name: dto.name,
            icon: dto.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NoteDto {
    #[serde(flatten)]
    pub id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "opaque_id::optional::deserialize")]
    pub folder_id: Option<String>,
}

impl From<NoteDto> for Note {
    fn from(dto: NoteDto) -> Self {
        Self {
            id: dto.id.0,
            title: dto.title.unwrap_or_else(|| UNTITLED.to_string()),
            content: dto.content.unwrap_or_default(),
            folder_id: dto.folder_id,
        }
    }
}

impl From<NoteDto> for NoteSummary {
    fn from(dto: NoteDto) -> Self {
        Note::from(dto).into()
    }
}

/// Any body carrying the id of a created resource.
#[derive(Debug, Deserialize)]
pub struct CreatedDto {
    #[serde(flatten)]
    pub id: DocumentId,
}

#[derive(Debug, Serialize)]
pub struct CreateFolderRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct UpdateNoteRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// The tone travels as both `style` and `tone`.
#[derive(Debug, Serialize)]
pub struct RewriteRequest<'a> {
    pub text: &'a str,
    pub style: Tone,
    pub tone: Tone,
}

impl<'a> RewriteRequest<'a> {
    pub fn new(text: &'a str, tone: Tone) -> Self {
        Self {
            text,
            style: tone,
            tone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RewriteResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl RewriteResponse {
    pub fn into_text(self) -> Result<String, DomainError> {
        self.result
            .or(self.text)
            .ok_or_else(|| DomainError::Parse("rewrite response has neither `result` nor `text`".to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct IdeasRequest<'a> {
    pub topic: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct IdeasResponse {
    pub ideas: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultDto>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchResultDto {
    Nested {
        note: NoteDto,
        #[serde(default)]
        snippet: Option<String>,
    },
    Flat {
        #[serde(flatten)]
        id: DocumentId,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        snippet: Option<String>,
    },
}

impl From<SearchResultDto> for SearchHit {
    fn from(dto: SearchResultDto) -> Self {
        match dto {
            SearchResultDto::Nested { note, snippet } => {
                let note = Note::from(note);
                SearchHit {
                    note_id: note.id,
                    title: note.title,
                    snippet: snippet.unwrap_or(note.content),
                }
            }
            SearchResultDto::Flat { id, title, snippet } => SearchHit {
                note_id: id.0,
                title: title.unwrap_or_else(|| UNTITLED.to_string()),
                snippet: snippet.unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExportRequest<'a> {
    pub note_id: &'a str,
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TranscribeRequest<'a> {
    pub audio_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
}
