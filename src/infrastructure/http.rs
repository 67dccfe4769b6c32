// src/infrastructure/http.rs
use crate::application::DiaryBackend;
use crate::domain::{DomainError, Folder, FolderId, NewNote, Note, NoteId, NoteSummary, SearchHit, Tone};
use crate::infrastructure::wire::{
    CreateFolderRequest, CreatedDto, ExportRequest, FolderDto, IdeasRequest, IdeasResponse, NoteDto,
    RewriteRequest, RewriteResponse, SearchRequest, SearchResponse, TranscribeRequest, TranscribeResponse,
    UpdateNoteRequest,
};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, trace};

/// Backend reached over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// `timeout` of `None` lets requests wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let base = Url::parse(base_url)
            .map_err(|e| DomainError::InvalidInput(format!("backend URL {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(DomainError::InvalidInput(format!(
                "backend URL {base_url:?} cannot carry paths"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Network(e.to_string()))?;
        debug!(%base, ?timeout, "Created HTTP backend");
        Ok(Self { client, base })
    }

    /// Resolve an endpoint below the base URL; segments are percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let response = request
            .send()
            .map_err(|e| DomainError::Network(e.to_string()))?;
        let status = response.status();
        trace!(%status, url = %response.url(), "Response");
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().unwrap_or_default();
        Err(DomainError::Server {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                message
            },
        })
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DomainError> {
        self.send(request)?
            .json::<T>()
            .map_err(|e| DomainError::Parse(e.to_string()))
    }

    /// Requests on `/notes/{id}` report a 404 as a missing note.
    fn note_request(&self, request: RequestBuilder, id: &str) -> Result<Response, DomainError> {
        self.send(request).map_err(|err| match err {
            DomainError::Server { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
                DomainError::NoteNotFound(id.to_string())
            }
            other => other,
        })
    }
}

impl DiaryBackend for HttpBackend {
    #[instrument(level = "debug", skip(self))]
    fn list_folders(&mut self) -> Result<Vec<Folder>, DomainError> {
        let folders: Vec<FolderDto> = self.send_json(self.client.get(self.endpoint(&["folders"])))?;
        Ok(folders.into_iter().map(Folder::from).collect())
    }

    #[instrument(level = "debug", skip(self))]
    fn create_folder(&mut self, name: &str, icon: Option<&str>) -> Result<Option<FolderId>, DomainError> {
        let request = self
            .client
            .post(self.endpoint(&["folders"]))
            .json(&CreateFolderRequest { name, icon });
        let body = self.send(request)?.text().unwrap_or_default();
        // The reply may not carry an id
        let id = serde_json::from_str::<CreatedDto>(&body).ok().map(|c| c.id.0);
        info!(name, ?id, "Folder created");
        Ok(id)
    }

    #[instrument(level = "debug", skip(self))]
    fn list_notes(&mut self, folder: Option<&str>) -> Result<Vec<NoteSummary>, DomainError> {
        let mut request = self.client.get(self.endpoint(&["notes"]));
        if let Some(folder_id) = folder {
            request = request.query(&[("folder_id", folder_id)]);
        }
        let notes: Vec<NoteDto> = self.send_json(request)?;
        Ok(notes.into_iter().map(NoteSummary::from).collect())
    }

    #[instrument(level = "debug", skip(self))]
    fn get_note(&mut self, id: &str) -> Result<Note, DomainError> {
        let request = self.client.get(self.endpoint(&["notes", id]));
        let note: NoteDto = self
            .note_request(request, id)?
            .json()
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        Ok(note.into())
    }

    #[instrument(level = "debug", skip(self))]
    fn create_note(&mut self, note: &NewNote) -> Result<NoteId, DomainError> {
        let request = self.client.post(self.endpoint(&["notes"])).json(note);
        let created: CreatedDto = self.send_json(request)?;
        info!(note_id = %created.id.0, "Note created");
        Ok(created.id.0)
    }

    #[instrument(level = "debug", skip(self, content))]
    fn update_note(&mut self, id: &str, title: &str, content: &str) -> Result<(), DomainError> {
        let request = self
            .client
            .patch(self.endpoint(&["notes", id]))
            .json(&UpdateNoteRequest { title, content });
        self.note_request(request, id)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&mut self, id: &str) -> Result<(), DomainError> {
        let request = self.client.delete(self.endpoint(&["notes", id]));
        self.note_request(request, id)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, text))]
    fn rewrite(&mut self, text: &str, tone: Tone) -> Result<String, DomainError> {
        let request = self
            .client
            .post(self.endpoint(&["ai", "rewrite"]))
            .json(&RewriteRequest::new(text, tone));
        let response: RewriteResponse = self.send_json(request)?;
        response.into_text()
    }

    #[instrument(level = "debug", skip(self))]
    fn ideas(&mut self, topic: &str) -> Result<Vec<String>, DomainError> {
        let request = self
            .client
            .post(self.endpoint(&["ai", "ideas"]))
            .json(&IdeasRequest { topic });
        let response: IdeasResponse = self.send_json(request)?;
        Ok(response.ideas)
    }

    #[instrument(level = "debug", skip(self))]
    fn search(&mut self, query: &str, limit: usize) -> Result<Vec<SearchHit>, DomainError> {
        let request = self
            .client
            .post(self.endpoint(&["ai", "search"]))
            .json(&SearchRequest { query, limit });
        let response: SearchResponse = self.send_json(request)?;
        Ok(response.results.into_iter().map(SearchHit::from).collect())
    }

    #[instrument(level = "debug", skip(self))]
    fn export_pdf(&mut self, id: &str, title: &str) -> Result<Vec<u8>, DomainError> {
        let request = self
            .client
            .post(self.endpoint(&["export", "pdf"]))
            .json(&ExportRequest { note_id: id, title });
        let bytes = self
            .send(request)?
            .bytes()
            .map_err(|e| DomainError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    #[instrument(level = "debug", skip(self))]
    fn transcribe(&mut self, audio_url: &str) -> Result<String, DomainError> {
        let request = self
            .client
            .post(self.endpoint(&["transcribe"]))
            .json(&TranscribeRequest { audio_url });
        let response: TranscribeResponse = self.send_json(request)?;
        Ok(response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8000", &["notes", "42"], "http://localhost:8000/notes/42")]
    #[case("http://localhost:8000/", &["folders"], "http://localhost:8000/folders")]
    #[case("https://diary.example/api/", &["ai", "search"], "https://diary.example/api/ai/search")]
    #[case("http://localhost:8000", &["notes", "a/b c"], "http://localhost:8000/notes/a%2Fb%20c")]
    fn given_base_url_when_building_endpoint_then_joins_segments(
        #[case] base: &str,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        let backend = HttpBackend::new(base, None).unwrap();
        assert_eq!(backend.endpoint(segments).as_str(), expected);
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:someone@example.com")]
    fn given_unusable_base_url_when_creating_then_returns_invalid_input(#[case] base: &str) {
        let result = HttpBackend::new(base, None);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }
}
