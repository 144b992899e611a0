//! Catalog API client
//!
//! Thin blocking HTTP client for the course-catalog backend. Bodies are JSON
//! except the spreadsheet upload (multipart) and the PDF export response
//! (raw bytes). The backend wraps every JSON response in a `success`
//! envelope and reports failures through an `error` field, which is
//! surfaced verbatim.

use crate::model::catalog::SearchScope;
use crate::model::course::{Course, CourseDraft, FilterOptions, UploadReport};
use chrono::Local;
use reqwest::blocking::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Failure taxonomy for backend calls. Every variant is terminal at the
/// triggering user action; callers leave local state untouched on error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The backend answered and reported a failure message.
    #[error("{0}")]
    Backend(String),
    /// Non-success status without a parseable error body.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// Local file I/O around upload/export.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Optional server-side filters for the list endpoint. The app normally
/// refreshes unfiltered and filters locally, but the pass-through query is
/// part of the API surface.
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
    pub area: Option<String>,
    pub methodology: Option<String>,
    pub tier: Option<String>,
    pub search: Option<String>,
    pub scope: Option<SearchScope>,
}

impl CourseQuery {
    fn as_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref area) = self.area {
            pairs.push(("area", area.clone()));
        }
        if let Some(ref methodology) = self.methodology {
            pairs.push(("metodologia", methodology.clone()));
        }
        if let Some(ref tier) = self.tier {
            pairs.push(("faixa", tier.clone()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("busca", search.clone()));
        }
        if let Some(scope) = self.scope {
            pairs.push(("tipo_busca", scope.query_value().to_string()));
        }
        pairs
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire envelopes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    cursos: Vec<Course>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OptionsEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    opcoes: FilterOptions,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CourseEnvelope {
    #[serde(default)]
    success: bool,
    curso: Option<Course>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(flatten)]
    report: UploadReport,
    #[serde(default)]
    error: Option<String>,
}

fn backend_failure(error: Option<String>) -> ApiError {
    ApiError::Backend(error.unwrap_or_else(|| "request failed".to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Blocking client bound to one API base URL (e.g. `http://host:5000/api`).
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a JSON response, mapping non-2xx statuses to the backend's
    /// own error message when one is present.
    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json()?)
        } else {
            match response.json::<ErrorBody>() {
                Ok(ErrorBody { error: Some(msg) }) => Err(ApiError::Backend(msg)),
                _ => Err(ApiError::Status(status.as_u16())),
            }
        }
    }

    /// `GET /cursos` — the full catalog, optionally filtered server-side.
    pub fn list(&self, query: &CourseQuery) -> Result<Vec<Course>, ApiError> {
        let response = self
            .http
            .get(self.url("/cursos"))
            .query(&query.as_pairs())
            .send()?;
        let envelope: ListEnvelope = Self::decode(response)?;
        if envelope.success {
            Ok(envelope.cursos)
        } else {
            Err(backend_failure(envelope.error))
        }
    }

    /// `GET /cursos/opcoes` — distinct values for the dimension filters.
    pub fn options(&self) -> Result<FilterOptions, ApiError> {
        let response = self.http.get(self.url("/cursos/opcoes")).send()?;
        let envelope: OptionsEnvelope = Self::decode(response)?;
        if envelope.success {
            Ok(envelope.opcoes)
        } else {
            Err(backend_failure(envelope.error))
        }
    }

    /// `POST /cursos` — create a course.
    pub fn create(&self, draft: &CourseDraft) -> Result<String, ApiError> {
        let response = self.http.post(self.url("/cursos")).json(draft).send()?;
        let envelope: CourseEnvelope = Self::decode(response)?;
        if envelope.success && envelope.curso.is_some() {
            Ok(envelope
                .message
                .unwrap_or_else(|| "Course created".to_string()))
        } else {
            Err(backend_failure(envelope.error))
        }
    }

    /// `PUT /cursos/{id}` — partial update; only the draft's present fields
    /// are sent.
    pub fn update(&self, id: i64, draft: &CourseDraft) -> Result<String, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/cursos/{id}")))
            .json(draft)
            .send()?;
        let envelope: CourseEnvelope = Self::decode(response)?;
        if envelope.success {
            Ok(envelope
                .message
                .unwrap_or_else(|| "Course updated".to_string()))
        } else {
            Err(backend_failure(envelope.error))
        }
    }

    /// `DELETE /cursos/{id}` — permanent removal.
    pub fn delete(&self, id: i64) -> Result<String, ApiError> {
        let response = self.http.delete(self.url(&format!("/cursos/{id}"))).send()?;
        let envelope: MessageEnvelope = Self::decode(response)?;
        if envelope.success {
            Ok(envelope
                .message
                .unwrap_or_else(|| "Course deleted".to_string()))
        } else {
            Err(backend_failure(envelope.error))
        }
    }

    /// `POST /cursos/upload` — multipart spreadsheet upload. The backend
    /// parses the sheet; we only pass the file through.
    pub fn upload(&self, file: &Path) -> Result<UploadReport, ApiError> {
        let form = multipart::Form::new().file("arquivo", file)?;
        let response = self
            .http
            .post(self.url("/cursos/upload"))
            .multipart(form)
            .send()?;
        let envelope: UploadEnvelope = Self::decode(response)?;
        if envelope.success {
            Ok(envelope.report)
        } else {
            Err(backend_failure(envelope.error))
        }
    }

    /// `POST /cursos/export/pdf` — download the generated report for the
    /// given ids into `dest_dir`, returning the written path.
    pub fn export_pdf(
        &self,
        ids: &[i64],
        design: &str,
        title: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, ApiError> {
        let body = serde_json::json!({
            "curso_ids": ids,
            "design": design,
            "titulo": title,
        });
        let response = self
            .http
            .post(self.url("/cursos/export/pdf"))
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return match response.json::<ErrorBody>() {
                Ok(ErrorBody { error: Some(msg) }) => Err(ApiError::Backend(msg)),
                _ => Err(ApiError::Status(status.as_u16())),
            };
        }

        let bytes = response.bytes()?;
        let filename = format!(
            "course_report_{}_{}.pdf",
            design,
            Local::now().format("%Y-%m-%d_%H%M%S")
        );
        let path = dest_dir.join(filename);
        std::fs::write(&path, &bytes)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = CatalogClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.url("/cursos"), "http://localhost:5000/api/cursos");
    }

    #[test]
    fn test_query_pairs_use_wire_names() {
        let query = CourseQuery {
            tier: Some("Alto".to_string()),
            search: Some("mba".to_string()),
            scope: Some(SearchScope::Name),
            ..Default::default()
        };
        let pairs = query.as_pairs();
        assert!(pairs.contains(&("faixa", "Alto".to_string())));
        assert!(pairs.contains(&("busca", "mba".to_string())));
        assert!(pairs.contains(&("tipo_busca", "curso".to_string())));
    }

    #[test]
    fn test_list_envelope_parses() {
        let json = r#"{
            "success": true,
            "cursos": [
                {"id": 1, "nome": "A", "area": "X", "metodologia": "EAD", "faixa": "Baixo"}
            ],
            "total": 1
        }"#;
        let envelope: ListEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.cursos.len(), 1);
        assert_eq!(envelope.cursos[0].name, "A");
    }

    #[test]
    fn test_upload_envelope_flattens_report() {
        let json = r#"{
            "success": true,
            "cursos_adicionados": 3,
            "erros": ["Linha 4: Nome do curso é obrigatório"]
        }"#;
        let envelope: UploadEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.report.courses_added, 3);
        assert_eq!(envelope.report.errors.len(), 1);
    }

    #[test]
    fn test_options_envelope_parses() {
        let json = r#"{
            "success": true,
            "opcoes": {
                "areas": ["Gestão"],
                "metodologias": ["EAD", "Presencial"],
                "faixas": ["Baixo", "Alto"]
            }
        }"#;
        let envelope: OptionsEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.opcoes.methodologies.len(), 2);
        assert_eq!(envelope.opcoes.tiers, vec!["Baixo", "Alto"]);
    }
}
