//! Course records and API wire types
//!
//! Field names on the wire are the backend's Portuguese names; the structs
//! keep English names via serde renames.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A catalog entry as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    /// Optional knowledge area; null or empty means unassigned.
    #[serde(default)]
    pub area: Option<String>,
    #[serde(rename = "metodologia")]
    pub methodology: String,
    #[serde(rename = "faixa")]
    pub tier: String,
    #[serde(rename = "data_criacao", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Course {
    /// Area value for filtering; unassigned compares as the empty string.
    pub fn area_value(&self) -> &str {
        self.area.as_deref().unwrap_or("")
    }

    /// Area text for display.
    pub fn area_label(&self) -> &str {
        match self.area.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => "unassigned",
        }
    }
}

/// Fields for create/update requests. All optional so updates stay partial;
/// absent fields are omitted from the JSON body entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseDraft {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(rename = "metodologia", skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    #[serde(rename = "faixa", skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

/// Distinct values available for the dimension filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(rename = "metodologias", default)]
    pub methodologies: Vec<String>,
    #[serde(rename = "faixas", default)]
    pub tiers: Vec<String>,
}

/// Result of a spreadsheet upload: how many rows landed, plus per-row errors
/// reported verbatim by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReport {
    #[serde(rename = "cursos_adicionados", default)]
    pub courses_added: usize,
    #[serde(rename = "erros", default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_record() {
        let json = r#"{
            "id": 7,
            "nome": "MBA em Gestão",
            "area": "Gestão",
            "metodologia": "EAD",
            "faixa": "Alto",
            "data_criacao": "2025-01-15T10:30:00",
            "ativo": true
        }"#;

        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.id, 7);
        assert_eq!(course.name, "MBA em Gestão");
        assert_eq!(course.methodology, "EAD");
        assert_eq!(course.tier, "Alto");
        assert!(course.active);
    }

    #[test]
    fn test_null_area_is_unassigned() {
        let json = r#"{"id": 1, "nome": "A", "area": null, "metodologia": "EAD", "faixa": "Baixo"}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.area_value(), "");
        assert_eq!(course.area_label(), "unassigned");
    }

    #[test]
    fn test_draft_serializes_only_present_fields() {
        let draft = CourseDraft {
            name: Some("Novo".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({"nome": "Novo"}));
    }
}
