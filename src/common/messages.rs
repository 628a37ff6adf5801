//! # API Messages
//!
//! Defines the JSON payloads exchanged with the patient API:
//! - Request bodies built from form input (create and partial update)
//! - The `success`/`error` envelope every endpoint answers with
//! - The patient record and the server-computed metrics that accompany it
//!
//! Requests are only built through the per-endpoint constructors on
//! [`ApiRequest`], so method, path and body always agree.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ClientResult;

/// Root of every patient endpoint.
pub const PATIENT_API_ROOT: &str = "/api/paciente";

// ============================================================================
// REQUEST BODIES
// ============================================================================

/// Input for creating a patient, taken verbatim from the form.
///
/// All values travel as the raw strings the user typed; the server does the
/// parsing and range checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInput {
    pub name: String,
    /// Expected as `YYYY-MM-DD`
    pub birth_date: String,
    /// `"M"` or `"F"`
    pub gender: String,
    /// Meters
    pub height: String,
    /// Kilograms
    pub weight: String,
}

/// Partial update carrying only the fields the user filled in.
///
/// Absent fields are left out of the JSON body entirely, so `{"height": "1.80"}`
/// only touches the height.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl PatientUpdateInput {
    /// Builds an update from raw form values, treating empty strings as absent.
    pub fn new(
        name: Option<String>,
        height: Option<String>,
        weight: Option<String>,
        gender: Option<String>,
    ) -> Self {
        Self {
            name: non_empty(name),
            height: non_empty(height),
            weight: non_empty(weight),
            gender: non_empty(gender),
        }
    }

    /// True when no field survived pruning.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.height.is_none() && self.weight.is_none() && self.gender.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// RESPONSES
// ============================================================================

/// Patient identifier as the server hands it out.
///
/// The client never does arithmetic on it, so both numeric and textual ids are
/// accepted and rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatientId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientId::Number(n) => write!(f, "{}", n),
            PatientId::Text(s) => f.write_str(s),
        }
    }
}

/// A stored patient, owned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatientRecord {
    pub id: PatientId,
    pub name: String,
    pub height: f64,
    pub weight: f64,
    pub biological_gender: String,
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// Envelope returned by every endpoint.
///
/// `success == true` carries the operation's data; `success == false` carries
/// a human-readable `error`. A missing `success` field reads as a failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiResult {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    pub patient: Option<PatientRecord>,
    pub age: Option<i64>,
    pub bmi: Option<f64>,
    pub bmi_classification: Option<String>,
    pub basal_metabolic_rate: Option<f64>,
}

impl ApiResult {
    /// The server's error string, or a placeholder when it sent none.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("erro desconhecido")
    }
}

/// Display label for a biological gender code.
///
/// Only `"M"` maps to "Masculino"; every other value, including unexpected
/// ones, falls back to "Feminino".
pub fn gender_label(code: &str) -> &'static str {
    if code == "M" {
        "Masculino"
    } else {
        "Feminino"
    }
}

// ============================================================================
// REQUESTS
// ============================================================================

/// HTTP verbs used by the patient API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// A single request against the patient API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// `POST /api/paciente/criar`
    pub fn create(input: &PatientInput) -> ClientResult<Self> {
        Ok(Self {
            method: Method::Post,
            path: format!("{}/criar", PATIENT_API_ROOT),
            body: Some(serde_json::to_value(input)?),
        })
    }

    /// `GET /api/paciente/{id}`
    pub fn get(patient_id: &str) -> Self {
        Self {
            method: Method::Get,
            path: format!("{}/{}", PATIENT_API_ROOT, patient_id),
            body: None,
        }
    }

    /// `PUT /api/paciente/{id}/atualizar`
    pub fn update(patient_id: &str, update: &PatientUpdateInput) -> ClientResult<Self> {
        Ok(Self {
            method: Method::Put,
            path: format!("{}/{}/atualizar", PATIENT_API_ROOT, patient_id),
            body: Some(serde_json::to_value(update)?),
        })
    }

    /// `DELETE /api/paciente/{id}/deletar`
    pub fn delete(patient_id: &str) -> Self {
        Self {
            method: Method::Delete,
            path: format!("{}/{}/deletar", PATIENT_API_ROOT, patient_id),
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_input_drops_empty_fields() {
        let update = PatientUpdateInput::new(
            Some(String::new()),
            Some("1.80".to_string()),
            None,
            Some(String::new()),
        );

        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "height": "1.80" }));
    }

    #[test]
    fn update_input_with_only_blanks_is_empty() {
        let update = PatientUpdateInput::new(
            Some(String::new()),
            Some(String::new()),
            Some(String::new()),
            None,
        );
        assert!(update.is_empty());
    }

    #[test]
    fn gender_label_falls_back_to_feminino() {
        assert_eq!(gender_label("M"), "Masculino");
        assert_eq!(gender_label("F"), "Feminino");
        assert_eq!(gender_label("X"), "Feminino");
        assert_eq!(gender_label("m"), "Feminino");
    }

    #[test]
    fn api_result_decodes_failure_envelope() {
        let result: ApiResult =
            serde_json::from_value(json!({ "success": false, "error": "Paciente não encontrado" }))
                .unwrap();

        assert!(!result.success);
        assert_eq!(result.error_message(), "Paciente não encontrado");
        assert!(result.patient.is_none());
    }

    #[test]
    fn api_result_decodes_patient_with_null_metrics() {
        let result: ApiResult = serde_json::from_value(json!({
            "success": true,
            "patient": {
                "id": 7,
                "name": "Ana Souza",
                "birth_date": "1990-04-02",
                "height": 1.62,
                "weight": 58.0,
                "biological_gender": "F"
            },
            "age": null,
            "bmi": 22.1,
            "bmi_classification": "Normal",
            "basal_metabolic_rate": null
        }))
        .unwrap();

        let patient = result.patient.unwrap();
        assert_eq!(patient.id, PatientId::Number(7));
        assert_eq!(patient.birth_date.as_deref(), Some("1990-04-02"));
        assert_eq!(result.age, None);
        assert_eq!(result.bmi, Some(22.1));
    }

    #[test]
    fn missing_success_reads_as_failure() {
        let result: ApiResult = serde_json::from_value(json!({})).unwrap();
        assert!(!result.success);
        assert_eq!(result.error_message(), "erro desconhecido");
    }

    #[test]
    fn textual_ids_render_verbatim() {
        let id: PatientId = serde_json::from_value(json!("abc-1")).unwrap();
        assert_eq!(id.to_string(), "abc-1");
    }

    #[test]
    fn request_paths_match_endpoints() {
        assert_eq!(ApiRequest::get("3").path, "/api/paciente/3");
        assert_eq!(ApiRequest::delete("3").path, "/api/paciente/3/deletar");
        assert_eq!(ApiRequest::delete("3").method, Method::Delete);

        let update = PatientUpdateInput::new(Some("Rui".into()), None, None, None);
        let request = ApiRequest::update("3", &update).unwrap();
        assert_eq!(request.path, "/api/paciente/3/atualizar");
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.body, Some(json!({ "name": "Rui" })));
    }
}
