use axum::{
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use patient_client::common::config::ApiConfig;
use patient_client::common::messages::{PatientId, PatientInput, PatientUpdateInput};
use patient_client::{ClientCore, ClientError, HttpTransport};

// ============================================================================
// STUB API
// ============================================================================

async fn create(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let name = body["name"].as_str().unwrap_or_default();
    if name.chars().count() < 3 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Nome deve ter entre 3 e 100 caracteres" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Paciente criado com sucesso" })),
    )
}

async fn fetch(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    if id != 3 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Paciente não encontrado" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "patient": {
                "id": 3,
                "name": "Alex Costa",
                "birth_date": "1984-05-20",
                "height": 1.7,
                "weight": 68.0,
                "biological_gender": "M"
            },
            "age": 40,
            "bmi": 23.53,
            "bmi_classification": "Normal",
            "basal_metabolic_rate": 1596.25
        })),
    )
}

/// Echoes the received body back in `message`.
async fn update(Path(_id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true, "message": body.to_string() }))
}

async fn remove(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({ "success": true, "message": format!("deleted {}", id) }))
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/api/paciente/criar", post(create))
        .route("/api/paciente/:id", get(fetch))
        .route("/api/paciente/:id/atualizar", put(update))
        .route("/api/paciente/:id/deletar", delete(remove))
        .route("/broken/api/paciente/:id", get(|| async { "<h1>Not Found</h1>" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn core_for(base_url: &str) -> ClientCore<HttpTransport> {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(5),
        ..ApiConfig::default()
    };
    ClientCore::new(HttpTransport::new(&config).unwrap())
}

fn input(name: &str) -> PatientInput {
    PatientInput {
        name: name.to_string(),
        birth_date: "1985-03-14".to_string(),
        gender: "F".to_string(),
        height: "1.65".to_string(),
        weight: "60".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[tokio::test]
async fn create_posts_json_body() {
    let core = core_for(&spawn_stub().await);

    let result = core.create_patient(&input("Maria Silva")).await.unwrap();

    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some("Paciente criado com sucesso"));
}

#[tokio::test]
async fn refusal_with_error_status_is_still_decoded() {
    let core = core_for(&spawn_stub().await);

    let result = core.create_patient(&input("Al")).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.error_message(), "Nome deve ter entre 3 e 100 caracteres");
}

#[tokio::test]
async fn get_decodes_patient_and_metrics() {
    let core = core_for(&spawn_stub().await);

    let result = core.get_patient("3").await.unwrap();

    assert!(result.success);
    let patient = result.patient.unwrap();
    assert_eq!(patient.id, PatientId::Number(3));
    assert_eq!(patient.biological_gender, "M");
    assert_eq!(result.bmi_classification.as_deref(), Some("Normal"));
    assert_eq!(result.basal_metabolic_rate, Some(1596.25));
}

#[tokio::test]
async fn get_unknown_patient_is_a_refusal() {
    let core = core_for(&spawn_stub().await);

    let result = core.get_patient("77").await.unwrap();

    assert!(!result.success);
    assert!(result.patient.is_none());
}

#[tokio::test]
async fn update_sends_pruned_body() {
    let core = core_for(&spawn_stub().await);
    let update = PatientUpdateInput::new(None, Some(String::new()), Some("72".to_string()), None);

    let result = core.update_patient("3", &update).await.unwrap();

    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some(r#"{"weight":"72"}"#));
}

#[tokio::test]
async fn delete_uses_delete_endpoint() {
    let core = core_for(&spawn_stub().await);

    let result = core.delete_patient("3").await.unwrap();

    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some("deleted 3"));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let base = spawn_stub().await;
    let core = core_for(&format!("{}/broken", base));

    let error = core.get_patient("3").await.unwrap_err();

    assert!(matches!(error, ClientError::Decode(_)), "got {:?}", error);
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let core = core_for(&format!("http://{}", addr));

    let error = core.get_patient("3").await.unwrap_err();

    assert!(matches!(error, ClientError::Transport(_)), "got {:?}", error);
}
