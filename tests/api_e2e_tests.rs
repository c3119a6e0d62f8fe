//! Testes ponta a ponta da API HTTP, com o roteador completo sobre o armazenamento em memória.

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use watchmaker::{build_router, AppState};

// =============================================================================
// Helpers
// =============================================================================

struct Seeded {
    server: TestServer,
    brand_id: String,
    repair_type_id: String,
}

fn create_test_server() -> TestServer {
    TestServer::new(build_router(AppState::in_memory())).expect("Failed to create test server")
}

async fn seeded_server() -> Seeded {
    let server = create_test_server();

    let brand: Value = server
        .post("/api/admin/watch-brands")
        .json(&json!({ "name": "Rolex" }))
        .await
        .json();
    let repair_type: Value = server
        .post("/api/admin/repair-types")
        .json(&json!({
            "name": "Troca de Bateria",
            "description": "Bateria nova",
            "estimated_price": 25.0
        }))
        .await
        .json();

    Seeded {
        brand_id: brand["id"].as_str().unwrap().to_string(),
        repair_type_id: repair_type["id"].as_str().unwrap().to_string(),
        server,
    }
}

fn submission_body(s: &Seeded, cpf: &str) -> Value {
    json!({
        "customer_data": {
            "name": "João Souza",
            "cpf": cpf,
            "phone": "(21) 98888-7777",
            "address": "Av. Atlântica, 500",
            "email": "joao@email.com"
        },
        "watch_data": { "brand_id": s.brand_id, "type": "BATTERY" },
        "repair_data": {
            "repair_type_ids": [s.repair_type_id],
            "problem_description": "Não liga"
        },
        "create_customer_account": true
    })
}

// =============================================================================
// Health / formulário
// =============================================================================

#[tokio::test]
async fn health_reports_healthy() {
    let server = create_test_server();

    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn form_data_hides_inactive_entries() {
    let s = seeded_server().await;
    s.server
        .post("/api/admin/watch-brands")
        .json(&json!({ "name": "Casio", "is_active": false }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = s.server.get("/api/repair-form/data").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let brands = body["watch_brands"].as_array().unwrap();
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0]["name"], "Rolex");
    assert_eq!(body["repair_types"].as_array().unwrap().len(), 1);

    let all: Vec<Value> = s.server.get("/api/admin/watch-brands").await.json();
    assert_eq!(all.len(), 2);
}

// =============================================================================
// Submissão e acompanhamento
// =============================================================================

#[tokio::test]
async fn submit_then_track_by_reference() {
    let s = seeded_server().await;

    let response = s
        .server
        .post("/api/repair-requests")
        .json(&submission_body(&s, "529.982.247-25"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["customer_account_created"], true);
    assert_eq!(body["repair_request"]["status"], "PENDING");
    let reference = body["repair_request"]["reference_number"].as_str().unwrap().to_string();
    let id = body["repair_request"]["id"].as_str().unwrap().to_string();

    let by_reference: Value = s
        .server
        .get(&format!("/api/repair-requests/reference/{}/status", reference))
        .await
        .json();
    assert_eq!(by_reference["id"], id.as_str());
    assert_eq!(by_reference["watch_brand"], "Rolex");
    assert_eq!(by_reference["repair_types"], json!(["Troca de Bateria"]));
    assert!(by_reference["notes"].is_null());

    let by_key = s.server.get(&format!("/api/repair-requests/{}/status", reference)).await;
    by_key.assert_status_ok();
    let by_id = s.server.get(&format!("/api/repair-requests/{}/status", id)).await;
    by_id.assert_status_ok();

    let check: Value = s
        .server
        .get("/api/customers/check?cpf=52998224725")
        .await
        .json();
    assert_eq!(check["exists"], true);
    assert_eq!(check["customer"]["cpf"], "529.982.247-25");
}

#[tokio::test]
async fn invalid_cpf_is_a_bad_request() {
    let s = seeded_server().await;

    let response = s
        .server
        .post("/api/repair-requests")
        .json(&submission_body(&s, "529.982.247-26"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_document");
}

#[tokio::test]
async fn decorated_cpf_is_accepted_and_stored_canonical() {
    let s = seeded_server().await;

    for raw in [" 111.444.777-35 ", "CPF 111.444.777-35"] {
        let response = s
            .server
            .post("/api/repair-requests")
            .json(&submission_body(&s, raw))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        let id = body["repair_request"]["id"].as_str().unwrap().to_string();
        let detail: Value = s
            .server
            .get(&format!("/api/admin/repair-requests/{}", id))
            .await
            .json();
        assert_eq!(detail["customer_cpf"], "111.444.777-35");
    }
}

#[tokio::test]
async fn missing_fields_report_validation_details() {
    let s = seeded_server().await;
    let mut body = submission_body(&s, "529.982.247-25");
    body["repair_data"]["repair_type_ids"] = json!([]);

    let response = s.server.post("/api/repair-requests").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
    assert!(body["details"]["repair_data.repair_type_ids"].is_array());
}

#[tokio::test]
async fn unknown_request_is_not_found() {
    let server = create_test_server();

    let response = server
        .get(&format!("/api/repair-requests/{}/status", Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/api/repair-requests/reference/REP-2020-001/status").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let server = create_test_server();

    let response = server.get("/api/admin/repair-requests/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "malformed_identifier");
    assert_eq!(body["details"]["value"], "not-a-uuid");
}

#[tokio::test]
async fn error_messages_follow_accept_language() {
    let server = create_test_server();

    let response = server
        .get(&format!("/api/repair-requests/{}/status", Uuid::new_v4()))
        .add_header(header::ACCEPT_LANGUAGE, HeaderValue::from_static("pt-BR,pt;q=0.9"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Recurso não encontrado.");

    let response = server
        .get(&format!("/api/repair-requests/{}/status", Uuid::new_v4()))
        .await;
    let body: Value = response.json();
    assert_eq!(body["error"], "Resource not found.");
}

// =============================================================================
// Administração
// =============================================================================

#[tokio::test]
async fn admin_update_reveals_notes_to_customer() {
    let s = seeded_server().await;
    let created: Value = s
        .server
        .post("/api/repair-requests")
        .json(&submission_body(&s, "111.444.777-35"))
        .await
        .json();
    let id = created["repair_request"]["id"].as_str().unwrap().to_string();

    let response = s
        .server
        .put(&format!("/api/admin/repair-requests/{}", id))
        .json(&json!({
            "status": "IN_PROGRESS",
            "total_price": 350.0,
            "internal_notes": "Bateria trocada, em teste de vedação"
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let view: Value = s
        .server
        .get(&format!("/api/repair-requests/{}/status", id))
        .await
        .json();
    assert_eq!(view["status"], "IN_PROGRESS");
    assert_eq!(view["notes"], "Bateria trocada, em teste de vedação");

    let detail: Value = s
        .server
        .get(&format!("/api/admin/repair-requests/{}", id))
        .await
        .json();
    assert_eq!(detail["customer_cpf"], "111.444.777-35");
    assert_eq!(detail["status"], "IN_PROGRESS");
}

#[tokio::test]
async fn admin_update_rejects_unknown_status() {
    let s = seeded_server().await;
    let created: Value = s
        .server
        .post("/api/repair-requests")
        .json(&submission_body(&s, "111.444.777-35"))
        .await
        .json();
    let id = created["repair_request"]["id"].as_str().unwrap().to_string();

    let response = s
        .server
        .put(&format!("/api/admin/repair-requests/{}", id))
        .json(&json!({ "status": "SHIPPED", "internal_notes": "x" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_status");

    let detail: Value = s
        .server
        .get(&format!("/api/admin/repair-requests/{}", id))
        .await
        .json();
    assert_eq!(detail["status"], "PENDING");
    assert!(detail["internal_notes"].is_null());
}

#[tokio::test]
async fn admin_list_validates_query() {
    let s = seeded_server().await;
    for _ in 0..3 {
        s.server
            .post("/api/repair-requests")
            .json(&submission_body(&s, "111.444.777-35"))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = s.server.get("/api/admin/repair-requests?limit=2").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["repair_requests"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total_items"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);

    s.server
        .get("/api/admin/repair-requests?status=LOST")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    s.server
        .get("/api/admin/repair-requests?limit=500")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    s.server
        .get("/api/admin/repair-requests?page=0")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_brand_name_is_a_conflict() {
    let s = seeded_server().await;

    let response = s
        .server
        .post("/api/admin/watch-brands")
        .json(&json!({ "name": "Rolex" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "duplicate_brand_name");
}

#[tokio::test]
async fn deactivating_catalog_entries() {
    let s = seeded_server().await;

    s.server
        .delete(&format!("/api/admin/watch-brands/{}", s.brand_id))
        .await
        .assert_status_ok();
    s.server
        .delete(&format!("/api/admin/repair-types/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = s
        .server
        .post("/api/repair-requests")
        .json(&submission_body(&s, "111.444.777-35"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_brand");
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let server = create_test_server();

    server
        .post("/api/admin/repair-types")
        .json(&json!({ "name": "Polimento", "estimated_price": -10.0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/api/repair-requests"].is_object());
}
