//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api";

/// Unique suffix so tests can re-run against the same database
fn unique() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

/// Register a fresh administrator and return its bearer token
async fn get_admin_token(client: &Client) -> String {
    let email = format!("admin-{}@orquesta.test", unique());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "nombre": "Admin de prueba",
            "email": email,
            "password": "secreto1",
            "rol": "Administrador"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "secreto1"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Create a program, a student enrolled in it, and an available instrument;
/// returns (student_id, instrument_id)
async fn seed_student_and_instrument(client: &Client, token: &str) -> (i64, i64) {
    let suffix = unique();

    let response = client
        .post(format!("{}/programas", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "nombre": format!("Programa {}", suffix) }))
        .send()
        .await
        .expect("Failed to create program");
    assert_eq!(response.status(), 201);
    let program: Value = response.json().await.expect("Failed to parse program");
    let program_id = program["id_programa"].as_i64().expect("No program ID");

    let response = client
        .post(format!("{}/alumnos", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "nombre": format!("Alumno {}", suffix),
            "fecha_nacimiento": "2010-05-14",
            "id_programa": program_id
        }))
        .send()
        .await
        .expect("Failed to create student");
    assert_eq!(response.status(), 201);
    let student: Value = response.json().await.expect("Failed to parse student");
    let student_id = student["id_alumno"].as_i64().expect("No student ID");

    let response = client
        .post(format!("{}/instrumentos", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "nombre": "Violín",
            "categoria": "Cuerdas",
            "numero_serie": format!("VLN-{}", suffix)
        }))
        .send()
        .await
        .expect("Failed to create instrument");
    assert_eq!(response.status(), 201);
    let instrument: Value = response.json().await.expect("Failed to parse instrument");
    let instrument_id = instrument["id_instrumento"].as_i64().expect("No instrument ID");

    (student_id, instrument_id)
}

async fn instrument_state(client: &Client, token: &str, id: i64) -> String {
    let response = client
        .get(format!("{}/instrumentos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get instrument");
    let body: Value = response.json().await.expect("Failed to parse instrument");
    body["estado"].as_str().expect("No estado").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let email = format!("login-{}@orquesta.test", unique());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "nombre": "Usuario de prueba",
            "email": email,
            "password": "secreto1",
            "rol": "Consulta"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "secreto1" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["rol"], "Consulta");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "nadie@orquesta.test",
            "password": "incorrecta"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_missing_and_invalid_tokens() {
    let client = Client::new();

    // No token at all
    let response = client
        .get(format!("{}/instrumentos", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    // Garbage token
    let response = client
        .get(format!("{}/instrumentos", BASE_URL))
        .header("Authorization", "Bearer no-es-un-token")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_read_only_role_cannot_mutate() {
    let client = Client::new();
    let email = format!("consulta-{}@orquesta.test", unique());

    client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "nombre": "Solo lectura",
            "email": email,
            "password": "secreto1",
            "rol": "Consulta"
        }))
        .send()
        .await
        .expect("Failed to register");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "secreto1" }))
        .send()
        .await
        .expect("Failed to login");
    let body: Value = response.json().await.expect("Failed to parse login");
    let token = body["token"].as_str().expect("No token");

    // Reads are allowed
    let response = client
        .get(format!("{}/programas", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list programs");
    assert!(response.status().is_success());

    // Writes are not
    let response = client
        .post(format!("{}/programas", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "nombre": "No permitido" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_checkout_and_return_lifecycle() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let (student_id, instrument_id) = seed_student_and_instrument(&client, &token).await;

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "Disponible");

    // Checkout
    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "id_alumno": student_id,
            "fecha_asignacion": "2024-01-10"
        }))
        .send()
        .await
        .expect("Failed to create assignment");
    assert_eq!(response.status(), 201);
    let assignment: Value = response.json().await.expect("Failed to parse assignment");
    let assignment_id = assignment["id_asignacion"].as_i64().expect("No assignment ID");
    assert!(assignment["fecha_devolucion"].is_null());

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "Asignado");

    // A second checkout of the same instrument conflicts
    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "id_alumno": student_id,
            "fecha_asignacion": "2024-01-11"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Return
    let response = client
        .post(format!("{}/asignaciones/{}/devolver", BASE_URL, assignment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "fecha_devolucion": "2024-03-01" }))
        .send()
        .await
        .expect("Failed to return instrument");
    assert!(response.status().is_success());
    let returned: Value = response.json().await.expect("Failed to parse return");
    assert_eq!(returned["fecha_devolucion"], "2024-03-01");

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "Disponible");

    // Returning twice conflicts
    let response = client
        .post(format!("{}/asignaciones/{}/devolver", BASE_URL, assignment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_maintenance_blocks_checkout() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let (student_id, instrument_id) = seed_student_and_instrument(&client, &token).await;

    // Send the instrument to maintenance
    let response = client
        .post(format!("{}/movimientos", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "tipo_movimiento": "Mantenimiento",
            "fecha_movimiento": "2024-02-01",
            "responsable": "Luthier"
        }))
        .send()
        .await
        .expect("Failed to create movement");
    assert_eq!(response.status(), 201);

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "Mantenimiento");

    // Checkout is rejected while in maintenance
    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "id_alumno": student_id,
            "fecha_asignacion": "2024-02-02"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Re-entry makes it available again
    let response = client
        .post(format!("{}/movimientos", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "tipo_movimiento": "Reingreso",
            "fecha_movimiento": "2024-02-15",
            "responsable": "Luthier"
        }))
        .send()
        .await
        .expect("Failed to create movement");
    assert_eq!(response.status(), 201);

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "Disponible");
}

#[tokio::test]
#[ignore]
async fn test_retirement_always_applies() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let (student_id, instrument_id) = seed_student_and_instrument(&client, &token).await;

    // Check the instrument out first
    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "id_alumno": student_id,
            "fecha_asignacion": "2024-01-10"
        }))
        .send()
        .await
        .expect("Failed to create assignment");
    assert_eq!(response.status(), 201);
    let assignment: Value = response.json().await.expect("Failed to parse assignment");
    let assignment_id = assignment["id_asignacion"].as_i64().expect("No assignment ID");

    // Retirement is accepted even while the instrument is out
    let response = client
        .post(format!("{}/movimientos", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "tipo_movimiento": "Baja",
            "fecha_movimiento": "2024-02-01",
            "responsable": "Inventario"
        }))
        .send()
        .await
        .expect("Failed to create movement");
    assert_eq!(response.status(), 201);

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "De Baja");

    // The return does not resurrect a retired instrument
    let response = client
        .post(format!("{}/asignaciones/{}/devolver", BASE_URL, assignment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "fecha_devolucion": "2024-03-01" }))
        .send()
        .await
        .expect("Failed to return instrument");
    assert!(response.status().is_success());

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "De Baja");
}

#[tokio::test]
#[ignore]
async fn test_deleting_open_assignment_frees_instrument() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let (student_id, instrument_id) = seed_student_and_instrument(&client, &token).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "id_alumno": student_id,
            "fecha_asignacion": "2024-01-10"
        }))
        .send()
        .await
        .expect("Failed to create assignment");
    assert_eq!(response.status(), 201);
    let assignment: Value = response.json().await.expect("Failed to parse assignment");
    let assignment_id = assignment["id_asignacion"].as_i64().expect("No assignment ID");

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "Asignado");

    let response = client
        .delete(format!("{}/asignaciones/{}", BASE_URL, assignment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete assignment");
    assert_eq!(response.status(), 204);

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "Disponible");
}

#[tokio::test]
#[ignore]
async fn test_instrument_with_history_cannot_be_deleted() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let (student_id, instrument_id) = seed_student_and_instrument(&client, &token).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "id_instrumento": instrument_id,
            "id_alumno": student_id,
            "fecha_asignacion": "2024-01-10",
            "fecha_devolucion": "2024-02-10"
        }))
        .send()
        .await
        .expect("Failed to create assignment");
    assert_eq!(response.status(), 201);

    let response = client
        .delete(format!("{}/instrumentos/{}", BASE_URL, instrument_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_number_conflicts() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let serial = format!("CELLO-{}", unique());

    for expected in [201u16, 409] {
        let response = client
            .post(format!("{}/instrumentos", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "nombre": "Violonchelo",
                "categoria": "Cuerdas",
                "numero_serie": serial
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
#[ignore]
async fn test_concurrent_checkouts_single_winner() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let (student_id, instrument_id) = seed_student_and_instrument(&client, &token).await;

    let checkout = |fecha: &'static str| {
        let client = client.clone();
        let token = token.clone();
        async move {
            client
                .post(format!("{}/asignaciones", BASE_URL))
                .header("Authorization", format!("Bearer {}", token))
                .json(&json!({
                    "id_instrumento": instrument_id,
                    "id_alumno": student_id,
                    "fecha_asignacion": fecha
                }))
                .send()
                .await
                .expect("Failed to send request")
                .status()
                .as_u16()
        }
    };

    let (first, second) = tokio::join!(checkout("2024-01-10"), checkout("2024-01-10"));

    let mut statuses = [first, second];
    statuses.sort();
    assert_eq!(statuses, [201, 409]);

    assert_eq!(instrument_state(&client, &token, instrument_id).await, "Asignado");

    // Exactly one open assignment for this instrument
    let response = client
        .get(format!("{}/asignaciones", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list assignments");
    let assignments: Vec<Value> = response.json().await.expect("Failed to parse assignments");
    let open = assignments
        .iter()
        .filter(|a| {
            a["id_instrumento"].as_i64() == Some(instrument_id)
                && a["fecha_devolucion"].is_null()
        })
        .count();
    assert_eq!(open, 1);
}
