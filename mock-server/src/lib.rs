//! In-memory implementation of the clinic API used by the client's
//! integration tests.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatient {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub size: u64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Physician,
    Nurse,
    Therapist,
    Administrator,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    pub role: StaffRole,
}

#[derive(Deserialize)]
pub struct CreateStaffMember {
    pub name: String,
    pub role: StaffRole,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enlistment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub staff_member_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnlistment {
    pub patient_id: Uuid,
    pub staff_member_id: Uuid,
    pub note: Option<String>,
}

#[derive(Default)]
pub struct Store {
    patients: HashMap<Uuid, Patient>,
    documents: HashMap<Uuid, (Document, Vec<u8>)>,
    staff: HashMap<Uuid, StaffMember>,
    enlistments: HashMap<Uuid, Enlistment>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/{id}",
            get(get_patient).patch(update_patient).delete(delete_patient),
        )
        .route("/patients/{id}/documents", post(upload_document))
        .route("/staff", get(list_staff).post(create_staff))
        .route("/staff/{id}", get(get_staff))
        .route("/enlistments", get(list_enlistments).post(create_enlistment))
        .route("/enlistments/{id}", delete(delete_enlistment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- patients ---

async fn list_patients(State(db): State<Db>) -> Json<Vec<Patient>> {
    let store = db.read().await;
    Json(store.patients.values().cloned().collect())
}

async fn create_patient(
    State(db): State<Db>,
    Json(input): Json<CreatePatient>,
) -> (StatusCode, Json<Patient>) {
    let patient = Patient {
        id: Uuid::new_v4(),
        first_name: input.first_name,
        last_name: input.last_name,
        date_of_birth: input.date_of_birth,
        email: input.email,
    };
    tracing::info!(id = %patient.id, "patient created");
    db.write().await.patients.insert(patient.id, patient.clone());
    (StatusCode::CREATED, Json(patient))
}

async fn get_patient(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, StatusCode> {
    let store = db.read().await;
    store.patients.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_patient(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePatient>,
) -> Result<Json<Patient>, StatusCode> {
    let mut store = db.write().await;
    let patient = store.patients.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(first_name) = input.first_name {
        patient.first_name = first_name;
    }
    if let Some(last_name) = input.last_name {
        patient.last_name = last_name;
    }
    if let Some(date_of_birth) = input.date_of_birth {
        patient.date_of_birth = Some(date_of_birth);
    }
    if let Some(email) = input.email {
        patient.email = Some(email);
    }
    Ok(Json(patient.clone()))
}

/// Deleting a patient also drops their documents and enlistments.
async fn delete_patient(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.patients.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    store.enlistments.retain(|_, enlistment| enlistment.patient_id != id);
    store.documents.retain(|_, (document, _)| document.patient_id != id);
    tracing::info!(%id, "patient deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn upload_document(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Document>), StatusCode> {
    let boundary = multipart_boundary(&headers).ok_or(StatusCode::BAD_REQUEST)?;
    let contents = file_part(&body, boundary).ok_or(StatusCode::BAD_REQUEST)?;

    let mut store = db.write().await;
    if !store.patients.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let document = Document {
        id: Uuid::new_v4(),
        patient_id: id,
        size: contents.len() as u64,
    };
    store
        .documents
        .insert(document.id, (document.clone(), contents.to_vec()));
    tracing::info!(patient = %id, size = document.size, "document stored");
    Ok((StatusCode::CREATED, Json(document)))
}

/// Extract the `boundary` parameter of a `multipart/form-data` content type.
fn multipart_boundary(headers: &HeaderMap) -> Option<&str> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let params = content_type.strip_prefix("multipart/form-data")?;
    params
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("boundary="))
        .filter(|boundary| !boundary.is_empty())
}

/// Return the payload of the single `file` part in `body`.
fn file_part<'a>(body: &'a [u8], boundary: &str) -> Option<&'a [u8]> {
    let opening = format!("--{boundary}\r\n");
    let closing = format!("\r\n--{boundary}--");

    let body = body.strip_suffix(b"\r\n").unwrap_or(body);
    let rest = body.strip_prefix(opening.as_bytes())?;
    let rest = rest.strip_suffix(closing.as_bytes())?;

    let header_end = rest.windows(4).position(|window| window == b"\r\n\r\n")?;
    let part_headers = std::str::from_utf8(&rest[..header_end]).ok()?;
    if !part_headers.contains("name=\"file\"") {
        return None;
    }
    Some(&rest[header_end + 4..])
}

// --- staff ---

async fn list_staff(State(db): State<Db>) -> Json<Vec<StaffMember>> {
    let store = db.read().await;
    Json(store.staff.values().cloned().collect())
}

async fn create_staff(
    State(db): State<Db>,
    Json(input): Json<CreateStaffMember>,
) -> (StatusCode, Json<StaffMember>) {
    let member = StaffMember {
        id: Uuid::new_v4(),
        name: input.name,
        role: input.role,
    };
    tracing::info!(id = %member.id, "staff member created");
    db.write().await.staff.insert(member.id, member.clone());
    (StatusCode::CREATED, Json(member))
}

async fn get_staff(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffMember>, StatusCode> {
    let store = db.read().await;
    store.staff.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

// --- enlistments ---

async fn list_enlistments(State(db): State<Db>) -> Json<Vec<Enlistment>> {
    let store = db.read().await;
    Json(store.enlistments.values().cloned().collect())
}

async fn create_enlistment(
    State(db): State<Db>,
    Json(input): Json<CreateEnlistment>,
) -> Result<(StatusCode, Json<Enlistment>), StatusCode> {
    let mut store = db.write().await;
    if !store.patients.contains_key(&input.patient_id)
        || !store.staff.contains_key(&input.staff_member_id)
    {
        return Err(StatusCode::NOT_FOUND);
    }
    let enlistment = Enlistment {
        id: Uuid::new_v4(),
        patient_id: input.patient_id,
        staff_member_id: input.staff_member_id,
        note: input.note,
    };
    store.enlistments.insert(enlistment.id, enlistment.clone());
    Ok((StatusCode::CREATED, Json(enlistment)))
}

async fn delete_enlistment(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .enlistments
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_serializes_camel_case() {
        let patient = Patient {
            id: Uuid::nil(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: None,
            email: None,
        };
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["firstName"], "Ada");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn create_patient_rejects_missing_last_name() {
        let result: Result<CreatePatient, _> = serde_json::from_str(r#"{"firstName":"Ada"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_patient_all_fields_optional() {
        let input: UpdatePatient = serde_json::from_str("{}").unwrap();
        assert!(input.first_name.is_none());
        assert!(input.email.is_none());
    }

    #[test]
    fn create_staff_rejects_unknown_role() {
        let result: Result<CreateStaffMember, _> =
            serde_json::from_str(r#"{"name":"X","role":"janitor"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn boundary_is_read_from_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            "multipart/form-data; boundary=--1234".parse().unwrap(),
        );
        assert_eq!(multipart_boundary(&headers), Some("--1234"));
    }

    #[test]
    fn boundary_requires_multipart() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
        assert_eq!(multipart_boundary(&headers), None);
    }

    #[test]
    fn file_part_extracts_payload() {
        let body = b"--B\r\nContent-Disposition: form-data; name=\"file\"; filename=\"data\"\r\nContent-Type: application/octet-stream\r\n\r\nhello\r\n--B--";
        assert_eq!(file_part(body, "B"), Some(&b"hello"[..]));
    }

    #[test]
    fn file_part_rejects_wrong_boundary() {
        let body = b"--B\r\nContent-Disposition: form-data; name=\"file\"\r\n\r\nhello\r\n--B--";
        assert_eq!(file_part(body, "C"), None);
    }
}
