//! Request handlers for the HTTP API.
//!
//! Handlers translate between the wire format and ledger operations. All
//! expected failure modes come back as [`AppError`] and map onto their
//! status codes in one place; a duplicate phone is the deliberate exception,
//! answered with HTTP 200 and `success: false`.

use crate::error::AppResult;
use crate::ledger::{NewContact, Progress, SubmitOutcome};
use crate::models::ContactRecord;
use crate::notify;
use crate::server::AppState;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::info;

/// Attachment filename for the VCF download.
const VCF_FILENAME: &str = "NEW YEAR VCF.vcf";

/// Attachment filename for the JSON export.
const JSON_FILENAME: &str = "contacts-export.json";

#[derive(Deserialize)]
pub struct AddContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContactResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_reached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<ContactRecord>,
}

#[derive(Serialize)]
pub struct CountResponse {
    success: bool,
    #[serde(flatten)]
    progress: Progress,
}

#[derive(Serialize)]
pub struct AllContactsResponse {
    success: bool,
    contacts: Vec<ContactRecord>,
    total: usize,
    stats: crate::ledger::CollectionStats,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    success: bool,
    token: String,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    contacts: usize,
    server_time: String,
}

#[derive(Serialize)]
pub struct TestResponse {
    success: bool,
    message: String,
    time: String,
}

/// GET /api/global-count — progress snapshot.
pub async fn global_count_handler(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        success: true,
        progress: state.ledger.progress().await,
    })
}

/// POST /api/add-contact — submit one contact.
pub async fn add_contact_handler(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
    Json(payload): Json<AddContactRequest>,
) -> AppResult<Json<AddContactResponse>> {
    let submission = NewContact {
        name: payload.name,
        phone: payload.phone,
        photo: payload.photo,
        source_address: addr.ip().to_string(),
    };

    match state.ledger.submit(submission).await? {
        SubmitOutcome::Accepted {
            record,
            count,
            target_reached,
            first_time_reached,
        } => {
            if first_time_reached {
                info!("Contact target reached at {} records", count);
                if let Some(url) = state.config.notify_webhook_url.clone() {
                    let vcf = state
                        .ledger
                        .export_vcf(false, state.config.vcf_branding_prefix.as_deref())
                        .await?;
                    notify::dispatch_target_reached(url, count, vcf);
                }
            }

            Ok(Json(AddContactResponse {
                success: true,
                message: "Contact added successfully!".to_string(),
                count: Some(count),
                target_reached: Some(target_reached),
                contact: Some(record),
            }))
        }
        SubmitOutcome::DuplicatePhone => Ok(Json(AddContactResponse {
            success: false,
            message: "This phone number is already registered".to_string(),
            count: None,
            target_reached: None,
            contact: None,
        })),
    }
}

/// GET /api/all-contacts — admin listing with derived stats.
pub async fn all_contacts_handler(State(state): State<AppState>) -> Json<AllContactsResponse> {
    let (contacts, stats) = state.ledger.list_all().await;
    Json(AllContactsResponse {
        success: true,
        total: contacts.len(),
        contacts,
        stats,
    })
}

/// GET /api/download-vcf — vCard export as attachment.
pub async fn download_vcf_handler(State(state): State<AppState>) -> AppResult<Response> {
    let body = state
        .ledger
        .export_vcf(
            state.config.export_requires_target,
            state.config.vcf_branding_prefix.as_deref(),
        )
        .await?;

    Ok(attachment_response(body, "text/vcard", VCF_FILENAME))
}

/// GET /api/export/json — full collection as a JSON attachment.
pub async fn export_json_handler(State(state): State<AppState>) -> AppResult<Response> {
    let body = state.ledger.export_json().await?;
    Ok(attachment_response(body, "application/json", JSON_FILENAME))
}

/// POST /api/admin/login — shared-password admin gate.
pub async fn admin_login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let token = state.auth.login(&payload.password)?;
    Ok(Json(LoginResponse {
        success: true,
        token,
        message: "Login successful".to_string(),
    }))
}

/// GET /health — liveness.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ONLINE".to_string(),
        contacts: state.ledger.count().await,
        server_time: Utc::now().to_rfc3339(),
    })
}

/// GET /api/test — request/response sanity check.
pub async fn test_handler() -> Json<TestResponse> {
    Json(TestResponse {
        success: true,
        message: "Server is working!".to_string(),
        time: Utc::now().to_rfc3339(),
    })
}

fn attachment_response(body: String, content_type: &str, filename: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
