use askama::Template;
use axum::body::Bytes;
use axum::{
    Json,
    extract::{Multipart, State},
    response::Html,
};
use reqwest::StatusCode;
use serde::Deserialize;
use standard_error::{Interpolate, StandardError, Status};

use crate::conf::settings;
use crate::pkg::internal::candidate::{CandidateRecord, LeadStage};
use crate::pkg::internal::crm::{BatchReport, SubmitOutcome};
use crate::pkg::internal::extract::{extract_text_from_pdf, guess_contact};
use crate::pkg::server::uispec::Review;
use crate::{pkg::server::state::AppState, prelude::Result};

const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub token: String,
    pub record: CandidateRecord,
}

#[derive(Debug, Deserialize)]
pub struct BatchSubmitRequest {
    #[serde(default)]
    pub token: String,
    pub records: Vec<CandidateRecord>,
}

/// Takes the multipart upload, extracts every resume and renders the review
/// form. Extraction never fails the batch: an unreadable file becomes a
/// record with placeholders for the operator to fill in.
pub async fn upload(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>> {
    let mut token = String::new();
    let mut resume_files: Vec<(String, Bytes)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StandardError::new(&format!("CAND-001: {}", e)))?
    {
        let field_name = field.name().unwrap_or("");
        match field_name {
            "token" => {
                token = field
                    .text()
                    .await
                    .map_err(|e| StandardError::new(&format!("CAND-002: {}", e)))?;
            }
            "resumes" => {
                let file_name = field.file_name().unwrap_or("unknown").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new(&format!("CAND-003: {}", e)).interpolate_err(e.to_string()))?;
                if !file_name.to_lowercase().ends_with(".pdf") {
                    return Err(StandardError::new("CAND-004").code(StatusCode::BAD_REQUEST));
                }
                if data.len() > MAX_FILE_SIZE {
                    return Err(StandardError::new("CAND-005").code(StatusCode::BAD_REQUEST));
                }
                resume_files.push((file_name, data));
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new(&format!("CAND-006: {}", e)))?;
            }
        }
    }
    if resume_files.is_empty() {
        return Err(StandardError::new("CAND-007").code(StatusCode::BAD_REQUEST));
    }

    let mut records = Vec::with_capacity(resume_files.len());
    for (index, (file_name, data)) in resume_files.into_iter().enumerate() {
        let raw_text = match extract_text_from_pdf(&data) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("could not read {}: {}", &file_name, &e);
                String::new()
            }
        };
        let guess = guess_contact(&raw_text);
        tracing::debug!(
            "{}: guessed email={:?} name={} {}",
            &file_name,
            &guess.email,
            &guess.firstname,
            &guess.lastname
        );
        records.push(CandidateRecord {
            index,
            source_filename: file_name,
            raw_text,
            email: guess.email.unwrap_or_default(),
            firstname: guess.firstname,
            lastname: guess.lastname,
            status: LeadStage::Lead,
        });
    }

    let template = Review {
        service_name: &settings.service_name,
        token: &token,
        records: &records,
    };
    Ok(Html(template.render().map_err(|e| {
        StandardError::new("ERR-TEMPLATE-002").interpolate_err(e.to_string())
    })?))
}

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitOutcome>> {
    let token = resolve_token(&req.token)?;
    if !req.record.has_email() {
        return Err(StandardError::new("CAND-010").code(StatusCode::BAD_REQUEST));
    }
    let outcome = state
        .crm
        .create_contact(
            &token,
            req.record.email.trim(),
            &req.record.firstname,
            &req.record.lastname,
        )
        .await?;
    Ok(Json(outcome))
}

pub async fn submit_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchSubmitRequest>,
) -> Result<Json<BatchReport>> {
    let token = resolve_token(&req.token)?;
    let report = state.crm.create_contacts(&token, &req.records).await?;
    tracing::info!(
        "batch done: {} created, {} duplicates, {} failed, {} skipped",
        report.created,
        report.duplicates,
        report.failed,
        report.skipped
    );
    Ok(Json(report))
}

/// The form value wins; the configured token is the fallback. Checked before
/// any network I/O so a missing credential blocks with a clear message
/// instead of failing server-side.
fn resolve_token(supplied: &str) -> Result<String> {
    pick_token(supplied, settings.crm_token.as_deref())
}

fn pick_token(supplied: &str, configured: Option<&str>) -> Result<String> {
    let token = if supplied.trim().is_empty() {
        configured.unwrap_or_default().to_string()
    } else {
        supplied.trim().to_string()
    };
    if token.is_empty() {
        return Err(StandardError::new("CAND-011").code(StatusCode::BAD_REQUEST));
    }
    Ok(token)
}
