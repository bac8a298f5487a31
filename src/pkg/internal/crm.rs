use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use standard_error::{Interpolate, StandardError};

use crate::{conf::settings, pkg::internal::candidate::CandidateRecord, prelude::Result};

pub const CONTACTS_PATH: &str = "/crm/v3/objects/contacts";

#[derive(Debug, Serialize)]
struct ContactProperties<'a> {
    email: &'a str,
    firstname: &'a str,
    lastname: &'a str,
    hs_lead_status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    evenement_declenche: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CreateContact<'a> {
    properties: ContactProperties<'a>,
}

/// Classification of a single contact-creation attempt. A duplicate (409) is
/// an expected outcome, not an error; `Skipped` only occurs in the batch
/// path, for records with no email.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SubmitOutcome {
    Created,
    Duplicate,
    Skipped,
    Failed {
        status: Option<u16>,
        message: String,
    },
}

#[derive(Debug, Serialize)]
pub struct RecordResult {
    pub index: usize,
    pub source_filename: String,
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub created: u32,
    pub duplicates: u32,
    pub failed: u32,
    pub skipped: u32,
    pub results: Vec<RecordResult>,
}

/// Thin client over the CRM's contact-creation endpoint. The classification
/// tags are fixed at construction; the bearer token is passed per call so
/// callers stay in control of which credential each submission uses.
#[derive(Debug, Clone)]
pub struct CrmClient {
    http: reqwest::Client,
    base_url: String,
    lead_status: String,
    campaign_source: Option<String>,
}

impl CrmClient {
    pub fn new() -> Self {
        Self::with_base_url(
            &settings.crm_base_url,
            &settings.crm_lead_status,
            settings.crm_campaign_source.clone(),
        )
    }

    pub fn with_base_url(base_url: &str, lead_status: &str, campaign_source: Option<String>) -> Self {
        CrmClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            lead_status: lead_status.to_string(),
            campaign_source,
        }
    }

    /// One POST, no retry, no idempotency key. A duplicate submission after
    /// a transient failure is the caller's responsibility.
    pub async fn create_contact(
        &self,
        token: &str,
        email: &str,
        firstname: &str,
        lastname: &str,
    ) -> Result<SubmitOutcome> {
        let body = CreateContact {
            properties: ContactProperties {
                email,
                firstname,
                lastname,
                hs_lead_status: &self.lead_status,
                evenement_declenche: self.campaign_source.as_deref(),
            },
        };
        let res = self
            .http
            .post(format!("{}{}", self.base_url, CONTACTS_PATH))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StandardError::new("ERR-CRM-001").interpolate_err(e.to_string()))?;

        let status = res.status();
        match status {
            StatusCode::OK | StatusCode::CREATED => {
                tracing::info!("contact {} created", email);
                Ok(SubmitOutcome::Created)
            }
            StatusCode::CONFLICT => {
                tracing::info!("contact {} already exists", email);
                Ok(SubmitOutcome::Duplicate)
            }
            _ => {
                let message = match res.json::<Value>().await {
                    Ok(body) => body
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("no message in response body")
                        .to_string(),
                    Err(e) => format!("unreadable error body: {}", e),
                };
                tracing::warn!("contact creation failed with {}: {}", status, &message);
                Ok(SubmitOutcome::Failed {
                    status: Some(status.as_u16()),
                    message,
                })
            }
        }
    }

    /// Sequential batch submission. Records without an email are
    /// skip-counted; a failure on one record never stops the rest, the loop
    /// always runs to completion.
    pub async fn create_contacts(
        &self,
        token: &str,
        records: &[CandidateRecord],
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for record in records {
            let outcome = if !record.has_email() {
                tracing::warn!("{}: no email, skipping", &record.source_filename);
                SubmitOutcome::Skipped
            } else {
                match self
                    .create_contact(
                        token,
                        record.email.trim(),
                        &record.firstname,
                        &record.lastname,
                    )
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(e) => SubmitOutcome::Failed {
                        status: None,
                        message: e.to_string(),
                    },
                }
            };
            match &outcome {
                SubmitOutcome::Created => report.created += 1,
                SubmitOutcome::Duplicate => report.duplicates += 1,
                SubmitOutcome::Skipped => report.skipped += 1,
                SubmitOutcome::Failed { .. } => report.failed += 1,
            }
            report.results.push(RecordResult {
                index: record.index,
                source_filename: record.source_filename.clone(),
                outcome,
            });
        }
        Ok(report)
    }
}
