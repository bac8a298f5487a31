use serde::{Deserialize, Serialize};

/// Placeholder for a name the extractor could not determine. Records keep it
/// unless the operator edits the field; the CRM accepts it as-is.
pub const UNKNOWN: &str = "Unknown";

fn unknown() -> String {
    UNKNOWN.into()
}

/// Pipeline stage shown in the review form. Display only; the CRM body
/// carries the configured constant lead-status tag instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStage {
    #[default]
    Lead,
    Contacted,
    Interview,
}

/// One transient record per uploaded file. Lives in the review form between
/// extraction and submission; the server keeps no copy. `index` is the
/// record's stable position in the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub index: usize,
    pub source_filename: String,
    #[serde(default)]
    pub raw_text: String,
    /// Empty string means no address was found or supplied.
    #[serde(default)]
    pub email: String,
    #[serde(default = "unknown")]
    pub firstname: String,
    #[serde(default = "unknown")]
    pub lastname: String,
    #[serde(default)]
    pub status: LeadStage,
}

impl CandidateRecord {
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}
