use askama::Template;
use axum::response::Html;
use standard_error::{Interpolate, StandardError};

use crate::{conf::settings, pkg::server::uispec::Home, prelude::Result};

pub async fn home() -> Result<Html<String>> {
    let template = Home {
        service_name: &settings.service_name,
        token_default: settings.crm_token.as_deref().unwrap_or(""),
    };
    Ok(Html(template.render().map_err(|e| {
        StandardError::new("ERR-TEMPLATE-001").interpolate_err(e.to_string())
    })?))
}
