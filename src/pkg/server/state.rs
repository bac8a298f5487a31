use std::sync::Arc;

use crate::{pkg::internal::crm::CrmClient, prelude::Result};

#[derive(Debug, Clone)]
pub struct AppState {
    pub crm: Arc<CrmClient>,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        Ok(AppState {
            crm: Arc::new(CrmClient::new()),
        })
    }
}
