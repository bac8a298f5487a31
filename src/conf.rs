use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: String,
    //crm
    #[serde(default = "default_crm_base_url")]
    pub crm_base_url: String,
    #[serde(default)]
    pub crm_token: Option<String>,
    #[serde(default = "default_crm_lead_status")]
    pub crm_lead_status: String,
    #[serde(default)]
    pub crm_campaign_source: Option<String>,
}

fn default_service_name() -> String {
    "cvintake".into()
}

fn default_listen_port() -> String {
    "3000".into()
}

fn default_crm_base_url() -> String {
    "https://api.hubapi.com".into()
}

fn default_crm_lead_status() -> String {
    "0. Lead".into()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
