use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Airtable,
    Memory,
}

impl StoreBackend {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            _ => StoreBackend::Airtable,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Tables {
    pub users: String,
    pub babysitters: String,
    pub requests: String,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: "Users".to_string(),
            babysitters: "Babysitters".to_string(),
            requests: "Requests".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_api_url: String,
    pub tables: Tables,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Tables::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            store_backend: StoreBackend::parse(
                &env::var("STORE_BACKEND").unwrap_or_else(|_| "airtable".to_string()),
            ),
            airtable_api_key: env::var("AIRTABLE_API_KEY").unwrap_or_default(),
            airtable_base_id: env::var("AIRTABLE_BASE_ID").unwrap_or_default(),
            airtable_api_url: env::var("AIRTABLE_API_URL")
                .unwrap_or_else(|_| "https://api.airtable.com/v0/".to_string()),
            tables: Tables {
                users: env::var("AIRTABLE_USERS_TABLE").unwrap_or(defaults.users),
                babysitters: env::var("AIRTABLE_BABYSITTERS_TABLE")
                    .unwrap_or(defaults.babysitters),
                requests: env::var("AIRTABLE_REQUESTS_TABLE").unwrap_or(defaults.requests),
            },
        }
    }
}
