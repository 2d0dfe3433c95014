use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub schema_version: String,
    pub root: String,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
    pub archive_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: "2026-08-01".into(),
            root: ".".into(),
            model: "gemini-1.5-flash".into(),
            api_base: "https://generativelanguage.googleapis.com".into(),
            timeout_secs: 120,
            archive_name: "extension.zip".into(),
        }
    }
}
