use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const GOOGLE_AI_API_KEY: &str = "GOOGLE_AI_API_KEY";
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    pub const GEMINI_ENDPOINT: &str = "GEMINI_ENDPOINT";
    pub const SESSION_TTL_DAYS: &str = "KLARITY_SESSION_TTL_DAYS";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/klarity.db";
    pub const GEMINI_MODEL: &str = "gemini-3-flash-preview";
    pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const SESSION_TTL_DAYS: i64 = 30;
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// None means the chat assistant is not configured (503 on /api/chat)
    pub google_ai_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    pub session_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            google_ai_api_key: env::var(env_vars::GOOGLE_AI_API_KEY)
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_model: env::var(env_vars::GEMINI_MODEL)
                .unwrap_or_else(|_| defaults::GEMINI_MODEL.to_string()),
            gemini_endpoint: env::var(env_vars::GEMINI_ENDPOINT)
                .unwrap_or_else(|_| defaults::GEMINI_ENDPOINT.to_string()),
            session_ttl_days: env::var(env_vars::SESSION_TTL_DAYS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults::SESSION_TTL_DAYS),
        }
    }
}
