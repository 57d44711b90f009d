//! HTTP controllers. Each module exposes a `config(cfg)` that registers its
//! routes on the actix app.

pub mod ai;
pub mod auth;
pub mod chat;
pub mod export;
pub mod health;
pub mod planner;
pub mod profile;
pub mod search;
pub mod work_logs;

use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

/// Resolve the request's bearer token to a user id. Every `/api/*` route
/// except health and auth goes through this.
pub fn authenticate(state: &web::Data<AppState>, req: &HttpRequest) -> Result<String, HttpResponse> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_string);

    let token = match token {
        Some(t) => t,
        None => {
            return Err(HttpResponse::Unauthorized()
                .json(json!({ "error": "No authorization token provided" })));
        }
    };

    match state.db.validate_session(&token) {
        Ok(Some(session)) => Ok(session.user_id),
        Ok(None) => Err(HttpResponse::Unauthorized()
            .json(json!({ "error": "Invalid or expired session" }))),
        Err(e) => {
            log::error!("Failed to validate session: {}", e);
            Err(HttpResponse::InternalServerError()
                .json(json!({ "error": "Internal server error" })))
        }
    }
}

/// Upstream model errors that should surface as 429 to the client.
pub fn is_rate_limit_error(message: &str) -> bool {
    message.contains("429") || message.contains("quota") || message.contains("RESOURCE_EXHAUSTED")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_detection() {
        assert!(is_rate_limit_error("Gemini API error (429): slow down"));
        assert!(is_rate_limit_error("RESOURCE_EXHAUSTED: quota exceeded"));
        assert!(is_rate_limit_error("You exceeded your quota"));
        assert!(!is_rate_limit_error("Gemini API error (500): boom"));
    }
}
