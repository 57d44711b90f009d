//! Email/password auth: signup, login, logout. Sessions are opaque bearer
//! tokens stored in the database with an expiry.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::models::Profile;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
struct AuthResponse {
    token: String,
    user: Profile,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/signup").route(web::post().to(signup)))
        .service(web::resource("/api/auth/login").route(web::post().to(login)))
        .service(web::resource("/api/auth/logout").route(web::post().to(logout)));
}

async fn signup(state: web::Data<AppState>, body: web::Json<Credentials>) -> impl Responder {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return HttpResponse::BadRequest().json(json!({ "error": "A valid email is required" }));
    }
    if body.password.len() < 6 {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "Password must be at least 6 characters" }));
    }

    match state.db.get_profile_by_email(&email) {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(json!({ "error": "Email already registered" }));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Signup lookup failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Internal server error" }));
        }
    }

    let profile = match state.db.create_profile(&email, &body.password) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Failed to create profile: {}", e);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Internal server error" }));
        }
    };

    match state
        .db
        .create_session(&profile.id, state.config.session_ttl_days)
    {
        Ok(session) => {
            log::info!("New signup: {}", profile.email);
            HttpResponse::Ok().json(AuthResponse {
                token: session.token,
                user: profile,
            })
        }
        Err(e) => {
            log::error!("Failed to create session: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

async fn login(state: web::Data<AppState>, body: web::Json<Credentials>) -> impl Responder {
    let email = body.email.trim().to_lowercase();
    let profile = match state.db.get_profile_by_email(&email) {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(json!({ "error": "Invalid email or password" }));
        }
        Err(e) => {
            log::error!("Login lookup failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Internal server error" }));
        }
    };

    if !profile.verify_password(&body.password) {
        return HttpResponse::Unauthorized().json(json!({ "error": "Invalid email or password" }));
    }

    match state
        .db
        .create_session(&profile.id, state.config.session_ttl_days)
    {
        Ok(session) => HttpResponse::Ok().json(AuthResponse {
            token: session.token,
            user: profile,
        }),
        Err(e) => {
            log::error!("Failed to create session: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));

    if let Some(token) = token {
        if let Err(e) = state.db.delete_session(token) {
            log::error!("Failed to delete session: {}", e);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Internal server error" }));
        }
    }
    HttpResponse::Ok().json(json!({ "ok": true }))
}
