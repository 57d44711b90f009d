//! Profile read/update.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::controllers::authenticate;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/profile")
            .route(web::get().to(get))
            .route(web::patch().to(update)),
    );
}

async fn get(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.db.get_profile(&user_id) {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Profile not found" })),
        Err(e) => {
            log::error!("Failed to load profile: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ProfileUpdate>,
) -> impl Responder {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let result = state
        .db
        .update_profile(
            &user_id,
            body.display_name.as_deref(),
            body.avatar_url.as_deref(),
        )
        .and_then(|_| state.db.get_profile(&user_id));

    match result {
        Ok(Some(profile)) => HttpResponse::Ok().json(json!({ "ok": true, "data": profile })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Profile not found" })),
        Err(e) => {
            log::error!("Failed to update profile: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_helpers::{signed_up_user, test_state};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_get_and_patch_profile() {
        let (_dir, state) = test_state();
        let (_user, token) = signed_up_user(&state);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["email"], "t@example.com");
        assert!(body.get("password_hash").is_none());

        let req = test::TestRequest::patch()
            .uri("/api/profile")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "displayName": "Taylor" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["display_name"], "Taylor");
    }
}
