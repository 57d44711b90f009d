//! Daily planner: insert a plan for a date, or update an existing one when
//! `planId` is supplied.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::controllers::authenticate;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerRequest {
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/planner").route(web::post().to(upsert)));
}

async fn upsert(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<PlannerRequest>,
) -> impl Responder {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Some(plan_id) = body.plan_id.as_deref() {
        return match state.db.update_daily_plan(
            plan_id,
            &user_id,
            body.content.as_deref(),
            body.notes.as_deref(),
        ) {
            Ok(Some(plan)) => HttpResponse::Ok().json(json!({ "ok": true, "data": plan })),
            Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Plan not found" })),
            Err(e) => {
                log::error!("Failed to update plan: {}", e);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }))
            }
        };
    }

    if NaiveDate::parse_from_str(&body.date, "%Y-%m-%d").is_err() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "date must be in YYYY-MM-DD format" }));
    }

    match state.db.insert_daily_plan(
        &user_id,
        &body.date,
        body.content.as_deref(),
        body.notes.as_deref(),
    ) {
        Ok(plan) => HttpResponse::Ok().json(json!({ "ok": true, "data": plan })),
        Err(e) => {
            log::error!("Failed to insert plan: {}", e);
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
    async fn test_insert_then_update_by_plan_id() {
        let (_dir, state) = test_state();
        let (_user, token) = signed_up_user(&state);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/planner")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "date": "2026-08-30", "content": "draft review" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let plan_id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/planner")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "planId": plan_id, "content": "final review" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["content"], "final review");
    }

    #[actix_web::test]
    async fn test_unknown_plan_id_is_404() {
        let (_dir, state) = test_state();
        let (_user, token) = signed_up_user(&state);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/planner")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "planId": "nope", "content": "x" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }
}
