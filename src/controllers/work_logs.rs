//! Validated work-log inserts from the frontend form.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::controllers::authenticate;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WorkLogRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub minutes: Option<i64>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/work-logs").route(web::post().to(create)));
}

async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<WorkLogRequest>,
) -> impl Responder {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if NaiveDate::parse_from_str(&body.date, "%Y-%m-%d").is_err() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "date must be in YYYY-MM-DD format" }));
    }
    let summary = body.summary.trim();
    if summary.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "summary is required" }));
    }
    if body.minutes.is_some_and(|m| m < 0) {
        return HttpResponse::BadRequest().json(json!({ "error": "minutes must be non-negative" }));
    }

    match state
        .db
        .insert_work_log(&user_id, &body.date, summary, body.minutes)
    {
        Ok(entry) => HttpResponse::Ok().json(json!({ "ok": true, "data": entry })),
        Err(e) => {
            log::error!("Failed to insert work log: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}
