//! Direct keyword search endpoint (non-chat path): notes and work logs only.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::controllers::authenticate;
use crate::db::models::{Note, WorkLog};
use crate::AppState;

const RESULT_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
struct SearchResults {
    notes: Vec<Note>,
    #[serde(rename = "workLogs")]
    work_logs: Vec<WorkLog>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/search").route(web::get().to(search)));
}

async fn search(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let q = query.q.trim();
    if q.is_empty() {
        return HttpResponse::Ok().json(json!({
            "results": SearchResults { notes: vec![], work_logs: vec![] }
        }));
    }

    let notes = state.db.search_notes(&user_id, q, RESULT_LIMIT);
    let work_logs = state.db.search_work_logs(&user_id, q, RESULT_LIMIT);
    match (notes, work_logs) {
        (Ok(notes), Ok(work_logs)) => {
            HttpResponse::Ok().json(json!({ "results": SearchResults { notes, work_logs } }))
        }
        (Err(e), _) | (_, Err(e)) => {
            log::error!("Search failed: {}", e);
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
    async fn test_search_returns_camel_cased_results() {
        let (_dir, state) = test_state();
        let (user_id, token) = signed_up_user(&state);
        state
            .db
            .insert_note(&user_id, "Oracle kickoff", None, None)
            .unwrap();
        state
            .db
            .insert_work_log(&user_id, "2026-08-30", "oracle migration", None)
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/search?q=oracle")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["results"]["notes"].as_array().unwrap().len(), 1);
        assert_eq!(body["results"]["workLogs"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_blank_query_returns_empty_results() {
        let (_dir, state) = test_state();
        let (user_id, token) = signed_up_user(&state);
        state.db.insert_note(&user_id, "anything", None, None).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/search?q=%20%20")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["results"]["notes"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_requires_auth() {
        let (_dir, state) = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/search?q=x").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }
}
