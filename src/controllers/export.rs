//! Data export: one JSON dump of every table, or a CSV of a single table.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use rusqlite::Result as SqliteResult;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::controllers::authenticate;
use crate::AppState;

/// SQLite treats a negative LIMIT as "no limit"; exports take every row.
const NO_LIMIT: i64 = -1;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_format() -> String {
    "json".to_string()
}

fn default_table() -> String {
    "work_logs".to_string()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/export").route(web::get().to(export)));
}

async fn export(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ExportQuery>,
) -> impl Responder {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match query.format.as_str() {
        "json" => export_json(&state, &user_id),
        "csv" => export_csv(&state, &user_id, &query.table),
        other => {
            HttpResponse::BadRequest().json(json!({ "error": format!("Unknown format: {}", other) }))
        }
    }
}

fn export_json(state: &web::Data<AppState>, user_id: &str) -> HttpResponse {
    let db = &state.db;
    let dump = (|| -> SqliteResult<serde_json::Value> {
        Ok(json!({
            "customers": db.list_customers(user_id)?,
            "notes": db.list_notes(user_id, NO_LIMIT)?,
            "achievements": db.list_achievements(user_id)?,
            "goals": db.list_goals(user_id)?,
            "daily_plans": db.list_daily_plans(user_id)?,
            "work_logs": db.list_work_logs(user_id)?,
            "learning_progress": db.list_learning_progress(user_id)?,
            "review_entries": db.list_review_entries(user_id)?,
        }))
    })();

    match dump {
        Ok(value) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"klarity-export.json\"",
            ))
            .body(serde_json::to_string_pretty(&value).unwrap_or_default()),
        Err(e) => {
            log::error!("JSON export failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

fn export_csv(state: &web::Data<AppState>, user_id: &str, table: &str) -> HttpResponse {
    let db = &state.db;
    let rows = match table {
        "work_logs" => db.list_work_logs(user_id).map(csv_bytes),
        "notes" => db.list_notes(user_id, NO_LIMIT).map(csv_bytes),
        "customers" => db.list_customers(user_id).map(csv_bytes),
        "achievements" => db.list_achievements(user_id).map(csv_bytes),
        "goals" => db.list_goals(user_id).map(csv_bytes),
        "daily_plans" => db.list_daily_plans(user_id).map(csv_bytes),
        "learning_progress" => db.list_learning_progress(user_id).map(csv_bytes),
        "review_entries" => db.list_review_entries(user_id).map(csv_bytes),
        other => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": format!("Unknown table: {}", other) }));
        }
    };

    match rows {
        Ok(Ok(bytes)) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}-export.csv\"", table),
            ))
            .body(bytes),
        Ok(Err(e)) => {
            log::error!("CSV serialization failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
        Err(e) => {
            log::error!("CSV export query failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

fn csv_bytes<T: Serialize>(rows: Vec<T>) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_helpers::{signed_up_user, test_state};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_json_export_carries_all_tables() {
        let (_dir, state) = test_state();
        let (user_id, token) = signed_up_user(&state);
        state
            .db
            .insert_work_log(&user_id, "2026-08-30", "export me", Some(30))
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/export?format=json")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp
            .headers()
            .get("Content-Disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("klarity-export.json"));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["work_logs"].as_array().unwrap().len(), 1);
        for table in [
            "customers",
            "notes",
            "achievements",
            "goals",
            "daily_plans",
            "learning_progress",
            "review_entries",
        ] {
            assert!(body[table].is_array(), "missing table {}", table);
        }
    }

    #[actix_web::test]
    async fn test_json_export_is_not_capped() {
        let (_dir, state) = test_state();
        let (user_id, token) = signed_up_user(&state);
        for i in 0..60 {
            state
                .db
                .insert_note(&user_id, &format!("note {}", i), None, None)
                .unwrap();
        }
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/export?format=json")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["notes"].as_array().unwrap().len(), 60);
    }

    #[actix_web::test]
    async fn test_csv_export_of_work_logs() {
        let (_dir, state) = test_state();
        let (user_id, token) = signed_up_user(&state);
        state
            .db
            .insert_work_log(&user_id, "2026-08-30", "csv row", None)
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/export?format=csv")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/csv"
        );
        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.lines().next().unwrap().contains("summary"));
        assert!(text.contains("csv row"));
    }

    #[actix_web::test]
    async fn test_unknown_table_is_400() {
        let (_dir, state) = test_state();
        let (_user, token) = signed_up_user(&state);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/export?format=csv&table=profiles")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
