//! Single-shot AI helpers outside the chat loop: refine a note draft, or
//! summarize the user's recent activity. No tools are offered to the model.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::ai::{ChatModel, Content};
use crate::controllers::{authenticate, is_rate_limit_error};
use crate::AppState;

const RECENT_WORK_LOGS: i64 = 14;
const RECENT_PLANS: i64 = 7;

#[derive(Debug, Deserialize)]
pub struct AiRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub text: Option<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/ai").route(web::post().to(run)));
}

async fn run(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<AiRequest>,
) -> impl Responder {
    let model = match &state.model {
        Some(m) => m,
        None => {
            return HttpResponse::ServiceUnavailable()
                .json(json!({ "error": "AI features are not configured" }));
        }
    };

    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let prompt = match body.action.as_str() {
        "refine" => {
            let text = body.text.as_deref().map(str::trim).unwrap_or("");
            if text.is_empty() {
                return HttpResponse::BadRequest()
                    .json(json!({ "error": "text is required for refine" }));
            }
            format!(
                "Rewrite the following note so it is clear and well structured. \
                 Keep the original meaning and all factual details. Reply with the \
                 rewritten note only.\n\n{}",
                text
            )
        }
        "summarize" => match summary_prompt(&state, &user_id) {
            Ok(Some(p)) => p,
            Ok(None) => {
                return HttpResponse::Ok().json(json!({
                    "content": "Nothing to summarize yet. Add some work logs or plans first."
                }));
            }
            Err(e) => {
                log::error!("Failed to load activity for summary: {}", e);
                return HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }));
            }
        },
        other => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": format!("Unknown action: {}", other) }));
        }
    };

    match model.generate(&[Content::user_text(prompt)], &[]).await {
        Ok(reply) => HttpResponse::Ok().json(json!({ "content": reply.text.trim() })),
        Err(e) if is_rate_limit_error(&e) => {
            log::warn!("AI helper rate limited: {}", e);
            HttpResponse::TooManyRequests()
                .json(json!({ "error": "Rate limit reached. Please try again in a moment." }))
        }
        Err(e) => {
            log::error!("AI helper failed: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Something went wrong generating a response" }))
        }
    }
}

/// Build the summarize prompt from recent work logs and plans. None when the
/// user has no activity at all.
fn summary_prompt(
    state: &web::Data<AppState>,
    user_id: &str,
) -> rusqlite::Result<Option<String>> {
    let work_logs = state.db.recent_work_logs(user_id, RECENT_WORK_LOGS)?;
    let plans = state.db.recent_daily_plans(user_id, RECENT_PLANS)?;
    if work_logs.is_empty() && plans.is_empty() {
        return Ok(None);
    }

    let mut prompt = String::from(
        "Summarize this person's recent work activity in a few short paragraphs \
         suitable for a status update. Highlight themes, not individual entries.\n",
    );
    if !work_logs.is_empty() {
        prompt.push_str("\nRecent work logs:\n");
        for log in &work_logs {
            prompt.push_str(&format!("- {}: {}\n", log.date, log.summary));
        }
    }
    if !plans.is_empty() {
        prompt.push_str("\nRecent daily plans:\n");
        for plan in &plans {
            prompt.push_str(&format!(
                "- {}: {}\n",
                plan.date,
                plan.content.as_deref().unwrap_or("")
            ));
        }
    }
    Ok(Some(prompt))
}
