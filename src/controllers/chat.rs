//! Chat endpoint: runs the conversational tool dispatcher against the
//! configured model.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::assistant::ChatMessage;
use crate::controllers::{authenticate, is_rate_limit_error};
use crate::AppState;

const NOT_CONFIGURED_MESSAGE: &str =
    "The chat assistant is not configured. Set GOOGLE_AI_API_KEY to enable it.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatResponse {
    content: String,
    role: &'static str,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/chat").route(web::post().to(chat)));
}

async fn chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ChatRequest>,
) -> impl Responder {
    let model = match &state.model {
        Some(m) => m,
        None => {
            return HttpResponse::ServiceUnavailable()
                .json(json!({ "error": NOT_CONFIGURED_MESSAGE }));
        }
    };

    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if body.messages.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "No messages provided" }));
    }

    match state
        .dispatcher
        .dispatch(model.as_ref(), &user_id, &body.messages)
        .await
    {
        Ok(content) => HttpResponse::Ok().json(ChatResponse {
            content,
            role: "assistant",
        }),
        Err(e) if is_rate_limit_error(&e) => {
            log::warn!("Chat rate limited: {}", e);
            HttpResponse::TooManyRequests()
                .json(json!({ "error": "Rate limit reached. Please try again in a moment." }))
        }
        Err(e) => {
            log::error!("Chat dispatch failed: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Something went wrong processing your message" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_helpers::{signed_up_user, test_state};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_unconfigured_model_yields_503() {
        let (_dir, state) = test_state();
        let (_user, token) = signed_up_user(&state);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "messages": [{ "role": "user", "content": "hi" }] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);
    }
}
