use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod ai;
mod assistant;
mod config;
mod controllers;
mod db;
mod tools;

use ai::GeminiClient;
use assistant::ChatDispatcher;
use config::Config;
use db::Database;
use tools::ToolRegistry;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    /// None when GOOGLE_AI_API_KEY is unset; AI routes answer 503.
    pub model: Option<Arc<GeminiClient>>,
    pub tool_registry: Arc<ToolRegistry>,
    pub dispatcher: Arc<ChatDispatcher>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!("Initializing database at {}", config.database_url);
    let db = Database::new(&config.database_url).expect("Failed to initialize database");
    let db = Arc::new(db);

    log::info!("Initializing tool registry");
    let tool_registry = Arc::new(tools::create_default_registry());
    log::info!("Registered {} tools", tool_registry.len());

    let model = match &config.google_ai_api_key {
        Some(key) => {
            let client = GeminiClient::new(key, &config.gemini_endpoint, &config.gemini_model)
                .expect("Failed to create Gemini client");
            log::info!("Chat assistant configured with model {}", client.model());
            Some(Arc::new(client))
        }
        None => {
            log::warn!("GOOGLE_AI_API_KEY not set; chat assistant disabled");
            None
        }
    };

    let dispatcher = Arc::new(ChatDispatcher::new(
        Arc::clone(&db),
        Arc::clone(&tool_registry),
    ));

    log::info!("Starting Klarity server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                config: config.clone(),
                model: model.clone(),
                tool_registry: Arc::clone(&tool_registry),
                dispatcher: Arc::clone(&dispatcher),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::auth::config)
            .configure(controllers::chat::config)
            .configure(controllers::search::config)
            .configure(controllers::work_logs::config)
            .configure(controllers::planner::config)
            .configure(controllers::export::config)
            .configure(controllers::profile::config)
            .configure(controllers::ai::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
