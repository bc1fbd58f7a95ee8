mod config;
mod errors;
mod llm_client;
mod models;
mod profile;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionModel, LlmClient, LlmSettings};
use crate::resume::pipeline::ResumePipeline;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (optional: without a key every operation is heuristic)
    let model: Option<Arc<dyn CompletionModel>> = match &config.anthropic_api_key {
        Some(api_key) => {
            let llm = LlmClient::new(LlmSettings {
                api_key: api_key.clone(),
                model: config.resume_model.clone(),
                request_timeout: config.llm_timeout,
                max_attempts: config.llm_max_attempts,
            })?;
            info!("LLM client initialized (model: {})", llm.model());
            Some(Arc::new(llm) as Arc<dyn CompletionModel>)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; resume builder will use heuristic fallbacks");
            None
        }
    };

    let pipeline = ResumePipeline::new(model, config.llm_timeout);

    let state = AppState {
        config: config.clone(),
        pipeline,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
