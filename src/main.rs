//! Bugged Night community site
//!
//! Server-rendered pages over a Cosmic content bucket: characters, maps,
//! tournaments, patch notes, rankings, news, FAQs, plus contact and comment
//! submission.

mod api;
mod auth;
mod config;
mod content;
mod diagnostics;
mod errors;
mod models;
mod pages;
mod submission;
mod views;

use std::sync::Arc;

use axum::{
    middleware,
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use content::{ContentClient, CosmicClient};
use diagnostics::{CaptureLayer, DiagnosticsBuffer};
use submission::SubmissionGuard;
use views::layout::{self, PageContext};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentClient>,
    pub config: Arc<Config>,
    pub diagnostics: DiagnosticsBuffer,
    pub submissions: Arc<SubmissionGuard>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();
    let diagnostics = DiagnosticsBuffer::new();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(CaptureLayer::new(diagnostics.clone()))
        .init();

    tracing::info!("Starting Bugged Night site");
    tracing::info!("Content API: {}", config.api_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Missing credentials degrade to failing backend calls, never a startup fault
    for name in config.missing_credentials() {
        tracing::error!("{} is not set; content requests will fail", name);
    }

    if config.diagnostics_psk.is_none() {
        tracing::warn!("No diagnostics PSK configured (SITE_DIAGNOSTICS_PSK). /api/diagnostics is open!");
    }

    let client = CosmicClient::new(
        &config.api_url,
        config.bucket_slug_or_placeholder(),
        config.read_key_or_placeholder(),
        config.write_key_or_placeholder(),
    );

    // Create application state
    let state = AppState {
        content: Arc::new(client),
        config: Arc::new(config.clone()),
        diagnostics,
        submissions: Arc::new(SubmissionGuard::new()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.diagnostics_psk.clone();

    // Diagnostics feed (PSK protected)
    let diagnostics_routes = Router::new()
        .route("/diagnostics", get(api::get_diagnostics))
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    let api_routes = Router::new()
        .route("/comments", get(api::list_comments).post(api::create_comment))
        .merge(diagnostics_routes);

    // HTML pages
    let page_routes = Router::new()
        .route("/", get(pages::home_page))
        .route("/characters", get(pages::characters_page))
        .route("/rankings", get(pages::rankings_page))
        .route("/tournaments", get(pages::tournaments_page))
        .route("/maps", get(pages::maps_page))
        .route("/patch-notes", get(pages::patch_notes_page))
        .route("/patch-notes/comments", post(pages::post_comment))
        .route("/contactform", get(pages::contact_page).post(pages::submit_contact))
        .route("/faqs", get(pages::faqs_page))
        .route("/badge/dismiss", post(layout::dismiss_badge))
        .layer(middleware::from_fn_with_state(
            state.diagnostics.clone(),
            diagnostics::record_navigation,
        ));

    // Static assets and health check
    let static_routes = Router::new()
        .route("/static/site.css", get(layout::stylesheet))
        .route("/static/site.js", get(layout::site_script))
        .route("/static/console-capture.js", get(layout::console_capture_script))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .merge(static_routes)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Any unknown path: the site layout with nothing highlighted.
async fn not_found(ctx: PageContext) -> (axum::http::StatusCode, Html<String>) {
    let content = maud::html! {
        div class="status-block" {
            h1 class="gradient-text" { "404" }
            p class="text-muted" { "This page does not exist." }
            a class="btn btn-primary" href="/" { "Back to home" }
        }
    };
    (
        axum::http::StatusCode::NOT_FOUND,
        Html(layout::document(&ctx, "Not Found", content).into_string()),
    )
}
