use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/:slug", get(handlers::get_article))
        .route("/api/newsletter", post(handlers::subscribe))
        .route("/api/leads", post(handlers::capture_lead))
        .route("/api/simulate", get(handlers::simulate))
        .route("/api/track", post(handlers::track))
        .route("/api/site", get(handlers::site_info))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await
}

pub mod prelude {
    pub use mcb_core::{Article, Error, Result};
    pub use crate::{create_app, AppState};
}
