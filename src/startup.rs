use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    configuration::Settings,
    controller::{health, page_action, page_data, page_view, route},
    page::PageRoute,
    view_engine::TeraView,
    Result,
};

#[derive(Clone)]
pub struct AppState {
    pub tera_engine: Arc<TeraView>,
    pub page: Arc<PageRoute>,
    pub body_limit: usize,
}

impl AppState {
    pub fn build(configuration: &Settings) -> Result<Self> {
        let tera_engine = TeraView::from_custom_dir(&configuration.application.views_dir)?;
        Ok(Self {
            tera_engine: Arc::new(tera_engine),
            page: Arc::new(route()),
            body_limit: configuration.application.body_limit,
        })
    }
}

pub fn app(state: AppState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route("/health", get(health))
        .route("/", get(page_view).post(page_action))
        .route("/__data.json", get(page_data))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    tracing::info!(address = ?listener.local_addr()?, "listening");
    let app = app(state);
    axum::serve(listener, app).await
}
