use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::a001_sheet::ConvertOptions;
use crate::handlers;
use crate::shared::sources::WorkbookSource;
use crate::system::middleware::request_logger::request_logger;

/// Shared by all requests; read-only
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn WorkbookSource>,
    pub options: ConvertOptions,
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(handlers::u501_export_workbook::export_workbook))
        .route(
            "/api/sheets",
            get(handlers::u501_export_workbook::export_workbook),
        )
        .with_state(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
