pub mod files;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use crate::service::firmware::{get_firmware_handler, get_version_handler, index_handler};
use crate::utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .nest("/files", files::create_files_router())
        .merge(firmware_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn firmware_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/firmware.bin", get(get_firmware_handler))
        .route("/version", get(get_version_handler))
}
