use crate::service::files::{
    delete_file_handler, get_file_handler, list_files_handler, post_file_handler,
    put_file_handler,
};
use crate::utils::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

pub fn create_files_router() -> Router<Arc<AppState>> {
    Router::new()
        // List the root
        .route("/", get(list_files_handler))
        // Read, create or replace, and delete a single entry
        .route(
            "/{name}",
            get(get_file_handler)
                .post(post_file_handler)
                .put(put_file_handler)
                .delete(delete_file_handler),
        )
}
