use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{catalogs, suggest, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    Router::new()
        .route("/api/config", get(catalogs::get_config))
        .route("/api/catalogs", get(catalogs::get_catalogs))
        .route("/api/catalogs/{catalog}/suggest/{q}", get(suggest::suggest))
        .route("/api/catalogs/{catalog}/lookup/{q}", get(suggest::lookup))
        .route("/api/catalogs/{catalog}/resolve/{q}", get(suggest::resolve))
        .with_state(ctx)
}
