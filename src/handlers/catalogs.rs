use std::sync::Arc;

use axum::extract::State;

use super::{json, ApiResp, Ctx, Result};
use crate::models::CatalogStats;

#[derive(serde::Serialize)]
pub struct ConfigResp {
    pub version: String,
    pub max_results_cap: usize,
    pub catalogs: Vec<String>,
}

/// Get public config.
pub async fn get_config(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<ConfigResp>> {
    Ok(json(ConfigResp {
        version: ctx.version.clone(),
        max_results_cap: ctx.consts.max_results_cap,
        catalogs: ctx.mgr.names(),
    }))
}

/// List catalogs with their sizes and strategies.
pub async fn get_catalogs(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<Vec<CatalogStats>>> {
    Ok(json(ctx.mgr.stats()))
}
