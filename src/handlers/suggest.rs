use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};

use super::{clamp_max, json, mgr_err, ApiErr, ApiResp, Ctx, MaxQuery, Result};
use crate::{models::ResolveResults, policy::Decision};

/// Ranked suggestions for a query.
pub async fn suggest(
    State(ctx): State<Arc<Ctx>>,
    Path((catalog, q)): Path<(String, String)>,
    Query(query): Query<MaxQuery>,
) -> Result<ApiResp<Vec<String>>> {
    let q = validate(&q)?;
    let max = clamp_max(query.max, ctx.consts.max_results_cap);

    let words = ctx.mgr.suggest(&catalog, q, max).map_err(mgr_err)?;
    Ok(json(words))
}

/// Synonym lookup, then suggestions, turned into a decision.
pub async fn lookup(
    State(ctx): State<Arc<Ctx>>,
    Path((catalog, q)): Path<(String, String)>,
    Query(query): Query<MaxQuery>,
) -> Result<ApiResp<Decision>> {
    let q = validate(&q)?;
    let max = clamp_max(query.max, ctx.consts.max_results_cap);

    let d = ctx.mgr.lookup(&catalog, q, max).map_err(mgr_err)?;
    Ok(ApiResp {
        message: Some(d.message()),
        data: Some(d),
    })
}

/// Resolve a `,`/`+` separated list of names.
pub async fn resolve(
    State(ctx): State<Arc<Ctx>>,
    Path((catalog, q)): Path<(String, String)>,
) -> Result<ApiResp<ResolveResults>> {
    let q = validate(&q)?;

    let r = ctx.mgr.resolve(&catalog, q).map_err(mgr_err)?;
    Ok(json(ResolveResults {
        disclosure: r.disclosure(),
        complete: r.is_complete(),
        items: r.items,
    }))
}

fn validate(q: &str) -> Result<&str> {
    let q = q.trim();
    if q.is_empty() {
        return Err(ApiErr::new("query is required", StatusCode::BAD_REQUEST));
    }
    Ok(q)
}
