use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::CatalogOptions,
    suggester::{Alphabet, Strategy},
};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub catalog: HashMap<String, CatalogConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
    /// Result budget for catalogs that don't set `max_results`.
    #[serde(default)]
    pub default_max_results: usize,
    /// Upper bound on `?max=` in API requests.
    #[serde(default)]
    pub max_results_cap: usize,
}

/// A catalog definition under `[catalog.<name>]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// CSV file with the catalog entries.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub max_dist: Option<usize>,
    #[serde(default)]
    pub alphabet: Alphabet,
    #[serde(default)]
    pub storage_limit: Option<usize>,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl CatalogConfig {
    /// Suggester options, falling back to `default_max_results` when the catalog has none.
    pub fn options(&self, default_max_results: usize) -> CatalogOptions {
        let fallback = (default_max_results > 0).then_some(default_max_results);
        CatalogOptions {
            strategy: self.strategy,
            max_dist: self.max_dist,
            alphabet: self.alphabet.clone(),
            storage_limit: self.storage_limit,
            max_results: self.max_results.or(fallback),
        }
    }
}

/// Catalog summary exposed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub name: String,
    pub strategy: Strategy,
    pub entries: usize,
    pub index_entries: usize,
    pub max_results: usize,
}

/// Multi-fragment resolution response.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResults {
    pub items: Vec<crate::policy::Resolved>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclosure: Option<String>,
    pub complete: bool,
}
