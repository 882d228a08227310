use std::{collections::HashMap, path::Path, sync::Arc};

use crate::{
    catalog::Catalog,
    importer::{self, LoadError},
    models::{CatalogConfig, CatalogStats},
    policy::{Decision, Resolution},
    suggester::SuggestError,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown catalog: {0}")]
    UnknownCatalog(String),
    #[error("error loading catalog '{0}': {1}")]
    Load(String, LoadError),
    #[error("error building catalog '{0}': {1}")]
    Build(String, SuggestError),
    #[error("{0}")]
    Suggest(#[from] SuggestError),
    #[error("catalog task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Manager owns every configured catalog and routes lookups to them by name.
pub struct Manager {
    catalogs: HashMap<String, Arc<Catalog>>,
}

impl Manager {
    /// Load and build all configured catalogs. Each catalog is built on its own
    /// blocking task since index construction is CPU-bound.
    pub async fn new(
        cfgs: &HashMap<String, CatalogConfig>,
        default_max_results: usize,
    ) -> Result<Self, Error> {
        let mut tasks = Vec::with_capacity(cfgs.len());
        for (name, cfg) in cfgs {
            let name = name.clone();
            let cfg = cfg.clone();
            tasks.push(tokio::task::spawn_blocking(move || {
                build_catalog(&name, &cfg, default_max_results)
            }));
        }

        // Wait for every build so that no task outlives a failure. The first
        // error is returned, the rest are logged.
        let mut catalogs = Vec::with_capacity(tasks.len());
        let mut failed = None;
        for t in tasks {
            match t.await.map_err(Error::from).and_then(|r| r) {
                Ok(c) => catalogs.push(c),
                Err(e) => {
                    log::error!("{}", e);
                    if failed.is_none() {
                        failed = Some(e);
                    }
                }
            }
        }

        if let Some(e) = failed {
            return Err(e);
        }
        Ok(Self::from_catalogs(catalogs))
    }

    pub fn from_catalogs(catalogs: Vec<Catalog>) -> Self {
        if catalogs.is_empty() {
            log::warn!("no catalogs configured");
        }

        Self {
            catalogs: catalogs
                .into_iter()
                .map(|c| (c.name().to_string(), Arc::new(c)))
                .collect(),
        }
    }

    /// Get a catalog by name.
    pub fn catalog(&self, name: &str) -> Result<&Arc<Catalog>, Error> {
        self.catalogs
            .get(name)
            .ok_or_else(|| Error::UnknownCatalog(name.to_string()))
    }

    /// Catalog names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.catalogs.keys().cloned().collect();
        names.sort();
        names
    }

    /// Ranked candidates for a query. `max_size` of 0 uses the catalog's default.
    pub fn suggest(&self, name: &str, query: &str, max_size: usize) -> Result<Vec<String>, Error> {
        let c = self.catalog(name)?;
        Ok(c.suggest(query, budget(c, max_size))?)
    }

    /// Decide what a query refers to. `max_size` of 0 uses the catalog's default.
    pub fn lookup(&self, name: &str, query: &str, max_size: usize) -> Result<Decision, Error> {
        let c = self.catalog(name)?;
        Ok(c.lookup(query, budget(c, max_size))?)
    }

    /// Resolve a multi-item query.
    pub fn resolve(&self, name: &str, text: &str) -> Result<Resolution, Error> {
        Ok(self.catalog(name)?.lookup_many(text))
    }

    pub fn stats(&self) -> Vec<CatalogStats> {
        self.names()
            .into_iter()
            .filter_map(|n| self.catalogs.get(&n))
            .map(|c| CatalogStats {
                name: c.name().to_string(),
                strategy: c.strategy(),
                entries: c.len(),
                index_entries: c.index_entries(),
                max_results: c.max_results(),
            })
            .collect()
    }
}

fn budget(c: &Catalog, max_size: usize) -> usize {
    if max_size == 0 {
        c.max_results()
    } else {
        max_size
    }
}

/// Load a catalog's CSV file and build its suggester.
pub fn build_catalog(
    name: &str,
    cfg: &CatalogConfig,
    default_max_results: usize,
) -> Result<Catalog, Error> {
    let entries = importer::load_csv(Path::new(&cfg.file))
        .map_err(|e| Error::Load(name.to_string(), e))?;

    Catalog::new(name, entries, &cfg.options(default_max_results))
        .map_err(|e| Error::Build(name.to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::CatalogEntry, suggester::Strategy};

    fn manager() -> Manager {
        let entries = ["hello", "hell", "he", "hall", "abcd"]
            .iter()
            .map(|w| CatalogEntry {
                name: w.to_string(),
                ..Default::default()
            })
            .collect();
        let opts = crate::catalog::CatalogOptions {
            max_dist: Some(1),
            max_results: Some(5),
            ..Default::default()
        };
        Manager::from_catalogs(vec![Catalog::new("words", entries, &opts).unwrap()])
    }

    #[test]
    fn test_unknown_catalog() {
        let m = manager();
        assert!(matches!(
            m.suggest("nope", "he", 5),
            Err(Error::UnknownCatalog(n)) if n == "nope"
        ));
    }

    #[test]
    fn test_default_budget() {
        let m = manager();
        assert_eq!(m.suggest("words", "he", 0).unwrap(), ["he", "hell", "hello"]);
        assert_eq!(m.suggest("words", "he", 1).unwrap(), ["he"]);
    }

    #[test]
    fn test_stats() {
        let stats = manager().stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "words");
        assert_eq!(stats[0].strategy, Strategy::Scanner);
        assert_eq!(stats[0].entries, 5);
        assert_eq!(stats[0].max_results, 5);
    }

    #[tokio::test]
    async fn test_failed_build_waits_for_others() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.csv");
        std::fs::write(&path, "hello\nhell\nhall\n").unwrap();

        let mut cfgs = HashMap::new();
        for name in ["a", "b", "c"] {
            cfgs.insert(
                name.to_string(),
                CatalogConfig {
                    file: path.to_string_lossy().to_string(),
                    strategy: Strategy::Index,
                    ..Default::default()
                },
            );
        }
        cfgs.insert(
            "missing".to_string(),
            CatalogConfig {
                file: "/nonexistent/catalog.csv".to_string(),
                ..Default::default()
            },
        );

        assert!(matches!(
            Manager::new(&cfgs, 5).await,
            Err(Error::Load(n, LoadError::Io(_))) if n == "missing"
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let mut cfgs = HashMap::new();
        cfgs.insert(
            "missing".to_string(),
            CatalogConfig {
                file: "/nonexistent/catalog.csv".to_string(),
                ..Default::default()
            },
        );
        assert!(matches!(
            Manager::new(&cfgs, 5).await,
            Err(Error::Load(n, LoadError::Io(_))) if n == "missing"
        ));
    }
}
