use std::collections::HashMap;

use crate::{
    manager::{Error, Manager},
    models::{CatalogConfig, Config},
};

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Build the manager for the configured catalogs. If `only` is given, just
/// that catalog is built.
pub async fn init_manager(config: &Config, only: Option<&str>) -> Result<Manager, Error> {
    let cfgs: HashMap<String, CatalogConfig> = match only {
        Some(name) => {
            let cfg = config
                .catalog
                .get(name)
                .ok_or_else(|| Error::UnknownCatalog(name.to_string()))?;
            HashMap::from([(name.to_string(), cfg.clone())])
        }
        None => config.catalog.clone(),
    };

    for (name, cfg) in &cfgs {
        log::info!(
            "catalog: {} (file: {}, strategy: {})",
            name,
            cfg.file,
            cfg.strategy
        );
    }

    Manager::new(&cfgs, config.app.default_max_results).await
}
