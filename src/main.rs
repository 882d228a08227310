mod cli;

use std::sync::Arc;

use clap::Parser;

use cli::Commands;
use wordmatch::{
    config,
    handlers::{Consts, Ctx},
    http, init,
    manager::Manager,
    models::Config,
    policy::Outcome,
};

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    let cmd = cli.command.unwrap_or(Commands::Serve);
    match cmd {
        // Generate a new config file.
        Commands::NewConfig { path } => {
            match config::generate_sample(&path) {
                Ok(_) => {
                    log::info!("config file generated: {}", path.display());
                }
                Err(e) => {
                    log::error!("error generating config: {}", e);
                    std::process::exit(1);
                }
            }
        }

        // Print raw suggestions, one per line.
        Commands::Suggest {
            catalog,
            max,
            query,
        } => {
            let config = config::load_all(&cli.config);
            let mgr = load_manager(&config, Some(&catalog)).await;

            match mgr.suggest(&catalog, &query, max) {
                Ok(words) => {
                    for w in words {
                        println!("{}", w);
                    }
                }
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        // Print the decision for a query.
        Commands::Lookup {
            catalog,
            max,
            query,
        } => {
            let config = config::load_all(&cli.config);
            let mgr = load_manager(&config, Some(&catalog)).await;

            match mgr.lookup(&catalog, &query, max) {
                Ok(d) => {
                    println!("{}", d.message());
                    if let wordmatch::policy::Decision::Ambiguous { candidates } = &d {
                        for c in candidates {
                            println!("  {}", c);
                        }
                    }
                }
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        // Print the resolution of every fragment.
        Commands::Resolve { catalog, text } => {
            let config = config::load_all(&cli.config);
            let mgr = load_manager(&config, Some(&catalog)).await;

            let r = match mgr.resolve(&catalog, &text) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            };

            if let Some(d) = r.disclosure() {
                println!("{}", d);
            }
            for item in &r.items {
                let status = match &item.outcome {
                    Outcome::Found { word } | Outcome::Corrected { word, .. } => word.clone(),
                    Outcome::Duplicate { word } => format!("{} (used twice)", word),
                    Outcome::Unrecognized => "not recognized".to_string(),
                    Outcome::TooBroad => "too broad".to_string(),
                    Outcome::Invalid { reason } => reason.clone(),
                };
                println!("{} x {}: {}", item.coefficient, item.fragment, status);
            }
        }

        Commands::Serve => serve(&cli.config).await,
    }
}

/// Start the HTTP server.
async fn serve(paths: &[std::path::PathBuf]) {
    let config = config::load_all(paths);
    let mgr = Arc::new(load_manager(&config, None).await);

    let mut consts = Consts::default();
    if config.app.max_results_cap > 0 {
        consts.max_results_cap = config.app.max_results_cap;
    }

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx {
        mgr,
        consts,
        version: env!("VERSION").to_string(),
    });

    let routes = http::init_handlers(ctx);
    let addr = if config.app.address.is_empty() {
        "127.0.0.1:9000".to_string()
    } else {
        config.app.address.clone()
    };

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}

/// Build catalogs and exit on failure.
async fn load_manager(config: &Config, only: Option<&str>) -> Manager {
    match init::init_manager(config, only).await {
        Ok(m) => m,
        Err(e) => {
            log::error!("error initializing catalogs: {}", e);
            std::process::exit(1);
        }
    }
}
