use axum::{Extension, Router, routing::get};
use clap::Parser;
use grid_join::config::Config;
use grid_join::ingestion::loader::load_file;
use grid_join::ingestion::printer::{print_caches, print_employees};
use grid_join::ingestion::types::LoadOptions;
use grid_join::query::handlers::{
    ENDPOINT_CACHES, ENDPOINT_EMPLOYEES, ENDPOINT_RECORD, handle_employees, handle_get_record,
    handle_list_caches,
};
use grid_join::query::{create_caches, employees_of};
use grid_join::registry::CacheRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // 1. Caches:
    let registry = CacheRegistry::new();
    tracing::info!("Node ID: {:?}", registry.node_id());
    let (organizations, persons) = create_caches(&registry)?;

    // 2. Load:
    let options = LoadOptions {
        strict: config.strict,
        echo: config.echo,
    };
    load_file(&config.organizations, &organizations, options)?;
    load_file(&config.persons, &persons, options)?;

    if let Some(path) = &config.snapshot {
        registry.write_snapshot(path)?;
    }

    // 3. Query:
    let names = employees_of(&registry, &config.organization, config.ignore_case)?;
    tracing::info!(
        "{} person(s) work for '{}'",
        names.len(),
        config.organization
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_caches(&mut out, &registry.list())?;
    print_employees(&mut out, &names)?;
    drop(out);

    // 4. Optional HTTP surface:
    let Some(addr) = config.serve else {
        return Ok(());
    };

    let app = Router::new()
        .route(ENDPOINT_CACHES, get(handle_list_caches))
        .route(ENDPOINT_RECORD, get(handle_get_record))
        .route(ENDPOINT_EMPLOYEES, get(handle_employees))
        .layer(Extension(registry));

    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
        })
        .await?;

    Ok(())
}
