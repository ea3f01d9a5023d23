pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tokio::net::TcpListener;

    system::tracing::initialize()?;

    // Путь к конфигу можно передать первым аргументом
    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let config = shared::config::load_config(config_path.as_deref())?;

    let source = shared::sources::build_source(&config.source)?;
    tracing::info!(
        "Enable flag column: {} (zero-based)",
        config.convert.enabled_column
    );

    let app = routes::configure_routes(routes::AppState {
        source,
        options: config.convert,
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
