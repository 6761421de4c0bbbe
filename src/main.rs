use jsonrpc_inti::{build_app, config::Config, logging, procedures::demo_registry, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging("info");

    let config = Config::from_env()?;
    let registry = demo_registry();
    let methods = registry.method_names().join(",");
    let state = AppState::new(registry);
    let app = build_app(state, &config.rpc_path);
    let listener = tokio::net::TcpListener::bind(config.bind_socket()?).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        rpc_path = %config.rpc_path,
        methods = %methods,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
