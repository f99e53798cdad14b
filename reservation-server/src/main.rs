use reservation_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env, configuration, logging
    let config = setup_environment()?;

    print_banner();
    tracing::info!(
        port = config.http_port,
        timezone = %config.timezone,
        environment = %config.environment,
        "Reservation server starting..."
    );

    // 2. Database and shared state
    let state = ServerState::initialize(&config).await?;

    // 3. Serve until ctrl-c
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
