use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    backstage_observability::init();

    let config = backstage_api::config::AppConfig::from_env().context("invalid configuration")?;
    config.log_summary();

    let validator = backstage_infra::session_validator(&config.auth)
        .context("failed to build session validator")?;

    let app = backstage_api::app::build_app(&config, validator);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
