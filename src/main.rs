/// API сервер для модели калорий

use std::sync::Arc;

use anyhow::Context;

use calorie_ml::{
    api::{router, AppState},
    config::ServerConfig,
    registry::ModelRegistry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::load().context("failed to load configuration")?;
    let registry = Arc::new(ModelRegistry::new(&config.data_path));

    // Без данных сервер не стартует
    if config.eager_fit {
        registry.fit_at_startup().await?;
    }

    let app = router(AppState { registry });

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
