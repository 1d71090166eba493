use anyhow::Context;

use gallery_server::{create_router, AppState};

const DEFAULT_ADDR: &str = "0.0.0.0:3001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_server=info,tower_http=info".into()),
        )
        .init();

    let addr = std::env::var("GALLERY_SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let app = create_router(AppState::default());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
