//! folio server binary.

use folio::{app, build_state, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("folio=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = build_state(&settings).await?;
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("folio listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
