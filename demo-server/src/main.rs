use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storelink::SL_ROUTE_PREFIX;
use storelink_axum::{AuthUser, federation_router};

async fn index() -> &'static str {
    "storelink demo - sign in via POST /auth/signin or GET /auth/steam"
}

async fn protected(user: AuthUser) -> String {
    format!(
        "Hello, {}! Linked providers: {}",
        user.label,
        user.accounts
            .iter()
            .map(|a| a.provider.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    storelink::init().await?;

    let app = Router::new()
        .route("/", get(index))
        .route("/protected", get(protected))
        .nest(SL_ROUTE_PREFIX.as_str(), federation_router());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
