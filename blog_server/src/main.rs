//! Blog server binary.
//!
//! Serves the `/posts` REST resource, the `/api/blog` store proxy and the
//! rendered pages from one listener.

use std::net::SocketAddr;

use clap::Parser;

use blog_server::config::{BlogConfig, StoreKind};
use blog_server::routes;

#[derive(Parser)]
#[command(name = "blog", about = "Minimal blog server")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "BLOG_PORT", default_value = "3000")]
    port: u16,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Article store backend
    #[arg(long, env = "BLOG_STORE", value_enum, default_value_t = StoreKind::Auto)]
    store: StoreKind,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    tracing::info!(port = cli.port, store = ?cli.store, "Starting blog server...");

    let config = BlogConfig::from_env(cli.port);
    let store = blog_server::store::open(cli.store, &config, cli.database_url.as_deref()).await?;
    let store_name = store.name();
    let state = blog_server::app_state(&config, store)?;
    tracing::info!(api = %config.api_base_url, "Pages read from BlogAPI");

    let app = routes::blog_router(state);

    // Initialize metrics
    blog_server::metrics::init_metrics();

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!(store = store_name, "Blog server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Blog server stopped");

    Ok(())
}

/// Text logs by default, JSON when `LOG_FORMAT=json`; `RUST_LOG` filters.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, draining blog requests..."),
        _ = terminate => tracing::info!("Received SIGTERM, draining blog requests..."),
    }
}
