use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill::client::{create_ui_router, BackendClient, UiState};
use quill::config::UiConfig;

#[derive(Parser)]
#[command(name = "quill-ui")]
#[command(about = "Form-based playground for the Quill prompt service")]
struct Args {
    /// Interface to bind (overrides QUILL_UI_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides QUILL_UI_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Prompt service base URL (overrides SERVER_BASE_URL)
    #[arg(long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=info,quill_ui=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = UiConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(server) = args.server {
        config.server_base_url = server.trim_end_matches('/').to_string();
    }

    let client = BackendClient::new(&config)?;
    tracing::info!(
        server = %client.base_url(),
        timeout_secs = config.timeout_secs,
        "Using prompt service"
    );

    let app = create_ui_router(UiState::new(client));

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Quill UI starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
