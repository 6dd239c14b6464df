use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill::api::{create_router, AppState};
use quill::config::Config;
use quill::llm::resolve_bindings;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Prompt service exposing essay and poem chains over HTTP")]
struct Args {
    /// Interface to bind (overrides QUILL_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides QUILL_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Initializing OpenAI model: {}...", config.openai.model);
    let bindings = resolve_bindings(&config).await?;
    tracing::info!(
        openai_available = bindings.availability.openai,
        groq_available = bindings.availability.groq,
        poem_provider = %bindings.poem.provider(),
        "Model bindings resolved"
    );

    let app = create_router(AppState::new(bindings));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Quill starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
