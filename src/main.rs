//! Bandscore HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use bandscore::completion::CompletionClient;
use bandscore::config::Config;
use bandscore::embedding::EssayEmbedder;
use bandscore::gateway::{HandlerState, create_router_with_state};
use bandscore::ingest::{DEFAULT_SNAPSHOT_FILENAME, DatasetIngestor, IngestConfig};
use bandscore::metrics::EvaluationMetrics;
use bandscore::retrieval::{ESSAY_COLLECTION_NAME, EssayIndex, QdrantEssayIndex};
use bandscore::scoring::EssayScorer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let embedder = Arc::new(build_embedder(&config));
    let index = Arc::new(QdrantEssayIndex::new(&config.qdrant_url).await?);

    if std::env::args().any(|arg| arg == "--ingest") {
        return run_ingestion(&config, index, embedder).await;
    }

    let addr: SocketAddr = config.socket_addr().parse()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        chat_model = %config.chat_model,
        "bandscore starting"
    );

    index
        .ensure_collection(ESSAY_COLLECTION_NAME, embedder.embedding_dim() as u64)
        .await?;

    let completions = if config.mock_provider {
        tracing::warn!("BANDSCORE_MOCK_PROVIDER set, serving canned completions");
        CompletionClient::mock()
    } else {
        CompletionClient::new(config.chat_model.clone())
    };

    let metrics = Arc::new(EvaluationMetrics::new());
    let scorer = EssayScorer::new(
        index,
        embedder,
        completions,
        Arc::clone(&metrics),
        ESSAY_COLLECTION_NAME,
    )
    .with_retrieval_limits(config.top_k, config.similarity_threshold);

    let state = HandlerState::new(Arc::new(scorer), metrics);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("bandscore shutdown complete");
    Ok(())
}

fn build_embedder(config: &Config) -> EssayEmbedder {
    match &config.embed_api_key {
        Some(api_key) => EssayEmbedder::remote(
            config.embed_url.clone(),
            config.embed_model.clone(),
            api_key.clone(),
        ),
        None => {
            tracing::warn!("no BANDSCORE_EMBED_API_KEY configured, running embedder in stub mode");
            EssayEmbedder::stub()
        }
    }
}

async fn run_ingestion(
    config: &Config,
    index: Arc<QdrantEssayIndex>,
    embedder: Arc<EssayEmbedder>,
) -> anyhow::Result<()> {
    let dataset_path = config
        .dataset_path
        .clone()
        .ok_or_else(|| anyhow::anyhow!("BANDSCORE_DATASET_PATH must be set for --ingest"))?;

    tracing::info!(dataset = %dataset_path.display(), "starting dataset ingestion");

    let ingest_config = IngestConfig {
        collection: ESSAY_COLLECTION_NAME.to_string(),
        batch_size: config.ingest_batch_size,
        batch_delay: Duration::from_millis(config.ingest_delay_ms),
        snapshot_path: config.store_path.join(DEFAULT_SNAPSHOT_FILENAME),
    };

    let ingestor = DatasetIngestor::new(index, embedder, ingest_config);
    let summary = ingestor.run_from_path(&dataset_path).await?;

    tracing::info!(
        total_rows = summary.total_rows,
        accepted = summary.accepted,
        skipped = summary.skipped,
        "dataset ingestion complete"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
