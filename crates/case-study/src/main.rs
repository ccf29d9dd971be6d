mod config;
mod error;
mod ingest;
mod model;
mod search;
mod server;
mod session;
mod store;
mod summarize;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use case_common::genai::GenaiClient;
use case_common::redis::RedisStore;

use config::Config;
use server::CaseStudyServer;
use session::SessionController;
use store::{ArticleStore, RedisArticleStore};
use summarize::Summarizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting case-study MCP server");

    // 1. Load config from environment
    let config = Config::from_env()?;
    info!(
        genai_base_url = %config.genai.base_url,
        model = %config.genai.model,
        categories = ?config.categories,
        seed = config.seed_path.is_some(),
        "configuration loaded"
    );

    // 2. Document store. Unreachable at startup is not fatal: each search
    // reports the failure to the user instead.
    let redis = RedisStore::open(&config.redis_url)?;
    match redis.ping().await {
        Ok(()) => info!("redis connected"),
        Err(e) => warn!(error = %e, "redis unavailable, searches will fail until it is reachable"),
    }
    let store: Arc<dyn ArticleStore> = Arc::new(RedisArticleStore::new(redis));

    // 3. Seed the default category if a seed file is configured
    if let Some(path) = &config.seed_path {
        let articles = ingest::load_seed_file(path)?;
        match ingest::ingest(store.as_ref(), config.default_category(), articles).await {
            Ok(report) => info!(
                category = config.default_category(),
                stored = report.stored,
                skipped = report.skipped,
                "seed applied"
            ),
            Err(e) => warn!(error = %e, "seeding skipped"),
        }
    }

    // 4. Summarization client
    let genai = GenaiClient::new(config.genai.clone())?;
    let summarizer = Summarizer::new(Arc::new(genai));

    // 5. Build MCP server and serve on stdio
    let session = SessionController::new(Arc::clone(&store), summarizer);
    let server = CaseStudyServer::new(session, store, config.categories.clone());

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
