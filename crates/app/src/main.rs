mod handlers;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use medchat_core::{
    AnswerCoordinator, EmptyContextPolicy, GeminiEmbedder, GeminiGenerator, IngestionPipeline,
    KnowledgeGraphNavigator, PostgresGraph, QdrantStore,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "medchat-server", version)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    bind_addr: String,

    /// Qdrant base URL
    #[arg(long, env = "QDRANT_URL", default_value = "http://localhost:6333")]
    qdrant_url: String,

    /// Gemini API key used for both embeddings and generation
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: String,

    /// Postgres connection string for the knowledge-graph tables
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Answer 404 instead of falling back to general knowledge when the
    /// similarity search finds nothing
    #[arg(long, env = "CHAT_STRICT_CONTEXT", default_value_t = false)]
    strict_context: bool,
}

/// Service handles constructed once at boot and injected into every handler.
pub struct AppState {
    pub pipeline: IngestionPipeline<GeminiEmbedder, QdrantStore>,
    pub coordinator: AnswerCoordinator<GeminiEmbedder, QdrantStore, GeminiGenerator>,
    pub navigator: KnowledgeGraphNavigator<PostgresGraph>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let embedder = GeminiEmbedder::new(cli.gemini_api_key.clone());
    let vector = QdrantStore::new(&cli.qdrant_url);
    let generator = GeminiGenerator::new(cli.gemini_api_key.clone());
    let pool = PgPoolOptions::new().connect_lazy(&cli.database_url)?;

    let policy = if cli.strict_context {
        EmptyContextPolicy::NotFound
    } else {
        EmptyContextPolicy::GeneralKnowledge
    };

    let state = web::Data::new(AppState {
        pipeline: IngestionPipeline::new(embedder.clone(), vector.clone()),
        coordinator: AnswerCoordinator::new(embedder, vector, generator).with_policy(policy),
        navigator: KnowledgeGraphNavigator::new(PostgresGraph::new(pool)),
    });

    info!(bind = %cli.bind_addr, strict_context = cli.strict_context, "medchat-server boot");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .route("/", web::get().to(handlers::health))
            .route("/upload", web::post().to(handlers::upload_pdf))
            .route("/chat", web::post().to(handlers::chat_with_pdf))
            .route("/kg/navigate", web::post().to(handlers::kg_navigate))
    })
    .bind(&cli.bind_addr)?
    .run()
    .await?;

    Ok(())
}
