use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sous_agent::{Agent, ConversationService};
use sous_api::{
    config::Config,
    handlers::{health, questions, threads},
    state::AppState,
};
use sous_kg::{HttpGraphStore, ToolRegistry};
use sous_llm::OpenAIClient;
use sous_persist::{ConversationStore, MongoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Sous API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize model client
    tracing::info!("Initializing model client");
    let chat_client = Arc::new(OpenAIClient::new(config.openai_api_key.clone())?);

    // Initialize graph store client and tool registry
    tracing::info!("Connecting to knowledge graph store");
    let graph_store = Arc::new(HttpGraphStore::new(&config.kg_endpoint)?);
    let registry = Arc::new(ToolRegistry::for_store(graph_store));

    // Initialize persistence
    tracing::info!("Connecting to MongoDB");
    let store: Arc<dyn ConversationStore> = Arc::new(
        MongoStore::connect(&config.mongodb_uri, &config.mongodb.database).await?,
    );
    tracing::info!("MongoDB connected");

    // Assemble the agent and service
    let agent = Agent::builder()
        .chat_client(chat_client)
        .registry(registry)
        .config(config.agent.clone().into())
        .llm(config.llm.clone().into())
        .build()?;

    let service = ConversationService::new(Arc::clone(&store), Arc::new(agent));

    // Create application state
    let state = AppState::new(config.clone(), service, store);

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Questions
        .route("/questions", post(questions::post_question))
        // Threads
        .route("/threads", post(threads::create_thread))
        .route("/threads/:thread_id/messages", get(threads::list_messages));

    let cors = build_cors_layer(state.config.as_ref());

    Router::new()
        .merge(api_routes)
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(120)))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &sous_api::config::Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            for origin in &config.cors.origins {
                if let Ok(parsed_origin) = origin.parse::<axum::http::HeaderValue>() {
                    cors = cors.allow_origin(parsed_origin);
                }
            }
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
