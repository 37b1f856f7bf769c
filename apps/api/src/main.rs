use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use payment_cell::{PaymentProcessor, StripeClient};
use router::AppServices;
use shared_config::{AppConfig, DatabaseMode};
use shared_database::{memory::MemoryStore, mongo::MongoStore};
use shared_utils::identity::FirebaseVerifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Doctors Portal API server");

    let config = Arc::new(AppConfig::from_env());

    if !config.is_database_configured() {
        bail!("Database credentials missing: set DB_USER and DB_PASS, MONGODB_URI, or DATABASE_MODE=memory");
    }

    // One store handle for the whole process.
    let mongo = match config.database_mode {
        DatabaseMode::MongoDb => Some(Arc::new(
            MongoStore::connect(&config)
                .await
                .context("Failed to connect to MongoDB")?,
        )),
        DatabaseMode::Memory => {
            warn!("Using in-memory store, data will not survive a restart");
            None
        }
    };

    let services = match &mongo {
        Some(store) => AppServices {
            users: store.clone(),
            appointments: store.clone(),
            doctors: store.clone(),
            verifier: Arc::new(FirebaseVerifier::new(&config)),
            payments: None,
        },
        None => {
            let store = Arc::new(MemoryStore::new());
            AppServices {
                users: store.clone(),
                appointments: store.clone(),
                doctors: store,
                verifier: Arc::new(FirebaseVerifier::new(&config)),
                payments: None,
            }
        }
    };

    let payments: Option<Arc<dyn PaymentProcessor>> = match StripeClient::new(&config) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("Payment routes disabled: {}", e);
            None
        }
    };

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(config.clone(), AppServices { payments, ..services })
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = mongo {
        store.shutdown().await;
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
