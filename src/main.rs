use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lesson_hub::adapters::auth::FirebaseIdentityVerifier;
use lesson_hub::adapters::http::{build_router, AppState};
use lesson_hub::adapters::mongo::{
    MongoClient, MongoCommentRepository, MongoFavoriteRepository, MongoLessonRepository,
    MongoReportRepository, MongoUserRepository,
};
use lesson_hub::adapters::stripe::StripeCheckoutAdapter;
use lesson_hub::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let db = &config.database;
    let client = MongoClient::connect(&db.uri, &db.name, db.store_timeouts()).await?;
    let names = &db.collections;

    let state = AppState {
        lessons: Arc::new(MongoLessonRepository::new(&client, &names.lessons).await?),
        users: Arc::new(MongoUserRepository::new(&client, &names.users).await?),
        favorites: Arc::new(MongoFavoriteRepository::new(&client, &names.favorites).await?),
        reports: Arc::new(MongoReportRepository::new(&client, &names.reports).await?),
        comments: Arc::new(MongoCommentRepository::new(&client, &names.comments).await?),
        verifier: Arc::new(FirebaseIdentityVerifier::new(config.auth.firebase())),
        checkout: Arc::new(StripeCheckoutAdapter::new(config.payment.stripe()?)),
        checkout_settings: config.payment.checkout_settings(),
    };

    if config.payment.is_test_mode() {
        info!("Stripe is in test mode");
    }

    let app = build_router(state, &config.router_settings());
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = %config.server.environment, "lesson-hub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    client.shutdown().await;
    info!("shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| server.log_filter().into());
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
