use chrono::{Local, Timelike};
use health_dashboard::{
    AppConfig, AppState, DailyMetricsStore, FileStore,
    notifications::{NotificationFeed, welcome_notice},
    router,
    scheduler::{spawn_day_cycle, spawn_reminders},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    let backend = FileStore::open(&config.data_dir).await?;
    info!(data_dir = %backend.dir().display(), "opened data directory");

    let store = DailyMetricsStore::open(backend).await;
    info!(health_score = store.health_score(), "restored health data");

    let feed = NotificationFeed::new();
    feed.publish(welcome_notice(Local::now().hour())).await;
    let state = AppState::new(store, feed);

    let tasks = [
        spawn_day_cycle(state.clone(), config.day_length),
        spawn_reminders(state.clone(), config.reminder_interval),
    ];
    for task in &tasks {
        info!(task = task.name(), "scheduled background task");
    }

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for task in &tasks {
        task.cancel();
    }
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
