use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use announcements_api::{
    app,
    config::{Config, StorageBackend},
    db::{self, MemoryAnnouncementStore, MemoryTeacherDirectory, PgAnnouncementStore, PgTeacherDirectory},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Missing required env var: DATABASE_URL"))?;
            let pool = db::create_pool(database_url).await?;
            db::run_migrations(&pool).await?;
            info!("Database connected and migrations applied");

            AppState {
                announcements: Arc::new(PgAnnouncementStore::new(pool.clone())),
                teachers: Arc::new(PgTeacherDirectory::new(pool)),
                config: config.clone(),
            }
        }
        StorageBackend::Memory => {
            info!(
                "Using in-memory store with {} seeded teacher(s)",
                config.seed_teachers.len()
            );
            AppState {
                announcements: Arc::new(MemoryAnnouncementStore::new()),
                teachers: Arc::new(MemoryTeacherDirectory::new(config.seed_teachers.clone())),
                config: config.clone(),
            }
        }
    };

    let addr = format!("{}:{}", config.host, config.port);
    info!("announcements API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
