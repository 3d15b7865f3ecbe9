mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    IBookRepo, IGroupRepo, IMeetingParticipantRepo, IMeetingRepo, IMeetingRequirementRepo,
    IRequirementFulfillmentRepo, IReviewRepo, IUserRepo, ParticipantInsertResult, Repos,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct BookclubContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl BookclubContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new();
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&params.postgres_connection_string)
            .await?;

        if config.run_migrations {
            info!("Running database migrations");
            sqlx::migrate!().run(&pool).await?;
        }

        let repos = Repos::create_postgres(pool).await?;
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// Context backed by inmemory repositories, used by tests
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<BookclubContext> {
    BookclubContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string()?,
    })
    .await
}

fn get_psql_connection_string() -> anyhow::Result<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .map_err(|_| anyhow::anyhow!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

