use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Size of the postgres connection pool
    pub database_max_connections: u32,
    /// Whether pending migrations are applied when the context is created
    pub run_migrations: bool,
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env_or_default("PORT", 5000);
        let database_max_connections = parse_env_or_default("MAX_DB_CONNECTIONS", 5);
        let run_migrations = parse_env_or_default("RUN_MIGRATIONS", true);

        Self {
            port,
            database_max_connections,
            run_migrations,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
