use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::config::Config;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] DbErr),

    #[error("Configuration Error: {0}")]
    ConfigError(String),
}

pub async fn connect_database(config: &Config) -> Result<DatabaseConnection, DatabaseError> {
    let database_url = &config.database_url;

    if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
        return Err(DatabaseError::ConfigError(
            "Invalid Database URL - It must start with postgres://".to_string(),
        ));
    }

    let mut opt = ConnectOptions::new(database_url.as_str());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    info!("Connected to database");

    Ok(db)
}

pub async fn run_migrations(connection: &DatabaseConnection) -> Result<(), DatabaseError> {
    Migrator::up(connection, None).await?;
    info!("Migrations applied");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_postgres_urls() {
        let config = Config {
            database_url: "mysql://localhost/services".to_string(),
            port: 8000,
            server_ip: std::net::IpAddr::from([127, 0, 0, 1]),
            max_connections: 1,
            min_connections: 1,
            jwt_secret: "secret".to_string(),
            default_radius_km: 25.0,
            search_case_sensitive: true,
            seed_user_email: None,
            seed_user_name: None,
        };

        let result = connect_database(&config).await;
        assert!(matches!(result, Err(DatabaseError::ConfigError(_))));
    }
}
