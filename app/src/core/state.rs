use sea_orm::DatabaseConnection;

use crate::{config::config::Config, services::search::ProximitySearchEngine};

#[derive(Clone, Debug)]
pub struct AppState {
    pub database: DatabaseConnection,
    pub config: Config,
    pub search: ProximitySearchEngine,
}

impl AppState {
    pub fn new(database: DatabaseConnection, config: Config) -> Self {
        let search = ProximitySearchEngine::from_config(&config);
        Self {
            database,
            config,
            search,
        }
    }
}
