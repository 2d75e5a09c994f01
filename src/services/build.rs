use std::time::SystemTime;

use thiserror::Error;
use tracing::info;

use crate::ingestion::{self, DocumentError};
use crate::services::{Database, DatabaseError};
use crate::structures::Config;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Loads the network document named by the config, ingests it, and builds
/// the transit graph.
pub fn build_database(config: &Config) -> Result<Database, BuildError> {
    let before = SystemTime::now();

    let network = ingestion::load_network(&config.network)?;
    info!(
        commands = network.commands.len(),
        path = %config.network,
        "network document loaded"
    );

    let mut database = Database::new(config.routing);
    database.execute_commands(&network.commands)?;
    database.build_map()?;

    if let Ok(elapsed) = before.elapsed() {
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            stops = database.stops().len(),
            buses = database.buses().len(),
            "database built"
        );
    }

    Ok(database)
}
