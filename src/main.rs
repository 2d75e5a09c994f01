use std::env;
use std::process::ExitCode;

use tracing::{error, info};

use buscat::ingestion;
use buscat::services::build_database;
use buscat::structures::Config;

fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let config_path = env::args().nth(1).unwrap_or_else(|| "config.yml".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut database = match build_database(&config) {
        Ok(database) => database,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let document = match ingestion::load_queries(&config.queries) {
        Ok(document) => document,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(queries = document.queries.len(), "query document loaded");

    let responses = match database.execute_queries(&document.queries) {
        Ok(responses) => responses,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_yml::to_string(&responses) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize responses: {e}");
            ExitCode::FAILURE
        }
    }
}
