mod commands;

pub use commands::*;

use std::fs;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::queries::Query;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yml::Error,
    },
}

#[derive(Debug, Deserialize)]
pub struct NetworkDocument {
    pub commands: Vec<Command>,
}

#[derive(Debug, Deserialize)]
pub struct QueryDocument {
    pub queries: Vec<Query>,
}

pub fn load_network(path: &str) -> Result<NetworkDocument, DocumentError> {
    load_document(path)
}

pub fn load_queries(path: &str) -> Result<QueryDocument, DocumentError> {
    load_document(path)
}

fn load_document<T: DeserializeOwned>(path: &str) -> Result<T, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_yml::from_str(&content).map_err(|source| DocumentError::Parse {
        path: path.to_string(),
        source,
    })
}
