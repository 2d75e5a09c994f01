use serde::Serialize;

use crate::queries::RequestId;

/// Structured query responses, handed to an external serializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Response {
    #[serde(rename = "found_bus")]
    FoundBus {
        id: RequestId,
        name: String,
        stop_count: usize,
        unique_stop_count: usize,
        length: f64,
        curvature: f64,
    },
    #[serde(rename = "no_bus")]
    NoBus { id: RequestId, name: String },
    #[serde(rename = "found_stop")]
    FoundStop {
        id: RequestId,
        name: String,
        buses: Vec<String>,
    },
    #[serde(rename = "no_stop")]
    NoStop { id: RequestId, name: String },
    #[serde(rename = "found_route")]
    FoundRoute { id: RequestId },
    #[serde(rename = "no_route")]
    NoRoute { id: RequestId },
}

impl Response {
    pub fn id(&self) -> RequestId {
        match *self {
            Response::FoundBus { id, .. }
            | Response::NoBus { id, .. }
            | Response::FoundStop { id, .. }
            | Response::NoStop { id, .. }
            | Response::FoundRoute { id }
            | Response::NoRoute { id } => id,
        }
    }
}
