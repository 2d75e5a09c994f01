use serde::Deserialize;

/// Opaque request identifier, echoed back verbatim in the response.
pub type RequestId = u64;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "query")]
pub enum Query {
    #[serde(rename = "bus")]
    Bus(BusQuery),
    #[serde(rename = "stop")]
    Stop(StopQuery),
    #[serde(rename = "route")]
    Route(RouteQuery),
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusQuery {
    pub id: RequestId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopQuery {
    pub id: RequestId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteQuery {
    pub id: RequestId,
    pub from: String,
    pub to: String,
}
