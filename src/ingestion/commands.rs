use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    #[serde(rename = "add_stop")]
    AddStop(AddStop),
    #[serde(rename = "add_bus")]
    AddBus(AddBus),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddStop {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub road_distances: Vec<RoadDistance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoadDistance {
    pub to: String,
    pub distance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddBus {
    pub name: String,
    pub circular: bool,
    pub stops: Vec<String>,
}
