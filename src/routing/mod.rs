mod length;
mod reference;
mod router;
mod transit_graph;

pub use length::*;
pub use reference::*;
pub use router::*;
pub use transit_graph::*;
