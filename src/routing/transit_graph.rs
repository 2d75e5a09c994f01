use std::collections::HashMap;

use tracing::debug;

use crate::structures::{
    BusId, BusRegistry, DirectedGraph, DistanceError, DistanceTable, Edge, RoutingSettings, StopId,
    StopRegistry, VertexId,
};

/// A vertex of the derived two-tier routing graph: waiting at a stop for
/// any bus, or riding a specific bus at a specific stop occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertex {
    Wait { stop: StopId },
    Ride { bus: BusId, stop: StopId },
}

/// The time-weighted wait/ride multigraph derived from the ingested
/// network. Immutable once built; weights are minutes.
#[derive(Debug)]
pub struct TransitGraph {
    graph: DirectedGraph<f64>,
    vertices: Vec<Vertex>,
    wait_by_stop: HashMap<StopId, VertexId>,
    rides_by_stop: HashMap<StopId, Vec<VertexId>>,
}

impl TransitGraph {
    pub fn build(
        stops: &StopRegistry,
        buses: &BusRegistry,
        distances: &DistanceTable,
        settings: &RoutingSettings,
    ) -> Result<TransitGraph, DistanceError> {
        let ride_total: usize = buses.iter().map(|(_, bus)| bus.stop_count()).sum();
        let vertex_total = ride_total + stops.len();

        let mut graph = DirectedGraph::new(vertex_total);
        let mut vertices = Vec::with_capacity(vertex_total);
        let mut rides_by_stop: HashMap<StopId, Vec<VertexId>> = HashMap::new();
        let meters_per_minute = settings.bus_velocity * 1000.0 / 60.0;

        for (bus_id, bus) in buses.iter() {
            let mut previous: Option<(VertexId, StopId)> = None;
            for stop in bus.traversal() {
                let vertex = VertexId(vertices.len());
                vertices.push(Vertex::Ride { bus: bus_id, stop });
                rides_by_stop.entry(stop).or_default().push(vertex);

                if let Some((previous_vertex, previous_stop)) = previous {
                    let meters = distances.get(previous_stop, stop)?;
                    graph.add_edge(Edge {
                        from: previous_vertex,
                        to: vertex,
                        weight: meters / meters_per_minute,
                    });
                }
                previous = Some((vertex, stop));
            }
            debug!(bus = %bus.name, spans = bus.stop_count(), "route vertices emitted");
        }

        let mut wait_by_stop = HashMap::with_capacity(stops.len());
        for (stop_id, _) in stops.iter() {
            let wait = VertexId(vertices.len());
            vertices.push(Vertex::Wait { stop: stop_id });
            wait_by_stop.insert(stop_id, wait);

            if let Some(rides) = rides_by_stop.get(&stop_id) {
                for &ride in rides {
                    graph.add_edge(Edge {
                        from: wait,
                        to: ride,
                        weight: settings.bus_wait_time,
                    });
                    graph.add_edge(Edge {
                        from: ride,
                        to: wait,
                        weight: 0.0,
                    });
                }
            }
        }

        Ok(TransitGraph {
            graph,
            vertices,
            wait_by_stop,
            rides_by_stop,
        })
    }

    pub fn graph(&self) -> &DirectedGraph<f64> {
        &self.graph
    }

    pub fn vertex(&self, id: VertexId) -> Vertex {
        self.vertices[id.0]
    }

    pub fn wait_vertex(&self, stop: StopId) -> Option<VertexId> {
        self.wait_by_stop.get(&stop).copied()
    }

    pub fn rides_at(&self, stop: StopId) -> &[VertexId] {
        self.rides_by_stop
            .get(&stop)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
