use crate::routing::TransitGraph;
use crate::structures::{DirectedGraph, HeapError, IndexedPriorityQueue, StopId, VertexId};

/// One settled vertex on a found route, with the cumulative travel time
/// from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub vertex: VertexId,
    pub predecessor: Option<VertexId>,
    pub total_time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitRoute {
    pub total_time: f64,
    pub steps: Vec<PathStep>,
}

/// Shortest-transfer search between wait vertices of a built transit
/// graph.
pub struct TransitRouter<'a> {
    graph: &'a TransitGraph,
}

impl<'a> TransitRouter<'a> {
    pub fn new(graph: &'a TransitGraph) -> TransitRouter<'a> {
        TransitRouter { graph }
    }

    pub fn find_route(
        &self,
        from: StopId,
        to: StopId,
    ) -> Result<Option<TransitRoute>, HeapError> {
        let (Some(source), Some(target)) = (
            self.graph.wait_vertex(from),
            self.graph.wait_vertex(to),
        ) else {
            return Ok(None);
        };

        let Some(search) = shortest_path(self.graph.graph(), source, target)? else {
            return Ok(None);
        };

        let mut steps = Vec::new();
        let mut current = target;
        loop {
            let predecessor = search.predecessors[current.0];
            steps.push(PathStep {
                vertex: current,
                predecessor,
                total_time: search.distances[current.0],
            });
            match predecessor {
                Some(previous) => current = previous,
                None => break,
            }
        }
        steps.reverse();

        Ok(Some(TransitRoute {
            total_time: search.distances[target.0],
            steps,
        }))
    }
}

/// Settled state of a successful search: per-vertex cumulative weight and
/// predecessor pointers back to the source.
#[derive(Debug)]
pub struct SearchState {
    pub distances: Vec<f64>,
    pub predecessors: Vec<Option<VertexId>>,
}

/// Dijkstra over a non-negatively weighted graph, driven by the indexed
/// queue in min order with decrease-key on relaxation. The source is
/// seeded with 0 and every other vertex with infinity; the search stops as
/// soon as the target is extracted. Returns `None` when the target is
/// unreachable.
pub fn shortest_path(
    graph: &DirectedGraph<f64>,
    source: VertexId,
    target: VertexId,
) -> Result<Option<SearchState>, HeapError> {
    let vertex_count = graph.vertex_count();
    let mut distances = vec![f64::INFINITY; vertex_count];
    let mut predecessors: Vec<Option<VertexId>> = vec![None; vertex_count];
    distances[source.0] = 0.0;

    let mut queue = IndexedPriorityQueue::min(vertex_count);
    for vertex in 0..vertex_count {
        queue.insert(VertexId(vertex), distances[vertex])?;
    }

    while !queue.is_empty() {
        let (vertex, time) = queue.pop()?;
        if time.is_infinite() {
            break;
        }
        if vertex == target {
            return Ok(Some(SearchState {
                distances,
                predecessors,
            }));
        }

        for edge_id in graph.incident_edges(vertex) {
            let edge = graph.edge(edge_id);
            if !queue.contains(&edge.to) {
                continue;
            }
            let candidate = time + edge.weight;
            if candidate < distances[edge.to.0] {
                distances[edge.to.0] = candidate;
                predecessors[edge.to.0] = Some(vertex);
                queue.update_priority(&edge.to, candidate)?;
            }
        }
    }

    Ok(None)
}
