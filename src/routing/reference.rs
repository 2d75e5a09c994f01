use std::collections::HashMap;
use std::ops::Add;

use crate::structures::{DirectedGraph, VertexId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RouteHandle(u64);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RouteSummary<W> {
    pub handle: RouteHandle,
    pub total_weight: W,
    pub vertex_count: usize,
}

/// Reference shortest-path routine over the raw graph primitive:
/// iterative edge relaxation to a fixed point, O(vertices × edges) per
/// query, no heap involved.
///
/// Each built route is cached under its handle so callers can look up the
/// path repeatedly; a route stays cached until [`Self::release_route`] is
/// called for it. A handle that is never released occupies the cache for
/// the lifetime of the router.
#[derive(Debug)]
pub struct ReferenceRouter<'a, W> {
    graph: &'a DirectedGraph<W>,
    routes: HashMap<RouteHandle, Vec<VertexId>>,
    next_handle: u64,
}

impl<'a, W> ReferenceRouter<'a, W>
where
    W: Copy + Default + PartialOrd + Add<Output = W>,
{
    pub fn new(graph: &'a DirectedGraph<W>) -> ReferenceRouter<'a, W> {
        ReferenceRouter {
            graph,
            routes: HashMap::new(),
            next_handle: 0,
        }
    }

    pub fn build_route(&mut self, from: VertexId, to: VertexId) -> Option<RouteSummary<W>> {
        let vertex_count = self.graph.vertex_count();
        let mut distances: Vec<Option<W>> = vec![None; vertex_count];
        let mut predecessors: Vec<Option<VertexId>> = vec![None; vertex_count];
        distances[from.0] = Some(W::default());

        for _ in 0..vertex_count {
            let mut changed = false;
            for (_, edge) in self.graph.edges() {
                let Some(base) = distances[edge.from.0] else {
                    continue;
                };
                let candidate = base + edge.weight;
                if distances[edge.to.0].is_none_or(|current| candidate < current) {
                    distances[edge.to.0] = Some(candidate);
                    predecessors[edge.to.0] = Some(edge.from);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let total_weight = distances[to.0]?;

        let mut vertices = vec![to];
        let mut current = to;
        while current != from {
            current = predecessors[current.0]?;
            vertices.push(current);
        }
        vertices.reverse();

        let handle = RouteHandle(self.next_handle);
        self.next_handle += 1;
        let summary = RouteSummary {
            handle,
            total_weight,
            vertex_count: vertices.len(),
        };
        self.routes.insert(handle, vertices);
        Some(summary)
    }

    pub fn route_vertices(&self, handle: RouteHandle) -> Option<&[VertexId]> {
        self.routes.get(&handle).map(Vec::as_slice)
    }

    /// Evicts a built route. Returns `false` if the handle was already
    /// released or never existed.
    pub fn release_route(&mut self, handle: RouteHandle) -> bool {
        self.routes.remove(&handle).is_some()
    }

    pub fn cached_routes(&self) -> usize {
        self.routes.len()
    }
}
