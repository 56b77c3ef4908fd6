//! Edmonds-Karp maximum flow with min-cut recovery.
//!
//! Augmenting paths are found breadth-first, so each path is a shortest path in the residual
//! graph and the number of augmentations is bounded by `O(VE)` irrespective of capacities.
//! After the flow converges, the source side of a minimum cut is recovered by a separate
//! traversal of the residual graph, and the result is checked for capacity bounds, flow
//! conservation, and max-flow/min-cut duality.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::trace;

use crate::network::{Capacity, FlowNetwork, Vertex};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowConsistencyError {
    #[error("edge {from} -> {to} carries {flow}, exceeding its capacity of {capacity}")]
    CapacityExceeded {
        from: Vertex,
        to: Vertex,
        flow: Capacity,
        capacity: Capacity,
    },

    #[error("flow is not conserved at {vertex}: {inflow} in, {outflow} out")]
    Unconserved {
        vertex: Vertex,
        inflow: Capacity,
        outflow: Capacity,
    },

    #[error("{outflow} units leave the source but {inflow} reach the sink")]
    Leakage { outflow: Capacity, inflow: Capacity },

    #[error("max flow of {flow} differs from the min cut capacity of {cut}")]
    CutMismatch { flow: Capacity, cut: Capacity },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxFlow {
    /// Total flow from the source to the sink.
    pub value: Capacity,

    /// Combined capacity of the edges leaving the source.
    pub source_capacity: Capacity,

    pub augmentations: usize,

    source_side: Vec<bool>,
}
impl MaxFlow {
    /// Whether every edge leaving the source is at capacity.
    pub fn saturated(&self) -> bool {
        self.value == self.source_capacity
    }

    /// Whether `vertex` is reachable from the source over edges with spare residual capacity.
    /// These vertices form the source side of a minimum cut.
    pub fn reachable_from_source(&self, vertex: usize) -> bool {
        self.source_side[vertex]
    }

    pub fn source_side(&self) -> &[bool] {
        &self.source_side
    }
}

/// Pushes the maximum flow through `network`, leaving the per-edge flows in place.
pub fn solve(network: &mut FlowNetwork) -> Result<MaxFlow, FlowConsistencyError> {
    let (source, sink) = (network.source(), network.sink());
    let mut value = 0;
    let mut augmentations = 0;
    while let Some(path) = augmenting_path(network) {
        let bottleneck = path
            .iter()
            .map(|&(edge, towards)| network.edge(edge).residual_capacity_to(towards))
            .min()
            .unwrap_or_default();
        debug_assert!(bottleneck > 0);
        for &(edge, towards) in &path {
            network.edge_mut(edge).add_residual_flow_to(towards, bottleneck);
        }
        value += bottleneck;
        augmentations += 1;
        trace!("augmented {bottleneck} over {} edges, total flow {value}", path.len());
    }

    let source_side = residual_reachable(network);
    debug_assert!(source_side[source]);
    debug_assert!(!source_side[sink]);
    verify(network, value, &source_side)?;

    Ok(MaxFlow {
        value,
        source_capacity: network.source_capacity(),
        augmentations,
        source_side,
    })
}

/// Breadth-first search for a shortest source-to-sink path with positive residual capacity.
/// The path is returned as `(edge, towards)` pairs in source-to-sink order, where `towards` is
/// the vertex the flow moves into.
fn augmenting_path(network: &FlowNetwork) -> Option<Vec<(usize, usize)>> {
    let (source, sink) = (network.source(), network.sink());
    let mut edge_to: Vec<Option<usize>> = vec![None; network.num_vertices()];
    let mut marked = vec![false; network.num_vertices()];
    let mut queue = VecDeque::new();
    marked[source] = true;
    queue.push_back(source);

    'search: while let Some(vertex) = queue.pop_front() {
        for &id in network.incident(vertex) {
            let edge = network.edge(id);
            let next = edge.other(vertex);
            if !marked[next] && edge.residual_capacity_to(next) > 0 {
                edge_to[next] = Some(id);
                marked[next] = true;
                if next == sink {
                    break 'search;
                }
                queue.push_back(next);
            }
        }
    }

    if !marked[sink] {
        return None;
    }
    let mut path = vec![];
    let mut vertex = sink;
    while vertex != source {
        let id = edge_to[vertex]?;
        path.push((id, vertex));
        vertex = network.edge(id).other(vertex);
    }
    path.reverse();
    Some(path)
}

/// Marks every vertex reachable from the source using only edges with spare residual capacity.
pub fn residual_reachable(network: &FlowNetwork) -> Vec<bool> {
    let source = network.source();
    let mut marked = vec![false; network.num_vertices()];
    let mut queue = VecDeque::new();
    marked[source] = true;
    queue.push_back(source);
    while let Some(vertex) = queue.pop_front() {
        for &id in network.incident(vertex) {
            let edge = network.edge(id);
            let next = edge.other(vertex);
            if !marked[next] && edge.residual_capacity_to(next) > 0 {
                marked[next] = true;
                queue.push_back(next);
            }
        }
    }
    marked
}

fn verify(network: &FlowNetwork, value: Capacity, source_side: &[bool]) -> Result<(), FlowConsistencyError> {
    let (source, sink) = (network.source(), network.sink());
    let mut inflows = vec![0; network.num_vertices()];
    let mut outflows = vec![0; network.num_vertices()];
    let mut cut = 0;
    for edge in network.edges() {
        if edge.flow > edge.capacity {
            return Err(FlowConsistencyError::CapacityExceeded {
                from: network.vertex(edge.from),
                to: network.vertex(edge.to),
                flow: edge.flow,
                capacity: edge.capacity,
            });
        }
        outflows[edge.from] += edge.flow;
        inflows[edge.to] += edge.flow;
        if source_side[edge.from] && !source_side[edge.to] {
            cut += edge.capacity;
        }
    }

    for vertex in (0..network.num_vertices()).filter(|&vertex| vertex != source && vertex != sink) {
        if inflows[vertex] != outflows[vertex] {
            return Err(FlowConsistencyError::Unconserved {
                vertex: network.vertex(vertex),
                inflow: inflows[vertex],
                outflow: outflows[vertex],
            });
        }
    }

    if outflows[source] != inflows[source] + value || inflows[sink] != outflows[sink] + value {
        return Err(FlowConsistencyError::Leakage {
            outflow: outflows[source],
            inflow: inflows[sink],
        });
    }
    if cut != value {
        return Err(FlowConsistencyError::CutMismatch { flow: value, cut });
    }
    Ok(())
}
