//! The flow network used to decide whether a candidate team can still finish first.
//!
//! Each unit of flow is one remaining game between two teams other than the candidate. It
//! leaves the source through the game's vertex, passes to the vertex of whichever team wins it,
//! and drains into the sink through an edge capped at the number of wins that team can take
//! without overtaking the candidate's best possible total. If every game can be routed, the
//! candidate is still alive.
//!
//! Vertices are numbered densely, per network, in the order they are added. A [Vertex] key
//! resolves to its id through a lookup map, so no id arithmetic is involved.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;

use crate::standings::Standings;

pub type Capacity = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    Source,
    Sink,
    /// Games left between two teams, identified by their standings indexes (lower first).
    Game(usize, usize),
    Team(usize),
}

impl Display for Vertex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Vertex::Source => write!(f, "s"),
            Vertex::Sink => write!(f, "t"),
            Vertex::Game(first, second) => write!(f, "g{first}-{second}"),
            Vertex::Team(team) => write!(f, "t{team}"),
        }
    }
}

/// A directed edge carrying `0 <= flow <= capacity`. Its residual counterpart (the capacity to
/// undo flow) is implied rather than stored as a separate edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub capacity: Capacity,
    pub flow: Capacity,
}
impl Edge {
    /// The endpoint opposite `vertex`.
    #[inline]
    pub fn other(&self, vertex: usize) -> usize {
        if vertex == self.from {
            self.to
        } else {
            debug_assert_eq!(vertex, self.to, "vertex {vertex} is not incident to {self:?}");
            self.from
        }
    }

    /// Capacity left for pushing flow towards `vertex`: forward slack if `vertex` is the head,
    /// otherwise the flow that can be cancelled.
    #[inline]
    pub fn residual_capacity_to(&self, vertex: usize) -> Capacity {
        if vertex == self.to {
            self.capacity - self.flow
        } else {
            debug_assert_eq!(vertex, self.from, "vertex {vertex} is not incident to {self:?}");
            self.flow
        }
    }

    #[inline]
    pub fn add_residual_flow_to(&mut self, vertex: usize, delta: Capacity) {
        if vertex == self.to {
            debug_assert!(delta <= self.capacity - self.flow);
            self.flow += delta;
        } else {
            debug_assert!(delta <= self.flow);
            self.flow -= delta;
        }
    }

    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }
}

#[derive(Debug, Clone)]
pub struct FlowNetwork {
    vertices: Vec<Vertex>,
    vertex_to_id: FxHashMap<Vertex, usize>,
    edges: Vec<Edge>,
    incident: Vec<Vec<usize>>,
    unbounded: Capacity,
}
impl FlowNetwork {
    /// An empty network containing only the source and the sink. Edges added with
    /// [FlowNetwork::unbounded] capacity carry the given sentinel.
    pub fn with_unbounded(unbounded: Capacity) -> Self {
        let mut network = Self {
            vertices: vec![],
            vertex_to_id: FxHashMap::default(),
            edges: vec![],
            incident: vec![],
            unbounded,
        };
        network.add_vertex(Vertex::Source);
        network.add_vertex(Vertex::Sink);
        network
    }

    /// Builds the network for `candidate`. The capacity standing in for "unbounded" on the
    /// game-to-team edges exceeds the total capacity out of the source, so it can never be the
    /// bottleneck of an augmenting path.
    pub fn build(standings: &Standings, candidate: usize) -> Self {
        let ceiling = standings.team(candidate).max_possible_wins();

        let games: Vec<_> = standings
            .opponents(candidate)
            .flat_map(|first| {
                standings
                    .opponents(candidate)
                    .filter(move |&second| second > first)
                    .map(move |second| (first, second))
            })
            .map(|(first, second)| (first, second, standings.games_between(first, second)))
            .filter(|&(_, _, games)| games > 0)
            .collect();
        let source_capacity: Capacity = games.iter().map(|&(_, _, games)| games as Capacity).sum();

        let mut network = Self::with_unbounded(source_capacity + 1);
        let (source, sink) = (network.source(), network.sink());

        for team in standings.opponents(candidate) {
            let team_vertex = network.add_vertex(Vertex::Team(team));
            let headroom = ceiling.saturating_sub(standings.team(team).wins as u64);
            network.add_edge(team_vertex, sink, headroom);
        }

        for (first, second, games) in games {
            let game_vertex = network.add_vertex(Vertex::Game(first, second));
            network.add_edge(source, game_vertex, games as Capacity);
            let unbounded = network.unbounded();
            for team in [first, second] {
                let team_vertex = network.add_vertex(Vertex::Team(team));
                network.add_edge(game_vertex, team_vertex, unbounded);
            }
        }

        network
    }

    /// Adds a vertex for `key`, returning its id. Adding an existing key returns the id it was
    /// originally assigned.
    pub fn add_vertex(&mut self, key: Vertex) -> usize {
        if let Some(&id) = self.vertex_to_id.get(&key) {
            return id;
        }
        let id = self.vertices.len();
        self.vertices.push(key);
        self.vertex_to_id.insert(key, id);
        self.incident.push(vec![]);
        id
    }

    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Capacity) -> usize {
        assert!(from < self.vertices.len(), "no vertex with id {from}");
        assert!(to < self.vertices.len(), "no vertex with id {to}");
        let id = self.edges.len();
        self.edges.push(Edge {
            from,
            to,
            capacity,
            flow: 0,
        });
        self.incident[from].push(id);
        self.incident[to].push(id);
        id
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.vertex_to_id[&Vertex::Source]
    }

    #[inline]
    pub fn sink(&self) -> usize {
        self.vertex_to_id[&Vertex::Sink]
    }

    pub fn unbounded(&self) -> Capacity {
        self.unbounded
    }

    pub fn id_of(&self, key: &Vertex) -> Option<usize> {
        self.vertex_to_id.get(key).copied()
    }

    pub fn vertex(&self, id: usize) -> Vertex {
        self.vertices[id]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: usize) -> &Edge {
        &self.edges[id]
    }

    pub(crate) fn edge_mut(&mut self, id: usize) -> &mut Edge {
        &mut self.edges[id]
    }

    /// Ids of the edges entering or leaving `vertex`.
    pub fn incident(&self, vertex: usize) -> &[usize] {
        &self.incident[vertex]
    }

    /// Edges leaving the source.
    pub fn source_edges(&self) -> impl Iterator<Item = &Edge> {
        let source = self.source();
        self.incident(source)
            .iter()
            .map(|&id| &self.edges[id])
            .filter(move |edge| edge.from == source)
    }

    pub fn source_capacity(&self) -> Capacity {
        self.source_edges().map(|edge| edge.capacity).sum()
    }

    /// The edge from the vertex keyed `from` to the vertex keyed `to`, if one exists.
    pub fn find_edge(&self, from: &Vertex, to: &Vertex) -> Option<&Edge> {
        let (from, to) = (self.id_of(from)?, self.id_of(to)?);
        self.incident(from)
            .iter()
            .map(|&id| &self.edges[id])
            .find(|edge| edge.from == from && edge.to == to)
    }
}
