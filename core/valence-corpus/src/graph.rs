use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use valence_protocol::NodeId;

/// The `mother` dependency edges between clauses: an edge runs from a daughter
/// clause to the clause it depends on.
#[derive(Debug, Default)]
pub struct MotherGraph {
    graph: Graph<NodeId, (), Directed>,
    index_map: HashMap<NodeId, NodeIndex>,
}

impl MotherGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_clause(&mut self, clause: NodeId) {
        if !self.index_map.contains_key(&clause) {
            let idx = self.graph.add_node(clause);
            self.index_map.insert(clause, idx);
        }
    }

    pub fn add_mother(&mut self, daughter: NodeId, mother: NodeId) {
        let from = *self
            .index_map
            .entry(daughter)
            .or_insert_with(|| self.graph.add_node(daughter));
        let to = *self
            .index_map
            .entry(mother)
            .or_insert_with(|| self.graph.add_node(mother));

        self.graph.add_edge(from, to, ());
    }

    /// The direct mother of a clause. Only one level, never the transitive chain.
    pub fn mother(&self, clause: NodeId) -> Option<NodeId> {
        let idx = self.index_map.get(&clause)?;
        self.graph
            .edges_directed(*idx, Direction::Outgoing)
            .next()
            .map(|edge| self.graph[edge.target()])
    }

    /// Clauses whose mother is `clause`, sorted by id.
    pub fn daughters(&self, clause: NodeId) -> Vec<NodeId> {
        let mut daughters: Vec<NodeId> = match self.index_map.get(&clause) {
            Some(idx) => self
                .graph
                .edges_directed(*idx, Direction::Incoming)
                .map(|edge| self.graph[edge.source()])
                .collect(),
            None => Vec::new(),
        };
        daughters.sort();
        daughters
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
