//! Export catalyzed reaction graphs as bipartite `petgraph` graphs.
//!
//! Polymers and reactions become nodes. Edges run from reactants into a
//! reaction, from a reaction out to its products, and from catalysts into the
//! reactions they catalyze. Restricting the export to a RAF keeps only its
//! reactions and the polymers they touch.

use std::{collections::HashMap, fmt::Display};

use bit_set::BitSet;
use petgraph::{
    dot::{Config, Dot},
    graph::{DiGraph, NodeIndex},
};

use crate::{
    graph::CatalyzedReactionGraph,
    polymer::PolymerId,
    reaction::ReactionId,
};

pub type Index = u32;
pub type Network = DiGraph<NetworkNode, NetworkEdge, Index>;

/// The nodes of a [`Network`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkNode {
    Polymer { id: PolymerId, name: String, food: bool },
    Reaction { id: ReactionId, label: String },
}

/// The edges of a [`Network`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NetworkEdge {
    Reactant,
    Product,
    Catalyst,
}

impl Display for NetworkNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkNode::Polymer { name, food: true, .. } => write!(f, "{name} (food)"),
            NetworkNode::Polymer { name, .. } => write!(f, "{name}"),
            NetworkNode::Reaction { label, .. } => write!(f, "{label}"),
        }
    }
}

impl Display for NetworkEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkEdge::Reactant => write!(f, "reactant"),
            NetworkEdge::Product => write!(f, "product"),
            NetworkEdge::Catalyst => write!(f, "catalyst"),
        }
    }
}

impl CatalyzedReactionGraph<'_> {
    /// Build the bipartite network of the reactions in `subset`, or of every
    /// reaction if `subset` is `None`. Only polymers touching an exported
    /// reaction (plus the food set) become nodes.
    pub fn network(&self, subset: Option<&BitSet>) -> Network {
        let polymers = self.polymers();
        let reactions = self.reactions();

        let mut network = Network::default();
        let mut polymer_nodes: HashMap<PolymerId, NodeIndex<Index>> = HashMap::new();
        let mut polymer_node = |network: &mut Network, id: PolymerId| {
            *polymer_nodes.entry(id).or_insert_with(|| {
                network.add_node(NetworkNode::Polymer {
                    id,
                    name: polymers[id].to_string(),
                    food: self.food().contains(id),
                })
            })
        };

        for id in self.food().iter() {
            polymer_node(&mut network, id);
        }

        for (id, reaction) in reactions.iter() {
            if subset.is_some_and(|s| !s.contains(id)) {
                continue;
            }
            let r = network.add_node(NetworkNode::Reaction {
                id,
                label: reaction.describe(polymers),
            });

            // A + A -> AA gets one reactant edge per copy.
            for &p in reaction.reactants() {
                let n = polymer_node(&mut network, p);
                network.add_edge(n, r, NetworkEdge::Reactant);
            }
            for &p in reaction.products() {
                let n = polymer_node(&mut network, p);
                network.add_edge(r, n, NetworkEdge::Product);
            }
            for c in self.catalysis().catalysts_of(id).iter() {
                let n = polymer_node(&mut network, c);
                network.add_edge(n, r, NetworkEdge::Catalyst);
            }
        }

        network
    }

    /// Return Graphviz DOT text for [`CatalyzedReactionGraph::network`].
    pub fn info(&self, subset: Option<&BitSet>) -> String {
        let network = self.network(subset);
        let dot = Dot::with_config(&network, &[Config::EdgeNoLabel]);
        format!("{dot}")
    }
}
