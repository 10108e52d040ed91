use alloy_primitives::Address;
use petgraph::Direction;
use petgraph::prelude::*;
use petgraph::stable_graph::StableDiGraph;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub enum NodeKind {
    Asset(Address),
    Pair(Address),
}

/// Assets and pairs as nodes; an edge asset -> pair means the pair trades the asset.
#[derive(Debug, Default)]
pub struct PairGraph {
    g: StableDiGraph<NodeKind, ()>,
    asset_idx: HashMap<Address, NodeIndex>,
    pair_idx: HashMap<Address, NodeIndex>,
}

impl PairGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, kind: NodeKind) -> NodeIndex {
        let (idx, id) = match kind {
            NodeKind::Asset(id) => (&mut self.asset_idx, id),
            NodeKind::Pair(id) => (&mut self.pair_idx, id),
        };
        *idx.entry(id).or_insert_with(|| self.g.add_node(kind))
    }

    pub fn connect_pair(&mut self, pair: Address, a: Address, b: Address) {
        let pix = self.node(NodeKind::Pair(pair));
        for asset in [a, b] {
            let aix = self.node(NodeKind::Asset(asset));
            self.g.update_edge(aix, pix, ());
        }
    }

    /// Pairs that trade `asset`, in no particular order.
    pub fn pairs_accepting(&self, asset: Address) -> Vec<Address> {
        let Some(&aix) = self.asset_idx.get(&asset) else {
            return Vec::new();
        };
        self.g
            .neighbors_directed(aix, Direction::Outgoing)
            .filter_map(|n| match self.g[n] {
                NodeKind::Pair(id) => Some(id),
                NodeKind::Asset(_) => None,
            })
            .collect()
    }
}
