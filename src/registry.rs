use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::graph::PairGraph;
use crate::ids::AssetPair;
use crate::ledger::FeeSource;
use crate::pair::Pair;
use alloy_primitives::Address;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Creates one pair per asset pair and decides who collects the protocol fee.
#[derive(Debug)]
pub struct Registry {
    fee_to: Option<Address>,
    fee_to_setter: Address,
    by_assets: HashMap<AssetPair, Arc<Pair>>,
    by_address: HashMap<Address, Arc<Pair>>,
    all_pairs: Vec<Address>,
    graph: PairGraph,
}

impl Registry {
    pub fn new(fee_to_setter: Address) -> Self {
        Self {
            fee_to: None,
            fee_to_setter,
            by_assets: HashMap::new(),
            by_address: HashMap::new(),
            all_pairs: Vec::new(),
            graph: PairGraph::new(),
        }
    }

    pub fn from_config(cfg: &RegistryConfig) -> Self {
        let mut registry = Self::new(cfg.fee_to_setter);
        registry.fee_to = cfg.fee_to;
        registry
    }

    pub fn create_pair(&mut self, x: Address, y: Address) -> Result<Arc<Pair>, RegistryError> {
        let assets = AssetPair::new(x, y)?;
        if let Some(existing) = self.by_assets.get(&assets) {
            return Err(RegistryError::PairExists(existing.address()));
        }
        let address = assets.address();
        let pair = Arc::new(Pair::new(address, assets.a, assets.b));

        self.by_assets.insert(assets, Arc::clone(&pair));
        self.by_address.insert(address, Arc::clone(&pair));
        self.all_pairs.push(address);
        self.graph.connect_pair(address, assets.a, assets.b);
        info!(
            pair = %address,
            asset_a = %assets.a,
            asset_b = %assets.b,
            index = self.all_pairs.len() - 1,
            "pair created"
        );
        Ok(pair)
    }

    /// Looks a pair up by its assets, in either order.
    pub fn pair(&self, x: Address, y: Address) -> Option<Arc<Pair>> {
        let assets = AssetPair::new(x, y).ok()?;
        self.by_assets.get(&assets).cloned()
    }

    pub fn by_address(&self, address: Address) -> Option<Arc<Pair>> {
        self.by_address.get(&address).cloned()
    }

    pub fn pair_at(&self, index: usize) -> Option<Arc<Pair>> {
        self.all_pairs
            .get(index)
            .and_then(|address| self.by_address(*address))
    }

    pub fn all_pairs_len(&self) -> usize {
        self.all_pairs.len()
    }

    pub fn pairs_for_asset(&self, asset: Address) -> Vec<Arc<Pair>> {
        self.graph
            .pairs_accepting(asset)
            .into_iter()
            .filter_map(|address| self.by_address(address))
            .collect()
    }

    pub fn fee_to_setter(&self) -> Address {
        self.fee_to_setter
    }

    pub fn set_fee_to(
        &mut self,
        caller: Address,
        fee_to: Option<Address>,
    ) -> Result<(), RegistryError> {
        self.authorize(caller)?;
        self.fee_to = fee_to;
        info!(fee_to = ?fee_to, "protocol fee recipient changed");
        Ok(())
    }

    pub fn set_fee_to_setter(
        &mut self,
        caller: Address,
        setter: Address,
    ) -> Result<(), RegistryError> {
        self.authorize(caller)?;
        self.fee_to_setter = setter;
        info!(%setter, "fee setter changed");
        Ok(())
    }

    fn authorize(&self, caller: Address) -> Result<(), RegistryError> {
        if caller != self.fee_to_setter {
            warn!(%caller, "rejected fee administration");
            return Err(RegistryError::Forbidden(caller));
        }
        Ok(())
    }
}

impl FeeSource for Registry {
    fn fee_recipient(&self) -> Option<Address> {
        self.fee_to
    }
}
