#![allow(dead_code)]

use alloy_primitives::{Address, U256};
use wayfinder_pair::{AssetLedger, FeeSource, Pair, Registry, World};

pub const SETTER: u8 = 0xee;
pub const FEE_TO: u8 = 0xfe;
pub const LP: u8 = 0x01;
pub const TRADER: u8 = 0x02;

pub fn who(byte: u8) -> Address {
    Address::with_last_byte(byte)
}

pub fn u(v: u64) -> U256 {
    U256::from(v)
}

/// Registry with one pair over assets 0x0a/0x0b.
pub fn registry_with_pair() -> (Registry, std::sync::Arc<Pair>) {
    let mut registry = Registry::new(who(SETTER));
    let pair = registry.create_pair(who(0x0a), who(0x0b)).unwrap();
    (registry, pair)
}

/// Moves freshly credited funds from `from` into the pair.
pub fn pay_in(world: &mut World, pair: &Pair, from: Address, asset: Address, amount: U256) {
    world.credit(asset, from, amount);
    assert!(world.transfer(asset, from, pair.address(), amount).succeeded());
}

pub fn add_liquidity<F: FeeSource>(
    world: &mut World,
    pair: &Pair,
    fees: &F,
    lp: Address,
    amount_a: U256,
    amount_b: U256,
) -> U256 {
    let (a, b) = pair.assets();
    pay_in(world, pair, lp, a, amount_a);
    pay_in(world, pair, lp, b, amount_b);
    pair.mint(world, fees, lp, lp).unwrap()
}

pub fn k(pair: &Pair) -> U256 {
    let r = pair.reserves();
    r.reserve_a * r.reserve_b
}
