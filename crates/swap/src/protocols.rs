use utils::Chain;

pub const ARBITRUM_PROTOCOLS: &[&str] = &["ARBITRUM_UNISWAP_V3"];

pub const DEFAULT_PROTOCOLS: &[&str] = &["SUSHI", "UNISWAP_V2", "UNISWAP_V3", "CURVE", "COMPOUND"];

/// Liquidity sources the aggregator may route through on `chain_id`.
///
/// Only Arbitrum has its own allowlist, every other chain (known or not) gets the default one.
pub fn protocols_for_chain(chain_id: u32) -> &'static [&'static str] {
    match Chain::try_from(chain_id) {
        Ok(Chain::Arbitrum) => ARBITRUM_PROTOCOLS,
        _ => DEFAULT_PROTOCOLS,
    }
}
