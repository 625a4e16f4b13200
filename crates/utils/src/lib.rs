use std::collections::HashMap;
use std::sync::OnceLock;

static CHAINS: OnceLock<HashMap<u32, &'static ChainData>> = OnceLock::new();

pub fn get_supported_chains() -> &'static HashMap<u32, &'static ChainData> {
    CHAINS.get_or_init(|| {
        let mut map = HashMap::new();
        for chain in [
            Chain::Ethereum,
            Chain::Optimism,
            Chain::Bsc,
            Chain::Polygon,
            Chain::Base,
            Chain::Arbitrum,
            // Add new chains here
        ] {
            let data: &ChainData = chain.into();
            map.insert(data.id, data);
        }
        map
    })
}

/// Human readable name for `chain_id`, `"unknown"` when the chain is not in the table.
pub fn chain_name(chain_id: u32) -> &'static str {
    get_supported_chains()
        .get(&chain_id)
        .map(|chain| chain.name)
        .unwrap_or("unknown")
}

#[derive(Debug, Clone, Copy)]
pub struct ChainData {
    pub id: u32,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    Ethereum = 1,
    Optimism = 10,
    Bsc = 56,
    Polygon = 137,
    Base = 8453,
    Arbitrum = 42161,
}

impl TryFrom<u32> for Chain {
    type Error = &'static str;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Chain::Ethereum),
            10 => Ok(Chain::Optimism),
            56 => Ok(Chain::Bsc),
            137 => Ok(Chain::Polygon),
            8453 => Ok(Chain::Base),
            42161 => Ok(Chain::Arbitrum),
            _ => Err("Unsupported chain"),
        }
    }
}

impl From<Chain> for &'static ChainData {
    fn from(chain: Chain) -> Self {
        match chain {
            Chain::Ethereum => &ChainData {
                id: Chain::Ethereum as u32,
                name: "Ethereum",
            },
            Chain::Optimism => &ChainData {
                id: Chain::Optimism as u32,
                name: "Optimism",
            },
            Chain::Bsc => &ChainData {
                id: Chain::Bsc as u32,
                name: "BNB Smart Chain",
            },
            Chain::Polygon => &ChainData {
                id: Chain::Polygon as u32,
                name: "Polygon",
            },
            Chain::Base => &ChainData {
                id: Chain::Base as u32,
                name: "Base",
            },
            Chain::Arbitrum => &ChainData {
                id: Chain::Arbitrum as u32,
                name: "Arbitrum",
            },
        }
    }
}
