use core::fmt;
use core::future::Future;
use core::str::FromStr;

pub use alloy::primitives::{Address, U256};
pub use reqwest::Url;

pub mod oneinch;
pub mod protocols;

/// Maximum tolerated price deviation for a swap, in percent.
pub const SLIPPAGE_PERCENT: u8 = 2;

/// A value that parsed as `T`, kept alongside the exact text it was parsed from.
///
/// The api receives the text, so a lowercase address or a hex amount is sent as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked<T> {
    value: T,
    raw: String,
}

impl<T> Checked<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    pub fn parse(raw: &str) -> Result<Self, String> {
        let value = raw.parse().map_err(|err| format!("{raw:?}: {err}"))?;
        Ok(Self {
            value,
            raw: raw.to_owned(),
        })
    }
}

impl<T> Checked<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl<T> fmt::Display for Checked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub chain_id: u32,
    pub src_token: Checked<Address>,
    pub dest_token: Checked<Address>,
    /// Decimal, or `0x` prefixed hex.
    pub src_amount: Checked<U256>,
    pub src_caller: Checked<Address>,
    pub dest_recipient: Checked<Address>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct TxData {
    /// Hex encoded calldata, passed through untouched.
    pub data: String,
}

/// The part of a swap response this crate relies on, everything else in the body is ignored.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SwapResponse {
    pub tx: TxData,
}

pub trait SwapProvider {
    /// Returns the calldata of a transaction executing `request`.
    fn get_swap_calldata(
        &self,
        request: &SwapRequest,
    ) -> impl Future<Output = eyre::Result<String>> + Send;
}
