use std::time::Duration;

use eyre::WrapErr;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::{protocols::protocols_for_chain, SwapRequest, SwapResponse, Url, SLIPPAGE_PERCENT};

/// https://portal.1inch.dev/documentation/swap/swagger?method=get&path=%2Fv5.2%2F1%2Fswap
pub const DEFAULT_BASE_URL: &str = "https://api.1inch.dev/swap/v5.2/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const SWAP_METHOD: &str = "/swap";

#[derive(Clone)]
pub struct OneInchConfig {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

impl core::fmt::Debug for OneInchConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OneInchConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Query of `GET {base}/{chainId}/swap`. Field order is the order of the encoded query.
#[derive(Debug, serde::Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapQueryParams {
    pub from_token_address: String,
    pub to_token_address: String,
    pub amount: String,
    pub from_address: String,
    pub slippage: u8,
    pub dest_receiver: String,
    pub disable_estimate: bool,
    /// Encoded as a single comma separated value, `protocols=A%2CB`.
    #[serde(serialize_with = "comma_separated")]
    pub protocols: &'static [&'static str],
}

fn comma_separated<S>(values: &&[&str], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&values.join(","))
}

impl From<&SwapRequest> for SwapQueryParams {
    fn from(request: &SwapRequest) -> Self {
        Self {
            from_token_address: request.src_token.as_str().to_owned(),
            to_token_address: request.dest_token.as_str().to_owned(),
            amount: request.src_amount.as_str().to_owned(),
            from_address: request.src_caller.as_str().to_owned(),
            slippage: SLIPPAGE_PERCENT,
            dest_receiver: request.dest_recipient.as_str().to_owned(),
            disable_estimate: true,
            protocols: protocols_for_chain(request.chain_id),
        }
    }
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiError {
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OneInch {
    client: reqwest::Client,
    config: OneInchConfig,
}

impl OneInch {
    pub fn new(mut config: OneInchConfig) -> eyre::Result<Self> {
        // chain id and method are appended to the base path
        if !config.base_url.path().ends_with('/') {
            let path = format!("{}/", config.base_url.path());
            config.base_url.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .wrap_err("failed to build http client")?;
        Ok(Self { client, config })
    }

    /// `{base_url}{chain_id}{method}?{query}`
    pub fn request_url(
        &self,
        method: &str,
        chain_id: u32,
        params: &SwapQueryParams,
    ) -> eyre::Result<Url> {
        Ok(self.build_request(method, chain_id, params)?.url().clone())
    }

    fn build_request(
        &self,
        method: &str,
        chain_id: u32,
        params: &SwapQueryParams,
    ) -> eyre::Result<reqwest::Request> {
        let url = format!("{}{}{}", self.config.base_url, chain_id, method);
        self.client
            .get(url)
            .query(params)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.config.api_key)
            .header(ACCEPT, "application/json")
            .build()
            .wrap_err("failed to build swap request")
    }

    pub async fn get_swap(&self, request: &SwapRequest) -> eyre::Result<SwapResponse> {
        let params = SwapQueryParams::from(request);
        let http_request = self.build_request(SWAP_METHOD, request.chain_id, &params)?;
        tracing::debug!(
            chain = utils::chain_name(request.chain_id),
            chain_id = request.chain_id,
            src_token = %request.src_token.value(),
            dest_token = %request.dest_token.value(),
            url = %http_request.url(),
            "requesting swap"
        );

        let response = self
            .client
            .execute(http_request)
            .await
            .wrap_err("swap request failed")?;
        let status = response.status();
        let body = response
            .text()
            .await
            .wrap_err("failed to read swap response body")?;
        tracing::debug!(%status, "swap response received");

        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        parse_swap_response(&body)
    }
}

fn api_error(status: StatusCode, body: &str) -> eyre::Report {
    match serde_json::from_str::<ApiError>(body)
        .ok()
        .and_then(|error| error.description)
    {
        Some(description) => eyre::eyre!("swap api returned {status}: {description}"),
        None => eyre::eyre!("swap api returned {status}: {body}"),
    }
}

pub fn parse_swap_response(body: &str) -> eyre::Result<SwapResponse> {
    serde_json::from_str(body).wrap_err("unexpected swap response, expected an object with `tx.data`")
}

/// Calldata of a raw swap response body, returned exactly as the api sent it.
pub fn extract_calldata(body: &str) -> eyre::Result<String> {
    Ok(parse_swap_response(body)?.tx.data)
}

impl crate::SwapProvider for OneInch {
    async fn get_swap_calldata(&self, request: &SwapRequest) -> eyre::Result<String> {
        let response = self.get_swap(request).await?;
        tracing::info!(
            chain_id = request.chain_id,
            len = response.tx.data.len(),
            "received swap calldata"
        );
        Ok(response.tx.data)
    }
}
