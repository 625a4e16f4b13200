use std::time::Duration;

use clap::{Parser, ValueEnum};
use eyre::WrapErr;
use swap::{
    oneinch::{OneInch, OneInchConfig, DEFAULT_BASE_URL},
    Address, Checked, SwapProvider, SwapRequest, Url, U256,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const SHORT_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Prints the calldata of a 1inch swap transaction to stdout
#[derive(Parser, Debug)]
#[command(author, version = SHORT_VERSION, long_version = SHORT_VERSION, about, long_about = None)]
struct Cli {
    /// Chain id of the network to swap on
    #[arg(value_name = "CHAIN_ID")]
    chain_id: u32,

    /// Token to sell
    #[arg(value_name = "FROM_TOKEN", value_parser = parse_address)]
    from_token: Checked<Address>,

    /// Token to buy
    #[arg(value_name = "TO_TOKEN", value_parser = parse_address)]
    to_token: Checked<Address>,

    /// Amount of FROM_TOKEN to sell, in its smallest unit
    #[arg(value_name = "AMOUNT", value_parser = parse_amount)]
    amount: Checked<U256>,

    /// Address executing the swap
    #[arg(value_name = "FROM_ADDRESS", value_parser = parse_address)]
    from_address: Checked<Address>,

    /// Address receiving TO_TOKEN
    #[arg(value_name = "DEST_RECEIVER", value_parser = parse_address)]
    dest_receiver: Checked<Address>,

    /// 1inch developer portal api key
    #[clap(long, value_name = "API_KEY", env = "ONEINCH_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Swap api base url, the chain id is appended to it
    #[clap(long, value_name = "URL", env = "ONEINCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: Url,

    /// The request timeout in seconds
    #[clap(short, long, value_name = "TIMEOUT", default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Log level
    #[clap(short, long, value_name = "LOG_LEVEL", default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

fn parse_address(value: &str) -> Result<Checked<Address>, String> {
    Checked::parse(value).map_err(|err| format!("invalid address {err}"))
}

/// Decimal, or `0x` prefixed hex. The text is forwarded unchanged.
fn parse_amount(value: &str) -> Result<Checked<U256>, String> {
    Checked::parse(value).map_err(|err| format!("invalid amount {err}"))
}

impl Cli {
    fn swap_request(&self) -> SwapRequest {
        SwapRequest {
            chain_id: self.chain_id,
            src_token: self.from_token.clone(),
            dest_token: self.to_token.clone(),
            src_amount: self.amount.clone(),
            src_caller: self.from_address.clone(),
            dest_recipient: self.dest_receiver.clone(),
        }
    }

    fn oneinch_config(&self) -> OneInchConfig {
        OneInchConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    fn execute(&self) -> eyre::Result<()> {
        let request = self.swap_request();
        let oneinch = OneInch::new(self.oneinch_config())?;

        // one request, no need for more than the current thread
        let calldata = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("failed to create tokio runtime")?
            .block_on(oneinch.get_swap_calldata(&request))?;

        println!("{calldata}");
        Ok(())
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}={log_level},swap={log_level}", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        // stdout is reserved for the calldata
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    if let Err(err) = cli.execute() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
