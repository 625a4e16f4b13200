use std::process::Output;

use axum::{
    extract::{Path, RawQuery},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

const CALLDATA: &str = "0x12aa3caf000000000000000000000000e37e799d5077682fa0a244d46e5649f71457bd09";

const ARGS: [&str; 6] = [
    "1",
    "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", // USDC
    "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", // WETH
    "1000000000000000000",
    "0x000007357111E4789005d4eBfF401a18D99770cE",
    "0xD79842424f797feF2B713BAd555eDdD0b6c89a80",
];

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}/swap/v5.2/")
}

async fn swapdata(base_url: &str, args: &[&str]) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_swapdata"))
        .args(args)
        .args(["--api-key", "test-key", "--base-url", base_url])
        .env_remove("RUST_LOG")
        .env_remove("ONEINCH_API_KEY")
        .env_remove("ONEINCH_BASE_URL")
        .output()
        .await
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Mock swap api answering with `CALLDATA` only when the query is exactly `expected`.
fn expecting(expected: String) -> Router {
    Router::new().route(
        "/swap/v5.2/:chain_id/swap",
        get(move |Path(chain_id): Path<u32>, RawQuery(query): RawQuery| {
            let expected = expected.clone();
            async move {
                let query = query.unwrap_or_default();
                if chain_id != 1 || query != expected {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "statusCode": 400, "description": query })),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({ "toAmount": "389203742019823", "tx": { "data": CALLDATA, "value": "0" } })),
                )
            }
        }),
    )
}

fn expected_query(args: &[&str]) -> String {
    format!(
        "fromTokenAddress={}&toTokenAddress={}&amount={}&fromAddress={}&slippage=2&destReceiver={}\
         &disableEstimate=true&protocols=SUSHI%2CUNISWAP_V2%2CUNISWAP_V3%2CCURVE%2CCOMPOUND",
        args[1], args[2], args[3], args[4], args[5],
    )
}

#[tokio::test]
async fn prints_only_the_calldata() {
    let base_url = serve(expecting(expected_query(&ARGS))).await;

    let output = swapdata(&base_url, &ARGS).await;

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), format!("{CALLDATA}\n"));
}

#[tokio::test]
async fn arguments_are_forwarded_verbatim() {
    let mut args = ARGS;
    args[1] = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    args[3] = "0x0de0b6b3a7640000";
    args[5] = "0xd79842424f797fef2b713bad555eddd0b6c89a80";
    let base_url = serve(expecting(expected_query(&args))).await;

    let output = swapdata(&base_url, &args).await;

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), format!("{CALLDATA}\n"));
}

#[tokio::test]
async fn missing_calldata_fails() {
    let router = Router::new().route(
        "/swap/v5.2/:chain_id/swap",
        get(|| async { Json(json!({ "tx": { "value": "0" } })) }),
    );
    let base_url = serve(router).await;

    let output = swapdata(&base_url, &ARGS).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Error"));
}

#[tokio::test]
async fn api_error_is_reported() {
    let router = Router::new().route(
        "/swap/v5.2/:chain_id/swap",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "statusCode": 400, "description": "insufficient liquidity" })),
            )
        }),
    );
    let base_url = serve(router).await;

    let output = swapdata(&base_url, &ARGS).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("insufficient liquidity"));
}

#[tokio::test]
async fn network_error_exits_non_zero() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let output = swapdata(&format!("http://127.0.0.1:{port}/swap/v5.2/"), &ARGS).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Error"));
}

#[tokio::test]
async fn missing_arguments_are_a_usage_error() {
    let output = swapdata("http://127.0.0.1:9/swap/v5.2/", &ARGS[..5]).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("DEST_RECEIVER"));
}
