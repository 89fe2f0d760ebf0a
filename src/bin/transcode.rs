//! A thin CLI front-end over the transcoder, for local debugging against a
//! running rollup node. The gateway itself wires the library directly into
//! its own request handling; this binary exists for operators to transcode
//! a raw transaction by hand.

use clap::Parser;
use gw_eth_transcoder::{ChainConfig, Error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Transcode a raw Ethereum transaction into a Godwoken L2 transaction")]
struct Args {
    /// Hex-encoded raw RLP transaction, with or without a leading `0x`.
    #[arg(long)]
    raw_tx: String,

    /// Godwoken rollup JSON-RPC endpoint.
    #[arg(long)]
    rpc_url: String,

    #[arg(long, default_value_t = 2022)]
    web3_chain_id: u64,

    #[arg(long, default_value_t = 3)]
    polyjuice_creator_account_id: u32,

    /// Hex-encoded 32-byte ETH-account-lock code hash.
    #[arg(long)]
    eth_account_lock_code_hash: String,

    /// Hex-encoded 32-byte rollup script hash.
    #[arg(long)]
    rollup_script_hash: String,

    #[arg(long, default_value_t = 0)]
    auto_create_account_from_id: u32,

    #[arg(long, default_value_t = gw_eth_transcoder::config::DEFAULT_PENDING_TRANSACTION_INDEX.to_string())]
    pending_transaction_index: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let raw = hex::decode(args.raw_tx.trim_start_matches("0x"))?;
    let eth_account_lock_code_hash = decode_hash32(&args.eth_account_lock_code_hash)?;
    let rollup_script_hash = decode_hash32(&args.rollup_script_hash)?;

    let cfg = ChainConfig::new(
        args.web3_chain_id,
        args.polyjuice_creator_account_id,
        eth_account_lock_code_hash,
        rollup_script_hash,
        args.auto_create_account_from_id,
        args.pending_transaction_index,
        128 * 1024,
        21_000,
        12_500_000,
        0,
        u128::MAX,
    )
    .map_err(|e| anyhow::anyhow!(e))?;

    let client = gw_eth_transcoder::rpc::JsonRpcRollupClient::new(args.rpc_url);

    match gw_eth_transcoder::transcode(&raw, &client, &cfg).await {
        Ok(out) => {
            println!("{}", serde_json::to_string_pretty(&out.l2_tx)?);
            if let Some(entry) = out.auto_create {
                tracing::info!(key = %entry.cache_key(), "account will be auto-created");
            }
        }
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn decode_hash32(s: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = hex::decode(s.trim_start_matches("0x"))?;
    if bytes.len() != 32 {
        anyhow::bail!("expected 32 bytes, got {}", bytes.len());
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn report_error(err: &Error) {
    tracing::warn!(error = %err, "transcode failed");
}
