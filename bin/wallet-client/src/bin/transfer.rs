use std::env;
use std::str::FromStr;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use color_eyre::Result;
use dotenv::dotenv;
use num_bigint::BigUint;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use zksync_client::{ClientConfig, DefaultProvider, HttpTransport, Provider, Wallet};
use zksync_primitives::TimeRange;
use zksync_signer::{DefaultEthSigner, ZkSigner};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Load environment variables from the `.env` file
    dotenv().ok();
    let config = ClientConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(config.log_level()?).into())
                .from_env_lossy(),
        )
        .init();

    let priv_key = env::var("PRIVATE_KEY")?;
    let recipient: Address = env::var("RECIPIENT")?.parse()?;
    let amount = BigUint::from_str(&env::var("AMOUNT")?)?;
    let token = env::var("TOKEN").unwrap_or_else(|_| "ETH".to_string());

    // the layer-2 key is derived from a signature of the on-chain key
    let eth_signer = DefaultEthSigner::new(PrivateKeySigner::from_str(&priv_key)?);
    let zk_signer = ZkSigner::from_eth_signer(&eth_signer).await?;
    let provider = DefaultProvider::new(HttpTransport::from_config(&config)?);
    let wallet = Wallet::new(provider, eth_signer, zk_signer).await?;

    // the key change is not committed yet when the transfer is built
    let mut nonce = wallet.get_nonce().await?;
    if !wallet.is_signing_key_set().await? {
        let hash = wallet
            .set_signing_key(&token, None, Some(nonce), TimeRange::default())
            .await?;
        tracing::info!(%hash, "submitted signing key change");
        nonce += 1;
    }

    let hash = wallet
        .sync_transfer(recipient, amount, &token, None, Some(nonce), TimeRange::default())
        .await?;
    tracing::info!(%hash, "submitted transfer");

    let details = wallet.provider().get_transaction_details(&hash).await?;
    println!("{hash}: executed={} success={:?}", details.executed, details.success);

    Ok(())
}
