use std::env;

use alloy::primitives::Address;
use color_eyre::Result;
use dotenv::dotenv;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use zksync_client::{ClientConfig, DefaultProvider, HttpTransport, Provider};

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

    let address: Address = env::var("ACCOUNT_ADDRESS")?.parse()?;
    let provider = DefaultProvider::new(HttpTransport::from_config(&config)?);

    let tokens = provider.get_tokens().await?;
    let state = provider.get_state(address).await?;

    match state.id {
        Some(id) => println!("account {address} (id {id})"),
        None => println!("account {address} (not registered)"),
    }
    println!("committed nonce: {}", state.committed.nonce);
    if state.committed.has_signing_key() {
        println!("signing key: {}", state.committed.pub_key_hash);
    } else {
        println!("signing key: not set");
    }
    for (symbol, amount) in &state.committed.balances {
        match tokens.token_by_symbol(symbol) {
            Some(token) => println!("  {} {symbol}", token.format_amount(amount)),
            None => println!("  {amount} {symbol} (unknown token)"),
        }
    }
    for (symbol, depositing) in &state.depositing.balances {
        println!(
            "  depositing {} {symbol}, expected in block {}",
            depositing.amount, depositing.expected_accept_block
        );
    }

    Ok(())
}
