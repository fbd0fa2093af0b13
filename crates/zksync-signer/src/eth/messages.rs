//! Human-readable messages shown to the owner of the on-chain account.
//!
//! The network reconstructs the same text from the submitted transaction, so
//! the wording and line order here are part of the protocol.

use num_bigint::BigUint;
use zksync_primitives::utils::PUB_KEY_HASH_PREFIX;
use zksync_primitives::{Order, SignableTransaction, Token, Tokens, ZkSyncTransaction};

use crate::error::{Result, SignerError};

/// Message the layer-2 key seed is derived from.
pub const ZK_SEED_MESSAGE: &str =
    "Access zkSync account.\n\nOnly sign this message for a trusted client!";

const ENABLE_2FA_MESSAGE: &str = "By signing this message, you are opting into Two-factor Authentication protection by the zkSync Server.\n\
Transactions now require signatures by both your L1 and L2 private key.";

const DISABLE_2FA_MESSAGE: &str = "By signing this message, you are opting out of Two-factor Authentication protection by the zkSync Server.\n\
Transactions now only require signatures by your L2 private key.";

/// Token id the transaction's amount and fee are denominated in.
pub fn fee_token_id(tx: &ZkSyncTransaction) -> u32 {
    match tx {
        ZkSyncTransaction::Transfer(tx) => tx.token,
        ZkSyncTransaction::Withdraw(tx) => tx.token,
        ZkSyncTransaction::ForcedExit(tx) => tx.token,
        ZkSyncTransaction::ChangePubKey(tx) => tx.fee_token,
        ZkSyncTransaction::Swap(tx) => tx.fee_token,
    }
}

/// Message lines for one transaction, without the nonce.
fn transaction_part(tx: &ZkSyncTransaction, token: &Token) -> Result<Vec<String>> {
    if fee_token_id(tx) != token.id {
        return Err(SignerError::InvalidInputError(format!(
            "{} is paid in token {}, got {}",
            tx.type_name(),
            fee_token_id(tx),
            token.symbol
        )));
    }

    let zero = BigUint::default();
    let mut lines = Vec::with_capacity(2);
    match tx {
        ZkSyncTransaction::Transfer(tx) if tx.amount != zero => lines.push(format!(
            "Transfer {} {} to: {:#x}",
            token.format_amount(&tx.amount),
            token.symbol,
            tx.to
        )),
        ZkSyncTransaction::Withdraw(tx) => lines.push(format!(
            "Withdraw {} {} to: {:#x}",
            token.format_amount(&tx.amount),
            token.symbol,
            tx.to
        )),
        ZkSyncTransaction::ForcedExit(tx) => {
            lines.push(format!("ForcedExit {} to: {:#x}", token.symbol, tx.target))
        }
        ZkSyncTransaction::ChangePubKey(tx) => {
            let pub_key_hash = tx
                .new_pk_hash
                .strip_prefix(PUB_KEY_HASH_PREFIX)
                .unwrap_or(&tx.new_pk_hash)
                .to_lowercase();
            lines.push(format!("Set signing key: {pub_key_hash}"))
        }
        // fee-only transfers and swaps only show the fee
        _ => {}
    }

    let fee = tx.fee_integer()?;
    if fee != zero {
        lines.push(format!("Fee: {} {}", token.format_amount(&fee), token.symbol));
    }
    Ok(lines)
}

pub fn transaction_message(tx: &ZkSyncTransaction, nonce: u32, token: &Token) -> Result<String> {
    let mut lines = transaction_part(tx, token)?;
    lines.push(format!("Nonce: {nonce}"));
    Ok(lines.join("\n"))
}

/// One message covering every transaction of a batch, closed by a single nonce line.
pub fn batch_message(txs: &[ZkSyncTransaction], nonce: u32, tokens: &Tokens) -> Result<String> {
    if txs.is_empty() {
        return Err(SignerError::InvalidInputError("empty batch".into()));
    }
    let mut lines = Vec::new();
    for tx in txs {
        let token = tokens.resolve_id(fee_token_id(tx))?;
        lines.extend(transaction_part(tx, token)?);
    }
    lines.push(format!("Nonce: {nonce}"));
    Ok(lines.join("\n"))
}

pub fn order_message(order: &Order, token_sell: &Token, token_buy: &Token) -> Result<String> {
    if order.token_sell != token_sell.id || order.token_buy != token_buy.id {
        return Err(SignerError::InvalidInputError(
            "order tokens do not match the supplied tokens".into(),
        ));
    }
    let header = if order.amount == BigUint::default() {
        format!("Limit order for {} -> {}", token_sell.symbol, token_buy.symbol)
    } else {
        format!(
            "Order for {} {} -> {}",
            token_sell.format_amount(&order.amount),
            token_sell.symbol,
            token_buy.symbol
        )
    };
    Ok([
        header,
        format!(
            "Ratio: {}:{}",
            token_sell.format_amount(&order.ratio[0]),
            token_buy.format_amount(&order.ratio[1])
        ),
        format!("Address: {:#x}", order.recipient),
        format!("Nonce: {}", order.nonce),
    ]
    .join("\n"))
}

pub fn toggle_2fa_message(enable: bool, timestamp: u64, pub_key_hash: Option<&str>) -> String {
    let mut message = if enable {
        ENABLE_2FA_MESSAGE.to_string()
    } else {
        DISABLE_2FA_MESSAGE.to_string()
    };
    message.push_str(&format!("\nTimestamp: {timestamp}"));
    if let Some(pub_key_hash) = pub_key_hash {
        message.push_str(&format!("\nPubKeyHash: {pub_key_hash}"));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use zksync_primitives::alloy::primitives::address;
    use zksync_primitives::{ChangePubKey, TimeRange, Transfer};

    fn eth() -> Token {
        Token::new(0, "0x0000000000000000000000000000000000000000", "ETH", 18)
    }

    fn transfer(amount: u64, fee: &str) -> ZkSyncTransaction {
        Transfer {
            account_id: 1,
            from: address!("ede35562d3555e61120a151b3c8e8e91d83a378a"),
            to: address!("19aa2ed8712072e918632259780e587698ef58df"),
            token: 0,
            amount: BigUint::from(amount),
            fee: fee.into(),
            nonce: 3,
            signature: None,
            time_range: TimeRange::default(),
        }
        .into()
    }

    #[test]
    fn transfer_message() {
        let message =
            transaction_message(&transfer(1_000_000_000_000_000_000, "10000000000000000"), 3, &eth())
                .unwrap();
        assert_eq!(
            message,
            "Transfer 1.0 ETH to: 0x19aa2ed8712072e918632259780e587698ef58df\nFee: 0.01 ETH\nNonce: 3"
        );
    }

    #[test]
    fn zero_fee_and_zero_amount_lines_are_omitted() {
        assert_eq!(
            transaction_message(&transfer(0, "5"), 7, &eth()).unwrap(),
            "Fee: 0.000000000000000005 ETH\nNonce: 7"
        );
        assert_eq!(
            transaction_message(&transfer(5, "0"), 7, &eth()).unwrap(),
            "Transfer 0.000000000000000005 ETH to: 0x19aa2ed8712072e918632259780e587698ef58df\nNonce: 7"
        );
    }

    #[test]
    fn change_pub_key_message_strips_prefix() {
        let tx = ChangePubKey {
            account_id: 1,
            account: address!("ede35562d3555e61120a151b3c8e8e91d83a378a"),
            new_pk_hash: "sync:18E8446D7748F2DE52B28345BDBC76160E6B35EB".into(),
            fee_token: 0,
            fee: "0".into(),
            nonce: 0,
            signature: None,
            eth_auth_data: None,
            time_range: TimeRange::default(),
        };
        assert_eq!(
            transaction_message(&tx.into(), 0, &eth()).unwrap(),
            "Set signing key: 18e8446d7748f2de52b28345bdbc76160e6b35eb\nNonce: 0"
        );
    }

    #[test]
    fn batch_message_has_one_nonce_line() {
        let tokens = Tokens::from_tokens(vec![eth()]).unwrap();
        let message = batch_message(
            &[transfer(1_000_000_000_000_000_000, "1000"), transfer(2_000_000_000_000_000_000, "0")],
            4,
            &tokens,
        )
        .unwrap();
        assert_eq!(message.matches("Nonce:").count(), 1);
        assert!(message.ends_with("Nonce: 4"));
        assert_eq!(message.lines().count(), 4);
        assert!(batch_message(&[], 0, &tokens).is_err());
    }

    #[test]
    fn mismatched_token_is_rejected() {
        let dai = Token::new(1, "0x6b175474e89094c44da98b954eedeac495271d0f", "DAI", 18);
        assert!(matches!(
            transaction_message(&transfer(1, "1"), 0, &dai),
            Err(SignerError::InvalidInputError(_))
        ));
    }

    #[test]
    fn toggle_messages() {
        let enable = toggle_2fa_message(true, 1_600_000_000_000, None);
        assert!(enable.contains("opting into"));
        assert!(enable.ends_with("Timestamp: 1600000000000"));
        let disable = toggle_2fa_message(false, 1, Some("sync:00"));
        assert!(disable.contains("opting out"));
        assert!(disable.ends_with("\nPubKeyHash: sync:00"));
    }
}
