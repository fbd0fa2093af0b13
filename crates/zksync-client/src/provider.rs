//! Typed access to the zkSync JSON-RPC api.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use zksync_primitives::alloy::primitives::Address;
use zksync_primitives::serde_utils::f64_from_str_or_number;
use zksync_primitives::{
    AccountState, ContractAddress, EthOpInfo, EthSignature, SignableTransaction, SignedTransaction,
    Toggle2FA, Toggle2FAResponse, Token, Tokens, TransactionDetails, TransactionFeeBatchRequest,
    TransactionFeeDetails, TransactionFeeRequest, ZkSyncTransaction,
};

use crate::error::{ClientError, Result};
use crate::transport::Transport;

/// Domain operations offered by a zkSync node.
///
/// Submission methods take transactions whose signatures are already
/// resolved; nothing is signed here.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn get_state(&self, address: Address) -> Result<AccountState>;

    async fn get_transaction_fee(
        &self,
        request: &TransactionFeeRequest,
    ) -> Result<TransactionFeeDetails>;

    /// Combined fee for a batch; fails before any call if the request lists are misaligned.
    async fn get_transaction_fee_batch(
        &self,
        request: &TransactionFeeBatchRequest,
    ) -> Result<TransactionFeeDetails>;

    /// Cached registry, fetched on first use.
    async fn get_tokens(&self) -> Result<Arc<Tokens>>;

    /// Fetch the registry again and replace the cached snapshot.
    async fn update_token_set(&self) -> Result<Arc<Tokens>>;

    /// Price of `token` in USD, as reported by the node.
    async fn get_token_price(&self, token: &Token) -> Result<f64>;

    async fn submit_tx(
        &self,
        tx: &ZkSyncTransaction,
        eth_signature: Option<&EthSignature>,
        fast_processing: bool,
    ) -> Result<String>;

    /// Submit a transaction that needs several on-chain signatures, such as a swap.
    async fn submit_tx_with_signatures(
        &self,
        tx: &ZkSyncTransaction,
        eth_signatures: &[EthSignature],
    ) -> Result<String>;

    /// Submit all transactions atomically; returns one hash per transaction, in order.
    async fn submit_tx_batch(
        &self,
        txs: &[SignedTransaction],
        eth_signature: Option<&EthSignature>,
    ) -> Result<Vec<String>>;

    async fn contract_address(&self) -> Result<ContractAddress>;

    async fn get_transaction_details(&self, tx_hash: &str) -> Result<TransactionDetails>;

    async fn get_eth_op_info(&self, serial_id: u64) -> Result<EthOpInfo>;

    async fn get_confirmations_for_eth_op_amount(&self) -> Result<u64>;

    async fn get_eth_transaction_for_withdrawal(&self, withdrawal_hash: &str) -> Result<String>;

    async fn toggle_2fa(&self, toggle: &Toggle2FA) -> Result<bool>;
}

macro_rules! delegate_provider {
    ($($pointer:ident),+) => {$(
        #[async_trait]
        impl<P> Provider for $pointer<P>
        where
            P: Provider + ?Sized,
        {
            async fn get_state(&self, address: Address) -> Result<AccountState> {
                (**self).get_state(address).await
            }

            async fn get_transaction_fee(
                &self,
                request: &TransactionFeeRequest,
            ) -> Result<TransactionFeeDetails> {
                (**self).get_transaction_fee(request).await
            }

            async fn get_transaction_fee_batch(
                &self,
                request: &TransactionFeeBatchRequest,
            ) -> Result<TransactionFeeDetails> {
                (**self).get_transaction_fee_batch(request).await
            }

            async fn get_tokens(&self) -> Result<Arc<Tokens>> {
                (**self).get_tokens().await
            }

            async fn update_token_set(&self) -> Result<Arc<Tokens>> {
                (**self).update_token_set().await
            }

            async fn get_token_price(&self, token: &Token) -> Result<f64> {
                (**self).get_token_price(token).await
            }

            async fn submit_tx(
                &self,
                tx: &ZkSyncTransaction,
                eth_signature: Option<&EthSignature>,
                fast_processing: bool,
            ) -> Result<String> {
                (**self).submit_tx(tx, eth_signature, fast_processing).await
            }

            async fn submit_tx_with_signatures(
                &self,
                tx: &ZkSyncTransaction,
                eth_signatures: &[EthSignature],
            ) -> Result<String> {
                (**self).submit_tx_with_signatures(tx, eth_signatures).await
            }

            async fn submit_tx_batch(
                &self,
                txs: &[SignedTransaction],
                eth_signature: Option<&EthSignature>,
            ) -> Result<Vec<String>> {
                (**self).submit_tx_batch(txs, eth_signature).await
            }

            async fn contract_address(&self) -> Result<ContractAddress> {
                (**self).contract_address().await
            }

            async fn get_transaction_details(&self, tx_hash: &str) -> Result<TransactionDetails> {
                (**self).get_transaction_details(tx_hash).await
            }

            async fn get_eth_op_info(&self, serial_id: u64) -> Result<EthOpInfo> {
                (**self).get_eth_op_info(serial_id).await
            }

            async fn get_confirmations_for_eth_op_amount(&self) -> Result<u64> {
                (**self).get_confirmations_for_eth_op_amount().await
            }

            async fn get_eth_transaction_for_withdrawal(
                &self,
                withdrawal_hash: &str,
            ) -> Result<String> {
                (**self).get_eth_transaction_for_withdrawal(withdrawal_hash).await
            }

            async fn toggle_2fa(&self, toggle: &Toggle2FA) -> Result<bool> {
                (**self).toggle_2fa(toggle).await
            }
        }
    )+};
}

delegate_provider!(Box, Arc);

/// Fails unless every layer-2 signature the transaction needs is present.
fn ensure_signed(tx: &ZkSyncTransaction) -> Result<()> {
    if !tx.is_signed() {
        return Err(ClientError::MissingSignatureError(format!(
            "{} with nonce {} is not signed",
            tx.type_name(),
            tx.nonce()
        )));
    }
    if let ZkSyncTransaction::Swap(swap) = tx {
        if swap.orders.0.signature.is_none() || swap.orders.1.signature.is_none() {
            return Err(ClientError::MissingSignatureError(
                "swap contains an unsigned order".into(),
            ));
        }
    }
    Ok(())
}

fn to_value<T: serde::Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| ClientError::InvalidInputError(format!("failed to serialize params: {e}")))
}

#[derive(serde::Deserialize)]
struct TokenPrice(#[serde(deserialize_with = "f64_from_str_or_number")] f64);

/// [`Provider`] over any [`Transport`].
#[derive(Debug)]
pub struct DefaultProvider<T> {
    transport: T,
    tokens: RwLock<Option<Arc<Tokens>>>,
}

impl<T> DefaultProvider<T>
where
    T: Transport,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tokens: RwLock::new(None),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send<R: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<R> {
        let value = self.transport.request(method, params).await?;
        serde_json::from_value(value).map_err(|e| {
            ClientError::TransportError(format!("unexpected {method} result: {e}"))
        })
    }

    async fn resolve_token(&self, identifier: &str) -> Result<Token> {
        let tokens = self.get_tokens().await?;
        Ok(tokens.resolve(identifier)?.clone())
    }
}

#[async_trait]
impl<T> Provider for DefaultProvider<T>
where
    T: Transport,
{
    async fn get_state(&self, address: Address) -> Result<AccountState> {
        self.send("account_info", vec![to_value(&address)?]).await
    }

    async fn get_transaction_fee(
        &self,
        request: &TransactionFeeRequest,
    ) -> Result<TransactionFeeDetails> {
        let token = self.resolve_token(&request.token_identifier).await?;
        self.send(
            "get_tx_fee",
            vec![
                request.transaction_type.raw(),
                to_value(&request.address)?,
                Value::from(token.symbol),
            ],
        )
        .await
    }

    async fn get_transaction_fee_batch(
        &self,
        request: &TransactionFeeBatchRequest,
    ) -> Result<TransactionFeeDetails> {
        request.validate()?;
        let token = self.resolve_token(&request.token_identifier).await?;
        self.send(
            "get_txs_batch_fee_in_wei",
            vec![
                Value::Array(request.transaction_types_raw()),
                to_value(&request.addresses)?,
                Value::from(token.symbol),
            ],
        )
        .await
    }

    async fn get_tokens(&self) -> Result<Arc<Tokens>> {
        if let Some(tokens) = self.tokens.read().await.as_ref() {
            return Ok(Arc::clone(tokens));
        }
        // concurrent first calls may each fetch; the last write wins
        self.update_token_set().await
    }

    async fn update_token_set(&self) -> Result<Arc<Tokens>> {
        let tokens: Tokens = self.send("tokens", vec![]).await?;
        tracing::info!(count = tokens.len(), "loaded token registry");
        let tokens = Arc::new(tokens);
        *self.tokens.write().await = Some(Arc::clone(&tokens));
        Ok(tokens)
    }

    async fn get_token_price(&self, token: &Token) -> Result<f64> {
        let price: TokenPrice = self
            .send("get_token_price", vec![Value::from(token.symbol.as_str())])
            .await?;
        Ok(price.0)
    }

    async fn submit_tx(
        &self,
        tx: &ZkSyncTransaction,
        eth_signature: Option<&EthSignature>,
        fast_processing: bool,
    ) -> Result<String> {
        ensure_signed(tx)?;
        tracing::info!(tx_type = tx.type_name(), nonce = tx.nonce(), "submitting transaction");
        self.send(
            "tx_submit",
            vec![to_value(tx)?, to_value(&eth_signature)?, Value::from(fast_processing)],
        )
        .await
    }

    async fn submit_tx_with_signatures(
        &self,
        tx: &ZkSyncTransaction,
        eth_signatures: &[EthSignature],
    ) -> Result<String> {
        ensure_signed(tx)?;
        tracing::info!(
            tx_type = tx.type_name(),
            signatures = eth_signatures.len(),
            "submitting transaction"
        );
        self.send("tx_submit", vec![to_value(tx)?, to_value(eth_signatures)?])
            .await
    }

    async fn submit_tx_batch(
        &self,
        txs: &[SignedTransaction],
        eth_signature: Option<&EthSignature>,
    ) -> Result<Vec<String>> {
        if txs.is_empty() {
            return Err(ClientError::InvalidInputError("batch is empty".into()));
        }
        for signed in txs {
            ensure_signed(&signed.tx)?;
            if let (Some(batch), Some(own)) = (eth_signature, signed.signature.as_ref()) {
                if batch != own {
                    return Err(ClientError::InvalidInputError(format!(
                        "{} with nonce {} carries a signature that conflicts with the batch signature",
                        signed.tx.type_name(),
                        signed.tx.nonce()
                    )));
                }
            }
        }

        tracing::info!(count = txs.len(), "submitting transaction batch");
        let hashes: Vec<String> = self
            .send("submit_txs_batch", vec![to_value(txs)?, to_value(&eth_signature)?])
            .await?;
        if hashes.len() != txs.len() {
            return Err(ClientError::TransportError(format!(
                "submitted {} transactions but received {} hashes",
                txs.len(),
                hashes.len()
            )));
        }
        Ok(hashes)
    }

    async fn contract_address(&self) -> Result<ContractAddress> {
        self.send("contract_address", vec![]).await
    }

    async fn get_transaction_details(&self, tx_hash: &str) -> Result<TransactionDetails> {
        self.send("tx_info", vec![Value::from(tx_hash)]).await
    }

    async fn get_eth_op_info(&self, serial_id: u64) -> Result<EthOpInfo> {
        self.send("ethop_info", vec![Value::from(serial_id)]).await
    }

    async fn get_confirmations_for_eth_op_amount(&self) -> Result<u64> {
        self.send("get_confirmations_for_eth_op_amount", vec![])
            .await
    }

    async fn get_eth_transaction_for_withdrawal(&self, withdrawal_hash: &str) -> Result<String> {
        self.send("get_eth_tx_for_withdrawal", vec![Value::from(withdrawal_hash)])
            .await
    }

    async fn toggle_2fa(&self, toggle: &Toggle2FA) -> Result<bool> {
        let response: Toggle2FAResponse = self.send("toggle_2fa", vec![to_value(toggle)?]).await?;
        Ok(response.success)
    }
}
