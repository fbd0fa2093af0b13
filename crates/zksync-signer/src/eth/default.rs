use async_trait::async_trait;
use zksync_primitives::alloy::primitives::{keccak256, Address, PrimitiveSignature, B256};
use zksync_primitives::alloy::signers::Signer;
use zksync_primitives::{
    ChangePubKey, ChangePubKeyEcdsa, ChangePubKeyVariant, EthSignature, Order, Token, Tokens,
    ZkSyncTransaction,
};

use super::messages::{batch_message, order_message, toggle_2fa_message, transaction_message};
use super::EthSigner;
use crate::error::{Result, SignerError};

/// Signer backed by a real ECDSA key.
///
/// Works with any alloy [`Signer`]: a local private key, a hardware wallet or a
/// remote signing service. The key material never leaves `S`.
#[derive(Clone, Debug)]
pub struct DefaultEthSigner<S> {
    signer: S,
}

impl<S> DefaultEthSigner<S>
where
    S: Signer + Send + Sync,
{
    pub fn new(signer: S) -> Self {
        Self { signer }
    }

    pub fn inner(&self) -> &S {
        &self.signer
    }

    async fn sign(&self, message: &[u8], add_prefix: bool) -> Result<PrimitiveSignature> {
        let signature = if add_prefix {
            self.signer.sign_message(message).await
        } else {
            self.signer.sign_hash(&keccak256(message)).await
        };
        signature.map_err(|e| SignerError::SigningError(e.to_string()))
    }

    async fn sign_text(&self, message: &str) -> Result<Option<EthSignature>> {
        let signature = self.sign(message.as_bytes(), true).await?;
        Ok(Some(EthSignature::ethereum(&signature)))
    }
}

#[async_trait]
impl<S> EthSigner for DefaultEthSigner<S>
where
    S: Signer + Send + Sync,
{
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_auth(&self, mut change_pub_key: ChangePubKey) -> Result<ChangePubKey> {
        if change_pub_key.account != self.address() {
            return Err(SignerError::InvalidInputError(format!(
                "change pub key is for account {}, signer controls {}",
                change_pub_key.account,
                self.address()
            )));
        }
        let batch_hash = B256::ZERO;
        let message = change_pub_key.eth_auth_message(batch_hash)?;
        let signature = self.sign(&message, true).await?;
        change_pub_key.eth_auth_data = Some(ChangePubKeyVariant::Ecdsa(ChangePubKeyEcdsa {
            eth_signature: EthSignature::ethereum(&signature).signature,
            batch_hash,
        }));
        Ok(change_pub_key)
    }

    async fn sign_transaction(
        &self,
        tx: &ZkSyncTransaction,
        nonce: u32,
        token: &Token,
    ) -> Result<Option<EthSignature>> {
        self.sign_text(&transaction_message(tx, nonce, token)?).await
    }

    async fn sign_order(
        &self,
        order: &Order,
        token_sell: &Token,
        token_buy: &Token,
    ) -> Result<Option<EthSignature>> {
        self.sign_text(&order_message(order, token_sell, token_buy)?)
            .await
    }

    async fn sign_batch(
        &self,
        txs: &[ZkSyncTransaction],
        nonce: u32,
        tokens: &Tokens,
    ) -> Result<Option<EthSignature>> {
        self.sign_text(&batch_message(txs, nonce, tokens)?).await
    }

    async fn sign_toggle(
        &self,
        enable: bool,
        timestamp: u64,
        pub_key_hash: Option<&str>,
    ) -> Result<Option<EthSignature>> {
        self.sign_text(&toggle_2fa_message(enable, timestamp, pub_key_hash))
            .await
    }

    async fn sign_message(&self, message: &[u8], add_prefix: bool) -> Result<Option<EthSignature>> {
        let signature = self.sign(message, add_prefix).await?;
        Ok(Some(EthSignature::ethereum(&signature)))
    }

    async fn verify_signature(
        &self,
        signature: &EthSignature,
        message: &[u8],
        prefixed: bool,
    ) -> Result<bool> {
        let signature = signature.to_primitive()?;
        let recovered = if prefixed {
            signature.recover_address_from_msg(message)
        } else {
            signature.recover_address_from_prehash(&keccak256(message))
        };
        match recovered {
            Ok(address) => Ok(address == self.address()),
            Err(e) => {
                tracing::debug!("signature recovery failed: {e}");
                Ok(false)
            }
        }
    }
}
