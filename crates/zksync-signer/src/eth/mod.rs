//! On-chain-style signers.
//!
//! Every layer-2 submission may carry a second signature proving control of
//! the on-chain account. [`EthSigner`] is the capability set the rest of the
//! SDK relies on; implementations decide where the key lives, or whether
//! there is a key at all.

use std::sync::Arc;

use async_trait::async_trait;
use zksync_primitives::alloy::primitives::Address;
use zksync_primitives::{
    ChangePubKey, ChangePubKeyAuthType, EthSignature, Order, Token, Tokens, ZkSyncTransaction,
};

use crate::error::Result;

pub mod create2;
pub mod default;
pub mod messages;

/// Produces on-chain-style authorization for layer-2 operations.
///
/// `Ok(None)` means "no on-chain signature is needed" and is a success.
/// Implementations that cannot perform an operation at all return
/// [`SignerError::UnsupportedOperationError`](crate::SignerError::UnsupportedOperationError).
#[async_trait]
pub trait EthSigner: Send + Sync {
    /// Address of the on-chain account this signer speaks for.
    fn address(&self) -> Address;

    /// How [`Self::sign_auth`] authorizes a new layer-2 key.
    fn change_pub_key_auth_type(&self) -> ChangePubKeyAuthType {
        ChangePubKeyAuthType::Ecdsa
    }

    /// Attach the authorization for a new layer-2 key to `change_pub_key`.
    async fn sign_auth(&self, change_pub_key: ChangePubKey) -> Result<ChangePubKey>;

    async fn sign_transaction(
        &self,
        tx: &ZkSyncTransaction,
        nonce: u32,
        token: &Token,
    ) -> Result<Option<EthSignature>>;

    async fn sign_order(
        &self,
        order: &Order,
        token_sell: &Token,
        token_buy: &Token,
    ) -> Result<Option<EthSignature>>;

    /// One signature authorizing the whole batch.
    async fn sign_batch(
        &self,
        txs: &[ZkSyncTransaction],
        nonce: u32,
        tokens: &Tokens,
    ) -> Result<Option<EthSignature>>;

    async fn sign_toggle(
        &self,
        enable: bool,
        timestamp: u64,
        pub_key_hash: Option<&str>,
    ) -> Result<Option<EthSignature>>;

    /// Sign raw bytes, optionally behind the EIP-191 personal message prefix.
    async fn sign_message(&self, message: &[u8], add_prefix: bool) -> Result<Option<EthSignature>>;

    /// Check that `signature` over `message` was produced by [`Self::address`].
    async fn verify_signature(
        &self,
        signature: &EthSignature,
        message: &[u8],
        prefixed: bool,
    ) -> Result<bool>;
}

macro_rules! delegate_eth_signer {
    ($($pointer:ident),+) => {$(
        #[async_trait]
        impl<T> EthSigner for $pointer<T>
        where
            T: EthSigner + ?Sized,
        {
            fn address(&self) -> Address {
                (**self).address()
            }

            fn change_pub_key_auth_type(&self) -> ChangePubKeyAuthType {
                (**self).change_pub_key_auth_type()
            }

            async fn sign_auth(&self, change_pub_key: ChangePubKey) -> Result<ChangePubKey> {
                (**self).sign_auth(change_pub_key).await
            }

            async fn sign_transaction(
                &self,
                tx: &ZkSyncTransaction,
                nonce: u32,
                token: &Token,
            ) -> Result<Option<EthSignature>> {
                (**self).sign_transaction(tx, nonce, token).await
            }

            async fn sign_order(
                &self,
                order: &Order,
                token_sell: &Token,
                token_buy: &Token,
            ) -> Result<Option<EthSignature>> {
                (**self).sign_order(order, token_sell, token_buy).await
            }

            async fn sign_batch(
                &self,
                txs: &[ZkSyncTransaction],
                nonce: u32,
                tokens: &Tokens,
            ) -> Result<Option<EthSignature>> {
                (**self).sign_batch(txs, nonce, tokens).await
            }

            async fn sign_toggle(
                &self,
                enable: bool,
                timestamp: u64,
                pub_key_hash: Option<&str>,
            ) -> Result<Option<EthSignature>> {
                (**self).sign_toggle(enable, timestamp, pub_key_hash).await
            }

            async fn sign_message(
                &self,
                message: &[u8],
                add_prefix: bool,
            ) -> Result<Option<EthSignature>> {
                (**self).sign_message(message, add_prefix).await
            }

            async fn verify_signature(
                &self,
                signature: &EthSignature,
                message: &[u8],
                prefixed: bool,
            ) -> Result<bool> {
                (**self).verify_signature(signature, message, prefixed).await
            }
        }
    )+};
}

delegate_eth_signer!(Box, Arc);
