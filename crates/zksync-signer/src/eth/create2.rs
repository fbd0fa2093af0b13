use async_trait::async_trait;
use zksync_primitives::alloy::primitives::Address;
use zksync_primitives::{
    ChangePubKey, ChangePubKeyAuthType, ChangePubKeyCreate2, ChangePubKeyVariant, EthSignature,
    Order, Token, Tokens, ZkSyncTransaction,
};

use super::EthSigner;
use crate::error::{Result, SignerError};
use crate::zk::ZkSigner;

/// Signer for an account whose address is fixed by a CREATE2 factory.
///
/// There is no private key. Control is proven once, by embedding the
/// derivation parameters in the change-pub-key operation, so every signing
/// call succeeds with no signature and verification is unsupported.
#[derive(Clone, Debug)]
pub struct Create2EthSigner {
    address: Address,
    auth_data: ChangePubKeyCreate2,
}

impl Create2EthSigner {
    /// Derive the account address for `pub_key_hash` from the factory parameters.
    pub fn new(pub_key_hash: &str, auth_data: ChangePubKeyCreate2) -> Result<Self> {
        let address = auth_data.derive_address(pub_key_hash)?;
        tracing::debug!(%address, "derived CREATE2 account address");
        Ok(Self { address, auth_data })
    }

    pub fn from_zk_signer(zk_signer: &ZkSigner, auth_data: ChangePubKeyCreate2) -> Result<Self> {
        Self::new(zk_signer.pub_key_hash(), auth_data)
    }

    pub fn auth_data(&self) -> &ChangePubKeyCreate2 {
        &self.auth_data
    }
}

#[async_trait]
impl EthSigner for Create2EthSigner {
    fn address(&self) -> Address {
        self.address
    }

    fn change_pub_key_auth_type(&self) -> ChangePubKeyAuthType {
        ChangePubKeyAuthType::Create2
    }

    async fn sign_auth(&self, mut change_pub_key: ChangePubKey) -> Result<ChangePubKey> {
        change_pub_key.eth_auth_data = Some(ChangePubKeyVariant::Create2(self.auth_data.clone()));
        Ok(change_pub_key)
    }

    async fn sign_transaction(
        &self,
        _tx: &ZkSyncTransaction,
        _nonce: u32,
        _token: &Token,
    ) -> Result<Option<EthSignature>> {
        Ok(None)
    }

    async fn sign_order(
        &self,
        _order: &Order,
        _token_sell: &Token,
        _token_buy: &Token,
    ) -> Result<Option<EthSignature>> {
        Ok(None)
    }

    async fn sign_batch(
        &self,
        _txs: &[ZkSyncTransaction],
        _nonce: u32,
        _tokens: &Tokens,
    ) -> Result<Option<EthSignature>> {
        Ok(None)
    }

    async fn sign_toggle(
        &self,
        _enable: bool,
        _timestamp: u64,
        _pub_key_hash: Option<&str>,
    ) -> Result<Option<EthSignature>> {
        Ok(None)
    }

    async fn sign_message(
        &self,
        _message: &[u8],
        _add_prefix: bool,
    ) -> Result<Option<EthSignature>> {
        Ok(None)
    }

    async fn verify_signature(
        &self,
        _signature: &EthSignature,
        _message: &[u8],
        _prefixed: bool,
    ) -> Result<bool> {
        Err(SignerError::UnsupportedOperationError(
            "CREATE2 signer does not produce or verify signatures".into(),
        ))
    }
}
