//! High level account operations.
//!
//! A [`Wallet`] ties a provider to the two signers of one account and fills in
//! what the caller leaves out: the fee is estimated by the node and the nonce
//! is taken from the committed account state.

use std::fmt;

use num_bigint::BigUint;
use zksync_primitives::alloy::primitives::Address;
use zksync_primitives::{
    AccountState, ChangePubKey, ForcedExit, SignableTransaction, SignedTransaction, TimeRange,
    Toggle2FA, Token, TransactionFeeBatchRequest, TransactionFeeRequest, TransactionType, Transfer,
    Withdraw, ZkSyncTransaction,
};
use zksync_signer::{EthSigner, ZkSigner};

use crate::error::{ClientError, Result};
use crate::provider::Provider;

pub struct Wallet<P, S> {
    provider: P,
    eth_signer: S,
    zk_signer: ZkSigner,
    account_id: Option<u32>,
}

impl<P, S: EthSigner> fmt::Debug for Wallet<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.eth_signer.address())
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}

impl<P, S> Wallet<P, S>
where
    P: Provider,
    S: EthSigner,
{
    /// Load the account id of the signer's address from the node.
    pub async fn new(provider: P, eth_signer: S, zk_signer: ZkSigner) -> Result<Self> {
        let state = provider.get_state(eth_signer.address()).await?;
        tracing::debug!(address = %eth_signer.address(), id = ?state.id, "loaded wallet account");
        Ok(Self {
            provider,
            eth_signer,
            zk_signer,
            account_id: state.id,
        })
    }

    pub fn address(&self) -> Address {
        self.eth_signer.address()
    }

    pub fn account_id(&self) -> Option<u32> {
        self.account_id
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn eth_signer(&self) -> &S {
        &self.eth_signer
    }

    pub fn zk_signer(&self) -> &ZkSigner {
        &self.zk_signer
    }

    pub async fn get_state(&self) -> Result<AccountState> {
        self.provider.get_state(self.address()).await
    }

    /// Committed nonce of the account.
    pub async fn get_nonce(&self) -> Result<u32> {
        Ok(self.get_state().await?.committed.nonce)
    }

    /// Whether the committed layer-2 key of the account is this wallet's key.
    pub async fn is_signing_key_set(&self) -> Result<bool> {
        let committed = self.get_state().await?.committed;
        Ok(committed.has_signing_key()
            && committed.pub_key_hash.to_lowercase() == self.zk_signer.pub_key_hash())
    }

    /// Register this wallet's layer-2 key for the account.
    pub async fn set_signing_key(
        &self,
        fee_token: &str,
        fee: Option<BigUint>,
        nonce: Option<u32>,
        time_range: TimeRange,
    ) -> Result<String> {
        let account_id = self.require_account_id()?;
        let tokens = self.provider.get_tokens().await?;
        let token = tokens.resolve(fee_token)?;
        let tx_type = TransactionType::ChangePubKey(self.eth_signer.change_pub_key_auth_type());
        let fee = self.resolve_fee(fee, tx_type, self.address(), token).await?;
        let nonce = self.resolve_nonce(nonce).await?;

        let tx = ChangePubKey {
            account_id,
            account: self.address(),
            new_pk_hash: self.zk_signer.pub_key_hash().to_string(),
            fee_token: token.id,
            fee: fee.to_string(),
            nonce,
            signature: None,
            eth_auth_data: None,
            time_range,
        };
        let tx = self.eth_signer.sign_auth(tx).await?;
        let tx = ZkSyncTransaction::from(self.zk_signer.sign_transaction(tx)?);
        // authorization travels inside the transaction
        self.provider.submit_tx(&tx, None, false).await
    }

    pub async fn sync_transfer(
        &self,
        to: Address,
        amount: BigUint,
        token: &str,
        fee: Option<BigUint>,
        nonce: Option<u32>,
        time_range: TimeRange,
    ) -> Result<String> {
        let account_id = self.require_account_id()?;
        let tokens = self.provider.get_tokens().await?;
        let token = tokens.resolve(token)?;
        let fee = self.resolve_fee(fee, TransactionType::Transfer, to, token).await?;
        let nonce = self.resolve_nonce(nonce).await?;

        let tx = Transfer {
            account_id,
            from: self.address(),
            to,
            token: token.id,
            amount,
            fee: fee.to_string(),
            nonce,
            signature: None,
            time_range,
        };
        self.sign_and_submit(tx.into(), token, false).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn sync_withdraw(
        &self,
        eth_address: Address,
        amount: BigUint,
        token: &str,
        fee: Option<BigUint>,
        nonce: Option<u32>,
        fast_processing: bool,
        time_range: TimeRange,
    ) -> Result<String> {
        let account_id = self.require_account_id()?;
        let tokens = self.provider.get_tokens().await?;
        let token = tokens.resolve(token)?;
        let tx_type = if fast_processing {
            TransactionType::FastWithdraw
        } else {
            TransactionType::Withdraw
        };
        let fee = self.resolve_fee(fee, tx_type, eth_address, token).await?;
        let nonce = self.resolve_nonce(nonce).await?;

        let tx = Withdraw {
            account_id,
            from: self.address(),
            to: eth_address,
            token: token.id,
            amount,
            fee: fee.to_string(),
            nonce,
            signature: None,
            time_range,
        };
        self.sign_and_submit(tx.into(), token, fast_processing)
            .await
    }

    /// Withdraw the whole balance of `target`, an account without a signing key.
    pub async fn sync_forced_exit(
        &self,
        target: Address,
        token: &str,
        fee: Option<BigUint>,
        nonce: Option<u32>,
        time_range: TimeRange,
    ) -> Result<String> {
        let account_id = self.require_account_id()?;
        let tokens = self.provider.get_tokens().await?;
        let token = tokens.resolve(token)?;
        let fee = self
            .resolve_fee(fee, TransactionType::ForcedExit, target, token)
            .await?;
        let nonce = self.resolve_nonce(nonce).await?;

        let tx = ForcedExit {
            initiator_account_id: account_id,
            target,
            token: token.id,
            fee: fee.to_string(),
            nonce,
            signature: None,
            time_range,
        };
        self.sign_and_submit(tx.into(), token, false).await
    }

    /// Transfer to several recipients in one atomic batch.
    ///
    /// The whole fee is charged on the first transfer and a single on-chain
    /// signature authorizes the batch. Nonces are consecutive from `nonce`.
    pub async fn sync_batch_transfer(
        &self,
        transfers: &[(Address, BigUint)],
        token: &str,
        fee: Option<BigUint>,
        nonce: Option<u32>,
        time_range: TimeRange,
    ) -> Result<Vec<String>> {
        if transfers.is_empty() {
            return Err(ClientError::InvalidInputError("no transfers given".into()));
        }
        let account_id = self.require_account_id()?;
        let tokens = self.provider.get_tokens().await?;
        let token = tokens.resolve(token)?;
        let fee = match fee {
            Some(fee) => fee,
            None => {
                let request = TransactionFeeBatchRequest::new(
                    vec![TransactionType::Transfer; transfers.len()],
                    transfers.iter().map(|(to, _)| *to).collect(),
                    token.symbol.clone(),
                )?;
                self.provider
                    .get_transaction_fee_batch(&request)
                    .await?
                    .total_fee
            }
        };
        let first_nonce = self.resolve_nonce(nonce).await?;

        let mut txs = Vec::with_capacity(transfers.len());
        for (i, (to, amount)) in transfers.iter().enumerate() {
            let nonce = u32::try_from(i)
                .ok()
                .and_then(|i| first_nonce.checked_add(i))
                .ok_or_else(|| ClientError::InvalidInputError("nonce overflow".into()))?;
            let tx_fee = if i == 0 { fee.clone() } else { BigUint::default() };
            let tx = Transfer {
                account_id,
                from: self.address(),
                to: *to,
                token: token.id,
                amount: amount.clone(),
                fee: tx_fee.to_string(),
                nonce,
                signature: None,
                time_range,
            };
            txs.push(ZkSyncTransaction::from(self.zk_signer.sign_transaction(tx)?));
        }

        let eth_signature = self
            .eth_signer
            .sign_batch(&txs, first_nonce, &tokens)
            .await?;
        let signed: Vec<SignedTransaction> = txs
            .into_iter()
            .map(|tx| SignedTransaction::new(tx, None))
            .collect();
        self.provider
            .submit_tx_batch(&signed, eth_signature.as_ref())
            .await
    }

    pub async fn enable_2fa(&self) -> Result<bool> {
        self.toggle_2fa(true, None).await
    }

    /// Disable two-factor authentication, optionally only for `pub_key_hash`.
    pub async fn disable_2fa(&self, pub_key_hash: Option<&str>) -> Result<bool> {
        self.toggle_2fa(false, pub_key_hash).await
    }

    async fn toggle_2fa(&self, enable: bool, pub_key_hash: Option<&str>) -> Result<bool> {
        let account_id = self.require_account_id()?;
        let timestamp = u64::try_from(chrono::Utc::now().timestamp_millis())
            .map_err(|e| ClientError::InvalidInputError(format!("invalid clock: {e}")))?;
        let signature = self
            .eth_signer
            .sign_toggle(enable, timestamp, pub_key_hash)
            .await?
            .ok_or_else(|| {
                ClientError::MissingSignatureError(
                    "eth signer did not authorize the 2FA toggle".into(),
                )
            })?;
        let toggle = Toggle2FA {
            enable,
            account_id,
            time_stamp_milliseconds: timestamp,
            signature,
            pub_key_hash: pub_key_hash.map(str::to_string),
        };
        self.provider.toggle_2fa(&toggle).await
    }

    async fn sign_and_submit(
        &self,
        tx: ZkSyncTransaction,
        token: &Token,
        fast_processing: bool,
    ) -> Result<String> {
        let tx = self.zk_signer.sign_transaction(tx)?;
        let eth_signature = self
            .eth_signer
            .sign_transaction(&tx, tx.nonce(), token)
            .await?;
        self.provider
            .submit_tx(&tx, eth_signature.as_ref(), fast_processing)
            .await
    }

    fn require_account_id(&self) -> Result<u32> {
        self.account_id.ok_or_else(|| {
            ClientError::InvalidInputError(format!(
                "account {} has no id yet, it must receive funds first",
                self.address()
            ))
        })
    }

    async fn resolve_nonce(&self, nonce: Option<u32>) -> Result<u32> {
        match nonce {
            Some(nonce) => Ok(nonce),
            None => self.get_nonce().await,
        }
    }

    async fn resolve_fee(
        &self,
        fee: Option<BigUint>,
        tx_type: TransactionType,
        address: Address,
        token: &Token,
    ) -> Result<BigUint> {
        if let Some(fee) = fee {
            return Ok(fee);
        }
        let request = TransactionFeeRequest::new(tx_type, address, token.symbol.clone());
        Ok(self.provider.get_transaction_fee(&request).await?.total_fee)
    }
}
