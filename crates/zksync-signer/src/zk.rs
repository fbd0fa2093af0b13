//! Layer-2 signing key.
//!
//! Transactions are authorized by a Schnorr signature over their canonical
//! encoding. The account records only the public key hash: the last 20 bytes
//! of `keccak256(x-only public key)`, shown with the `sync:` prefix.

use std::fmt;

use k256::schnorr::signature::{Signer as _, Verifier as _};
use k256::schnorr::{Signature as SchnorrSignature, SigningKey, VerifyingKey};
use zksync_primitives::alloy::primitives::keccak256;
use zksync_primitives::alloy::utils::hex;
use zksync_primitives::utils::{decode_hex, encode_pub_key_hash, PUB_KEY_HASH_LEN};
use zksync_primitives::{Order, SignableTransaction, Signature};

use crate::eth::messages::ZK_SEED_MESSAGE;
use crate::eth::EthSigner;
use crate::error::{Result, SignerError};

const MIN_SEED_LEN: usize = 32;

#[derive(Clone)]
pub struct ZkSigner {
    signing_key: SigningKey,
    pub_key_hash: String,
}

impl fmt::Debug for ZkSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZkSigner")
            .field("pub_key_hash", &self.pub_key_hash)
            .finish_non_exhaustive()
    }
}

impl ZkSigner {
    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        let signing_key = SigningKey::from_bytes(private_key)
            .map_err(|e| SignerError::InvalidInputError(format!("invalid layer-2 private key: {e}")))?;
        let pub_key_hash = pub_key_hash(signing_key.verifying_key());
        Ok(Self {
            signing_key,
            pub_key_hash,
        })
    }

    /// Deterministically derive the key from at least 32 bytes of seed material.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() < MIN_SEED_LEN {
            return Err(SignerError::InvalidInputError(format!(
                "seed must be at least {MIN_SEED_LEN} bytes, got {}",
                seed.len()
            )));
        }
        Self::from_private_key(keccak256(seed).as_slice())
    }

    /// Derive the key from the on-chain account's signature of a fixed message,
    /// so the layer-2 key can always be recovered from the on-chain one.
    pub async fn from_eth_signer<S>(eth_signer: &S) -> Result<Self>
    where
        S: EthSigner + ?Sized,
    {
        let signature = eth_signer
            .sign_message(ZK_SEED_MESSAGE.as_bytes(), true)
            .await?
            .ok_or_else(|| {
                SignerError::UnsupportedOperationError(
                    "eth signer cannot sign the key derivation message".into(),
                )
            })?;
        let seed = decode_hex("eth signature", &signature.signature, None)?;
        Self::from_seed(&seed)
    }

    pub fn pub_key_hash(&self) -> &str {
        &self.pub_key_hash
    }

    /// Hex-encoded x-only public key.
    pub fn public_key(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        let signature: SchnorrSignature = self.signing_key.sign(message);
        Signature {
            pub_key: self.public_key(),
            signature: hex::encode(signature.to_bytes()),
        }
    }

    /// Sign the canonical encoding of `tx` and return it with the signature attached.
    pub fn sign_transaction<T: SignableTransaction>(&self, mut tx: T) -> Result<T> {
        let signature = self.sign(&tx.signing_bytes()?);
        tx.set_signature(signature);
        Ok(tx)
    }

    pub fn sign_order(&self, mut order: Order) -> Result<Order> {
        let signature = self.sign(&order.signing_bytes()?);
        order.set_signature(signature);
        Ok(order)
    }

    /// Check a layer-2 signature against the public key it carries.
    pub fn verify(signature: &Signature, message: &[u8]) -> Result<bool> {
        let pub_key = decode_hex("public key", &signature.pub_key, Some(32))?;
        let verifying_key = VerifyingKey::from_bytes(&pub_key)
            .map_err(|e| SignerError::InvalidInputError(format!("invalid public key: {e}")))?;
        let raw = decode_hex("signature", &signature.signature, Some(64))?;
        let signature = SchnorrSignature::try_from(raw.as_slice())
            .map_err(|e| SignerError::InvalidInputError(format!("malformed signature: {e}")))?;
        Ok(verifying_key.verify(message, &signature).is_ok())
    }
}

fn pub_key_hash(verifying_key: &VerifyingKey) -> String {
    let hash = keccak256(verifying_key.to_bytes());
    let mut out = [0u8; PUB_KEY_HASH_LEN];
    out.copy_from_slice(&hash[32 - PUB_KEY_HASH_LEN..]);
    encode_pub_key_hash(&out)
}
