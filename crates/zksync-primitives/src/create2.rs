//! Deterministic account addresses for CREATE2-authorized accounts.
//!
//! The factory contract deploys the account wallet with
//! `salt = keccak256(salt_arg ++ pub_key_hash)`, so the resulting address is
//! `keccak256(0xff ++ creator ++ salt ++ code_hash)[12..]`. Everything here must
//! match the on-chain computation byte for byte; a wrong offset still yields a
//! well-formed address, just not the account's.

use alloy::primitives::{keccak256, Address, B256};

use crate::transaction::ChangePubKeyCreate2;
use crate::utils::{decode_hex, decode_pub_key_hash, parse_address};
use crate::Result;

const CREATE2_PREFIX: u8 = 0xff;

/// `keccak256(salt_arg ++ pub_key_hash)`
pub fn generate_salt(salt_arg: &[u8], pub_key_hash: &[u8]) -> B256 {
    let mut preimage = Vec::with_capacity(salt_arg.len() + pub_key_hash.len());
    preimage.extend_from_slice(salt_arg);
    preimage.extend_from_slice(pub_key_hash);
    keccak256(preimage)
}

/// `keccak256(0xff ++ creator ++ salt ++ code_hash)[12..]`
pub fn generate_address(creator: Address, salt: B256, code_hash: B256) -> Address {
    let mut preimage = [0u8; 1 + 20 + 32 + 32];
    preimage[0] = CREATE2_PREFIX;
    preimage[1..21].copy_from_slice(creator.as_slice());
    preimage[21..53].copy_from_slice(salt.as_slice());
    preimage[53..85].copy_from_slice(code_hash.as_slice());
    let hash = keccak256(preimage);
    Address::from_slice(&hash[12..])
}

/// Derive the account address from hex-encoded inputs.
///
/// `pub_key_hash` may carry the `sync:` prefix. All inputs are validated
/// before anything is hashed.
pub fn derive_address(
    creator_address: &str,
    salt_arg: &str,
    pub_key_hash: &str,
    code_hash: &str,
) -> Result<Address> {
    let creator = parse_address("creator address", creator_address)?;
    let salt_arg = decode_hex("salt arg", salt_arg, None)?;
    let pub_key_hash = decode_pub_key_hash(pub_key_hash)?;
    let code_hash = B256::from_slice(&decode_hex("code hash", code_hash, Some(32))?);

    let salt = generate_salt(&salt_arg, &pub_key_hash);
    Ok(generate_address(creator, salt, code_hash))
}

impl ChangePubKeyCreate2 {
    /// Address the factory deploys for this auth data and layer-2 key.
    pub fn derive_address(&self, pub_key_hash: &str) -> Result<Address> {
        derive_address(
            &self.creator_address,
            &self.salt_arg,
            pub_key_hash,
            &self.code_hash,
        )
    }
}
