use alloy::hex;
use alloy::primitives::Address;
use lazy_static::lazy_static;

use crate::{PrimitivesError, Result};

/// Prefix distinguishing a layer-2 public key hash from an on-chain address.
pub const PUB_KEY_HASH_PREFIX: &str = "sync:";

/// Length in bytes of a layer-2 public key hash.
pub const PUB_KEY_HASH_LEN: usize = 20;

lazy_static! {
    /// Public key hash reported for accounts that never set a signing key.
    pub static ref EMPTY_PUB_KEY_HASH: String = encode_pub_key_hash(&[0u8; PUB_KEY_HASH_LEN]);
}

/// Decode a hex string (with or without `0x`), optionally enforcing its byte length.
pub fn decode_hex(field: &str, value: &str, expected_len: Option<usize>) -> Result<Vec<u8>> {
    let bytes = hex::decode(value).map_err(|e| {
        PrimitivesError::InvalidInputError(format!("{field} is not valid hex ({value:?}): {e}"))
    })?;
    match expected_len {
        Some(len) if bytes.len() != len => Err(PrimitivesError::InvalidInputError(format!(
            "{field} must be {len} bytes, got {}",
            bytes.len()
        ))),
        _ => Ok(bytes),
    }
}

/// Parse a 20-byte on-chain address from hex.
pub fn parse_address(field: &str, value: &str) -> Result<Address> {
    let bytes = decode_hex(field, value, Some(20))?;
    Ok(Address::from_slice(&bytes))
}

/// Strip the `sync:` prefix from a public key hash and decode the remaining 20 bytes.
pub fn decode_pub_key_hash(pub_key_hash: &str) -> Result<[u8; PUB_KEY_HASH_LEN]> {
    let stripped = pub_key_hash
        .strip_prefix(PUB_KEY_HASH_PREFIX)
        .unwrap_or(pub_key_hash)
        .to_lowercase();
    let bytes = decode_hex("pub key hash", &stripped, Some(PUB_KEY_HASH_LEN))?;
    let mut out = [0u8; PUB_KEY_HASH_LEN];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Render 20 raw bytes as a `sync:`-prefixed public key hash.
pub fn encode_pub_key_hash(bytes: &[u8; PUB_KEY_HASH_LEN]) -> String {
    format!("{PUB_KEY_HASH_PREFIX}{}", hex::encode(bytes))
}
