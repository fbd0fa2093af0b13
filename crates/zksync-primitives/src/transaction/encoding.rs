use alloy::primitives::Address;
use num_bigint::BigUint;

use super::{TimeRange, CURRENT_TX_VERSION};
use crate::utils::decode_pub_key_hash;
use crate::{PrimitivesError, Result};

const AMOUNT_WIDTH: usize = 32;

/// Big-endian writer for the canonical transaction encoding.
#[derive(Debug, Default)]
pub(crate) struct TxEncoder {
    buf: Vec<u8>,
}

impl TxEncoder {
    /// Versioned transactions start with `0xff - type` followed by the format version.
    pub(crate) fn versioned(tx_type: u8) -> Self {
        let mut encoder = Self::default();
        encoder.buf.push(0xff - tx_type);
        encoder.buf.push(CURRENT_TX_VERSION);
        encoder
    }

    pub(crate) fn with_marker(marker: u8) -> Self {
        let mut encoder = Self::default();
        encoder.buf.push(marker);
        encoder.buf.push(CURRENT_TX_VERSION);
        encoder
    }

    pub(crate) fn u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub(crate) fn address(mut self, address: &Address) -> Self {
        self.buf.extend_from_slice(address.as_slice());
        self
    }

    pub(crate) fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub(crate) fn pub_key_hash(self, pub_key_hash: &str) -> Result<Self> {
        let bytes = decode_pub_key_hash(pub_key_hash)?;
        Ok(self.bytes(&bytes))
    }

    /// Amounts are left-padded to 32 bytes; anything wider is rejected.
    pub(crate) fn amount(mut self, field: &str, value: &BigUint) -> Result<Self> {
        let raw = value.to_bytes_be();
        if raw.len() > AMOUNT_WIDTH {
            return Err(PrimitivesError::EncodingError(format!(
                "{field} does not fit in {AMOUNT_WIDTH} bytes"
            )));
        }
        self.buf
            .extend(std::iter::repeat(0u8).take(AMOUNT_WIDTH - raw.len()));
        self.buf.extend_from_slice(&raw);
        Ok(self)
    }

    pub(crate) fn time_range(mut self, time_range: &TimeRange) -> Self {
        self.buf
            .extend_from_slice(&time_range.valid_from.to_be_bytes());
        self.buf
            .extend_from_slice(&time_range.valid_until.to_be_bytes());
        self
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.buf
    }
}
