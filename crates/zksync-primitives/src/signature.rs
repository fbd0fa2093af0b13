use alloy::hex;
use alloy::primitives::PrimitiveSignature;
use serde::{Deserialize, Serialize};

use crate::{PrimitivesError, Result};

/// Layer-2 signature over a transaction's canonical encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub pub_key: String,
    pub signature: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EthSignatureType {
    #[serde(rename = "EthereumSignature")]
    Ethereum,
    #[serde(rename = "EIP1271Signature")]
    Eip1271,
}

/// On-chain-style signature attached to a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthSignature {
    #[serde(rename = "type")]
    pub signature_type: EthSignatureType,
    pub signature: String,
}

impl EthSignature {
    pub fn ethereum(signature: &PrimitiveSignature) -> Self {
        Self {
            signature_type: EthSignatureType::Ethereum,
            signature: hex::encode_prefixed(signature.as_bytes()),
        }
    }

    /// Decode back into a recoverable ECDSA signature.
    pub fn to_primitive(&self) -> Result<PrimitiveSignature> {
        let bytes = hex::decode(&self.signature).map_err(|e| {
            PrimitivesError::InvalidInputError(format!("eth signature is not valid hex: {e}"))
        })?;
        PrimitiveSignature::try_from(bytes.as_slice())
            .map_err(|e| PrimitivesError::InvalidInputError(format!("malformed eth signature: {e}")))
    }
}
