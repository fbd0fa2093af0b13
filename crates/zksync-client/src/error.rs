use thiserror::Error;
use zksync_primitives::PrimitivesError;
use zksync_signer::SignerError;

use crate::config::ConfigError;
use crate::transport::RpcError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Remote procedure error: {0}")]
    RemoteProcedureError(RpcError),
    #[error("Invalid input: {0}")]
    InvalidInputError(String),
    #[error("Missing signature: {0}")]
    MissingSignatureError(String),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Primitives error: {0}")]
    PrimitivesError(#[from] PrimitivesError),
    #[error("Signer error: {0}")]
    SignerError(#[from] SignerError),
}

impl ClientError {
    /// The network call itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }

    /// The server answered with an error payload.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteProcedureError(_))
    }

    pub fn is_unknown_token(&self) -> bool {
        matches!(
            self,
            Self::PrimitivesError(PrimitivesError::UnknownTokenError(_))
                | Self::SignerError(SignerError::PrimitivesError(
                    PrimitivesError::UnknownTokenError(_)
                ))
        )
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputError(_)
                | Self::PrimitivesError(PrimitivesError::InvalidInputError(_))
                | Self::SignerError(SignerError::InvalidInputError(_))
                | Self::SignerError(SignerError::PrimitivesError(
                    PrimitivesError::InvalidInputError(_)
                ))
        )
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::SignerError(SignerError::UnsupportedOperationError(_)))
    }

    /// Remote error payload, if the server reported one.
    pub fn rpc_error(&self) -> Option<&RpcError> {
        match self {
            Self::RemoteProcedureError(error) => Some(error),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, ClientError>;
