use thiserror::Error;
use zksync_primitives::PrimitivesError;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Unsupported operation: {0}")]
    UnsupportedOperationError(String),
    #[error("Invalid input: {0}")]
    InvalidInputError(String),
    #[error("Signing failed: {0}")]
    SigningError(String),
    #[error("Primitives error: {0}")]
    PrimitivesError(#[from] PrimitivesError),
}

pub type Result<T> = core::result::Result<T, SignerError>;
