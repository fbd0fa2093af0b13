use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitivesError {
    #[error("Invalid input: {0}")]
    InvalidInputError(String),
    #[error("Unknown token: {0}")]
    UnknownTokenError(String),
    #[error("Encoding error: {0}")]
    EncodingError(String),
}

pub type Result<T> = core::result::Result<T, PrimitivesError>;
