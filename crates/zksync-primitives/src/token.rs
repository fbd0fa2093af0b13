//! Token metadata and the registry snapshot returned by the `tokens` rpc method.

use std::collections::HashMap;

use alloy::primitives::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{PrimitivesError, Result};

/// A fungible asset recognized by the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: u32,
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(id: u32, address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            id,
            address: address.into().to_lowercase(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Ether is registered as token 0 at the zero address.
    pub fn is_eth(&self) -> bool {
        self.id == 0 && self.address == format!("{:#x}", Address::ZERO)
    }

    /// Render an integer amount of minor units as a decimal number of whole tokens.
    ///
    /// Trailing fractional zeros are trimmed but at least one fractional digit
    /// is kept, so `10^18` wei renders as `1.0`.
    pub fn format_amount(&self, amount: &BigUint) -> String {
        let digits = amount.to_str_radix(10);
        let decimals = self.decimals as usize;
        if decimals == 0 {
            return format!("{digits}.0");
        }
        let padded = format!("{digits:0>width$}", width = decimals + 1);
        let (integer, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            format!("{integer}.0")
        } else {
            format!("{integer}.{fraction}")
        }
    }
}

/// Immutable snapshot of every token known to the network.
///
/// Resolution tries the symbol first and then the exact contract address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, Token>", into = "HashMap<String, Token>")]
pub struct Tokens {
    tokens: HashMap<String, Token>,
    by_address: HashMap<String, String>,
}

impl Tokens {
    /// Build a snapshot from a symbol-keyed map.
    ///
    /// Fails if a key differs from its token's symbol or if two tokens share an address.
    pub fn new(tokens: HashMap<String, Token>) -> Result<Self> {
        let mut normalized = HashMap::with_capacity(tokens.len());
        let mut by_address = HashMap::with_capacity(tokens.len());
        for (symbol, mut token) in tokens {
            if symbol != token.symbol {
                return Err(PrimitivesError::InvalidInputError(format!(
                    "token registered under {symbol:?} has symbol {:?}",
                    token.symbol
                )));
            }
            token.address = token.address.to_lowercase();
            if let Some(previous) = by_address.insert(token.address.clone(), symbol.clone()) {
                return Err(PrimitivesError::InvalidInputError(format!(
                    "tokens {previous} and {symbol} share address {}",
                    token.address
                )));
            }
            normalized.insert(symbol, token);
        }
        Ok(Self {
            tokens: normalized,
            by_address,
        })
    }

    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Result<Self> {
        Self::new(
            tokens
                .into_iter()
                .map(|token| (token.symbol.clone(), token))
                .collect(),
        )
    }

    pub fn token_by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.tokens.get(symbol)
    }

    /// Exact, case-sensitive match against the stored lowercase address.
    pub fn token_by_address(&self, address: &str) -> Option<&Token> {
        self.by_address
            .get(address)
            .and_then(|symbol| self.tokens.get(symbol))
    }

    pub fn token_by_id(&self, id: u32) -> Option<&Token> {
        self.tokens.values().find(|token| token.id == id)
    }

    /// Resolve a symbol or a contract address to its token.
    pub fn resolve(&self, identifier: &str) -> Result<&Token> {
        self.token_by_symbol(identifier)
            .or_else(|| self.token_by_address(identifier))
            .ok_or_else(|| PrimitivesError::UnknownTokenError(identifier.to_string()))
    }

    pub fn resolve_id(&self, id: u32) -> Result<&Token> {
        self.token_by_id(id)
            .ok_or_else(|| PrimitivesError::UnknownTokenError(format!("token id {id}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TryFrom<HashMap<String, Token>> for Tokens {
    type Error = PrimitivesError;

    fn try_from(tokens: HashMap<String, Token>) -> Result<Self> {
        Self::new(tokens)
    }
}

impl From<Tokens> for HashMap<String, Token> {
    fn from(tokens: Tokens) -> Self {
        tokens.tokens
    }
}
