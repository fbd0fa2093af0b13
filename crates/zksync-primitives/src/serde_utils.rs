//! Serde helpers for the wire formats used by the zkSync JSON-RPC api.
//!
//! Amounts travel as decimal strings of integer minor units. Some older
//! endpoints answer with bare JSON numbers, so deserialization accepts both.

use std::collections::HashMap;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::{PrimitivesError, Result};

/// Parse a decimal integer string into a [`BigUint`].
pub fn parse_biguint(field: &str, value: &str) -> Result<BigUint> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PrimitivesError::InvalidInputError(format!(
            "{field} must be a non-negative decimal integer, got {value:?}"
        )));
    }
    BigUint::from_str(value).map_err(|e| {
        PrimitivesError::InvalidInputError(format!("{field} is not a valid integer: {e}"))
    })
}

fn biguint_from_value<E: serde::de::Error>(value: Value) -> core::result::Result<BigUint, E> {
    match value {
        Value::String(s) => parse_biguint("amount", &s).map_err(E::custom),
        Value::Number(n) => parse_biguint("amount", &n.to_string()).map_err(E::custom),
        other => Err(E::custom(format!(
            "expected decimal string or integer, got {other}"
        ))),
    }
}

/// `#[serde(with = "biguint_str")]` for a [`BigUint`] encoded as a decimal string.
pub mod biguint_str {
    use super::*;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<BigUint, D::Error> {
        biguint_from_value(Value::deserialize(deserializer)?)
    }
}

/// `#[serde(with = "biguint_pair")]` for swap ratios and amounts.
pub mod biguint_pair {
    use super::*;
    use serde::ser::SerializeTuple;

    pub fn serialize<S: Serializer>(
        value: &[BigUint; 2],
        serializer: S,
    ) -> core::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&value[0].to_str_radix(10))?;
        tuple.serialize_element(&value[1].to_str_radix(10))?;
        tuple.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<[BigUint; 2], D::Error> {
        let [a, b] = <[Value; 2]>::deserialize(deserializer)?;
        Ok([biguint_from_value(a)?, biguint_from_value(b)?])
    }
}

/// `#[serde(with = "biguint_str_map")]` for balance maps keyed by token symbol.
pub mod biguint_str_map {
    use super::*;
    use serde::ser::SerializeMap;

    pub fn serialize<S: Serializer>(
        value: &HashMap<String, BigUint>,
        serializer: S,
    ) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(value.len()))?;
        for (symbol, amount) in value {
            map.serialize_entry(symbol, &amount.to_str_radix(10))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<HashMap<String, BigUint>, D::Error> {
        HashMap::<String, Value>::deserialize(deserializer)?
            .into_iter()
            .map(|(symbol, amount)| Ok((symbol, biguint_from_value(amount)?)))
            .collect()
    }
}

/// Deserialize a float that may be sent either as a JSON number or as a string.
pub fn f64_from_str_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<f64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("{n} is not representable as f64"))),
        Value::String(s) => s.parse::<f64>().map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected number, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Wrapper {
        #[serde(with = "biguint_str")]
        amount: BigUint,
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let from_str: Wrapper = serde_json::from_str(r#"{"amount":"123456789012345678901234567890"}"#).unwrap();
        assert_eq!(
            from_str.amount,
            BigUint::from_str("123456789012345678901234567890").unwrap()
        );

        let from_num: Wrapper = serde_json::from_str(r#"{"amount":42}"#).unwrap();
        assert_eq!(from_num.amount, BigUint::from(42u32));

        assert_eq!(serde_json::to_string(&from_num).unwrap(), r#"{"amount":"42"}"#);
    }

    #[test]
    fn rejects_negative_and_fractional_amounts() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":"-1"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":"1.5"}"#).is_err());
        assert!(parse_biguint("fee", "").is_err());
        assert!(parse_biguint("fee", " 1").is_err());
    }
}
