//! # Amount Serialization
//!
//! `Amount` is `u128`. Internally tagged enums buffer their fields before
//! dispatching on the tag, and that buffer has no room for 128-bit integers,
//! so every tagged type carries its amounts through this module:
//!
//! - written as a decimal string (`"1500"`), lossless for the full range
//! - read from a decimal string or from any non-negative integer
//!
//! ```ignore
//! #[serde(with = "shared_types::amount_serde")]
//! amount: Amount,
//!
//! #[serde(with = "shared_types::amount_serde::vec")]
//! amounts: Vec<Amount>,
//! ```

use crate::entities::Amount;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

pub fn serialize<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(amount)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        Ok(Amount::from(value))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Amount, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
        Amount::try_from(value).map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
        value
            .trim()
            .parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}

/// The same encoding for `Vec<Amount>`.
pub mod vec {
    use crate::entities::Amount;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    struct Wire(#[serde(deserialize_with = "super::deserialize")] Amount);

    pub fn serialize<S>(amounts: &[Amount], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(amounts.iter().map(|a| a.to_string()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Amount>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = Vec::<Wire>::deserialize(deserializer)?;
        Ok(wire.into_iter().map(|w| w.0).collect())
    }
}
