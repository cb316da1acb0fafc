//! [`serde`] integration for [`Digits`].
//!
//! Identifiers are serialized as strings by default; JavaScript numbers are IEEE-754
//! doubles and silently lose precision above 2^53, which every SteamID64 is.
//!
//! Deserialization accepts both unsigned integers and digit strings.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{self, Serialize, Serializer};

use crate::Digits;

mod visitors;
pub use visitors::{VisitDigits, VisitOptionalDigits};

impl Digits {
    /// Serializes as a JSON number instead of a string.
    ///
    /// Fails if the value does not fit into a `u64`.
    pub fn serialize_u64<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_u64() {
            Some(value) => value.serialize(serializer),
            None => Err(ser::Error::custom(format_args!("`{self}` does not fit into 64 bits"))),
        }
    }

    /// Deserializes an optional identifier.
    ///
    /// `null`, a missing value, and the empty string all become `None`.
    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(VisitOptionalDigits::default())
    }
}

impl Serialize for Digits {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Digits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(VisitDigits::default())
    }
}
