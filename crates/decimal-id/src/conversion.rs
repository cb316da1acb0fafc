//! Conversion between the narrow (account ID) and wide (SteamID64) identifier spaces.

use std::fmt;
use std::str::FromStr;

use crate::native::{self, NativeError};
use crate::{ArithmeticError, Digits, ParseDigitsError};

/// How the arithmetic behind a conversion is carried out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// 64-bit arithmetic, falling back to [`DigitString`] if the values are too large.
    ///
    /// [`DigitString`]: Strategy::DigitString
    #[default]
    Auto,

    /// 64-bit arithmetic only.
    Native,

    /// Schoolbook arithmetic on the digits.
    DigitString,
}

#[derive(Debug, Display, Error)]
#[display("unknown strategy `{input}` (expected `auto`, `native` or `digit-string`)")]
pub struct ParseStrategyError {
    #[error(ignore)]
    input: String,
}

/// Which way to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Account ID to SteamID64.
    ToWide,

    /// SteamID64 to account ID.
    ToNarrow,
}

#[derive(Debug, Display, Error, From, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[display("{_0}")]
    Malformed(ParseDigitsError),

    #[display("{_0}")]
    Arithmetic(ArithmeticError),

    #[display("identifier does not fit into 64 bits")]
    #[from(ignore)]
    OutOfRange,
}

impl From<NativeError> for ConversionError {
    fn from(error: NativeError) -> Self {
        match error {
            NativeError::OutOfRange => Self::OutOfRange,
            NativeError::Arithmetic(error) => Self::Arithmetic(error),
        }
    }
}

/// Converts an account ID into a SteamID64.
///
/// `None` and the empty string are treated as an absent identifier and yield `Ok(None)`.
///
/// The result is canonical: leading zeros in the input are not preserved.
pub fn to_wide_id(narrow_id: Option<&str>) -> Result<Option<Digits>, ConversionError> {
    Strategy::Auto.to_wide_id(narrow_id)
}

/// Converts a SteamID64 into an account ID.
///
/// `None` and the empty string are treated as an absent identifier and yield `Ok(None)`.
///
/// The result is canonical: leading zeros in the input are not preserved.
pub fn to_narrow_id(wide_id: Option<&str>) -> Result<Option<Digits>, ConversionError> {
    Strategy::Auto.to_narrow_id(wide_id)
}

impl Strategy {
    pub fn add(self, lhs: &Digits, rhs: &Digits) -> Result<Digits, ConversionError> {
        match self {
            Self::DigitString => Ok(lhs + rhs),
            Self::Native => Ok(native::add(lhs, rhs)?),
            Self::Auto => match native::add(lhs, rhs) {
                Ok(sum) => Ok(sum),
                Err(NativeError::OutOfRange) => {
                    tracing::debug!(%lhs, %rhs, "operands exceed 64 bits; adding digit strings");
                    Ok(lhs + rhs)
                }
                Err(error) => Err(error.into()),
            },
        }
    }

    pub fn subtract(
        self,
        minuend: &Digits,
        subtrahend: &Digits,
    ) -> Result<Digits, ConversionError> {
        match self {
            Self::DigitString => Ok(minuend.checked_sub(subtrahend)?),
            Self::Native => Ok(native::subtract(minuend, subtrahend)?),
            Self::Auto => match native::subtract(minuend, subtrahend) {
                Ok(difference) => Ok(difference),
                Err(NativeError::OutOfRange) => {
                    tracing::debug!(
                        %minuend,
                        %subtrahend,
                        "operands exceed 64 bits; subtracting digit strings",
                    );
                    Ok(minuend.checked_sub(subtrahend)?)
                }
                Err(error) => Err(error.into()),
            },
        }
    }

    /// Adds [`OFFSET`](crate::OFFSET) to `narrow_id`.
    pub fn widen(self, narrow_id: &Digits) -> Result<Digits, ConversionError> {
        self.add(narrow_id, &Digits::OFFSET)
    }

    /// Subtracts [`OFFSET`](crate::OFFSET) from `wide_id`.
    pub fn narrow(self, wide_id: &Digits) -> Result<Digits, ConversionError> {
        self.subtract(wide_id, &Digits::OFFSET)
    }

    #[tracing::instrument(level = "trace", ret, err(level = "debug"))]
    pub fn to_wide_id(self, narrow_id: Option<&str>) -> Result<Option<Digits>, ConversionError> {
        let Some(narrow_id) = present(narrow_id) else {
            return Ok(None);
        };

        self.widen(&narrow_id.parse::<Digits>()?).map(Some)
    }

    #[tracing::instrument(level = "trace", ret, err(level = "debug"))]
    pub fn to_narrow_id(self, wide_id: Option<&str>) -> Result<Option<Digits>, ConversionError> {
        let Some(wide_id) = present(wide_id) else {
            return Ok(None);
        };

        self.narrow(&wide_id.parse::<Digits>()?).map(Some)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match self {
            Self::Auto => "auto",
            Self::Native => "native",
            Self::DigitString => "digit-string",
        })
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "auto" => Ok(Self::Auto),
            "native" => Ok(Self::Native),
            "digit-string" => Ok(Self::DigitString),
            _ => Err(ParseStrategyError { input: value.to_owned() }),
        }
    }
}

impl Direction {
    pub fn apply(
        self,
        id: Option<&str>,
        strategy: Strategy,
    ) -> Result<Option<Digits>, ConversionError> {
        match self {
            Self::ToWide => strategy.to_wide_id(id),
            Self::ToNarrow => strategy.to_narrow_id(id),
        }
    }

    pub const fn inverse(self) -> Self {
        match self {
            Self::ToWide => Self::ToNarrow,
            Self::ToNarrow => Self::ToWide,
        }
    }
}

fn present(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    const STRATEGIES: [Strategy; 3] = [Strategy::Auto, Strategy::Native, Strategy::DigitString];

    fn digits(value: &str) -> Digits {
        value.parse().unwrap()
    }

    #[test]
    fn account_one() {
        assert_eq!(to_wide_id(Some("1")).unwrap().unwrap(), "76561197960265729");
        assert_eq!(to_narrow_id(Some("76561197960265729")).unwrap().unwrap(), "1");
    }

    #[test]
    fn alphakeks() {
        assert_eq!(to_wide_id(Some("322356345")).unwrap().unwrap(), "76561198282622073");
        assert_eq!(to_narrow_id(Some("76561198282622073")).unwrap().unwrap(), "322356345");
    }

    #[test]
    fn absent_ids() {
        for strategy in STRATEGIES {
            assert_eq!(strategy.to_wide_id(None), Ok(None));
            assert_eq!(strategy.to_narrow_id(None), Ok(None));
            assert_eq!(strategy.to_wide_id(Some("")), Ok(None));
            assert_eq!(strategy.to_narrow_id(Some("")), Ok(None));
        }
    }

    #[test]
    fn malformed_ids() {
        for strategy in STRATEGIES {
            for input in ["abc", "-1", "7656119796026572x", " 1"] {
                assert!(
                    matches!(
                        strategy.to_narrow_id(Some(input)),
                        Err(ConversionError::Malformed(_)),
                    ),
                    "{strategy}: `{input}` should be malformed",
                );
                assert!(
                    matches!(
                        strategy.to_wide_id(Some(input)),
                        Err(ConversionError::Malformed(_)),
                    ),
                    "{strategy}: `{input}` should be malformed",
                );
            }
        }
    }

    #[test]
    fn narrowing_below_offset_underflows() {
        for strategy in STRATEGIES {
            for input in ["0", "1", "76561197960265727"] {
                assert_eq!(
                    strategy.to_narrow_id(Some(input)),
                    Err(ConversionError::Arithmetic(ArithmeticError::Underflow {
                        minuend: digits(input),
                        subtrahend: Digits::OFFSET,
                    })),
                    "{strategy}: {input}",
                );
            }
        }
    }

    #[test]
    fn strategies_agree() {
        let corpus = [
            "0",
            "1",
            "007",
            "322356345",
            "4294967295",
            "76561197960265728",
            "18370182875749285887", // u64::MAX - OFFSET
        ];

        for input in corpus {
            let native = Strategy::Native.to_wide_id(Some(input)).unwrap();
            let fallback = Strategy::DigitString.to_wide_id(Some(input)).unwrap();
            assert_eq!(native, fallback, "to_wide_id({input})");

            let wide = native.unwrap();
            let native = Strategy::Native.to_narrow_id(Some(wide.as_str())).unwrap();
            let fallback = Strategy::DigitString.to_narrow_id(Some(wide.as_str())).unwrap();
            assert_eq!(native, fallback, "to_narrow_id({wide})");
        }
    }

    #[test]
    fn strategies_agree_on_random_ids() {
        let mut rng = StdRng::seed_from_u64(0x0110_0001);
        let max_narrow = u64::MAX - Digits::OFFSET.to_u64().unwrap();

        for _ in 0..2000 {
            let narrow = rng.gen_range(0..=max_narrow).to_string();
            let native = Strategy::Native.to_wide_id(Some(&narrow)).unwrap();
            let fallback = Strategy::DigitString.to_wide_id(Some(&narrow)).unwrap();

            assert_eq!(native, fallback, "to_wide_id({narrow})");
        }
    }

    #[test]
    fn round_trip() {
        let mut rng = StdRng::seed_from_u64(0x1197_6026);

        for _ in 0..2000 {
            let narrow = rng.gen::<u128>().to_string();
            let wide = to_wide_id(Some(&narrow)).unwrap().unwrap();

            assert_eq!(to_narrow_id(Some(wide.as_str())).unwrap().unwrap(), narrow.as_str());
        }

        let huge = "9".repeat(80);
        let wide = to_wide_id(Some(&huge)).unwrap().unwrap();
        assert_eq!(to_narrow_id(Some(wide.as_str())).unwrap().unwrap(), huge.as_str());

        let padded = digits("0000322356345");
        let wide = to_wide_id(Some(padded.as_str())).unwrap().unwrap();
        let narrow = to_narrow_id(Some(wide.as_str())).unwrap().unwrap();

        assert_eq!(wide, "76561198282622073");
        assert_eq!(narrow, "322356345");
        assert_eq!(narrow.cmp_value(&padded), std::cmp::Ordering::Equal);
        assert_eq!(narrow, padded.normalized());
    }

    #[test]
    fn auto_falls_back() {
        let max = u64::MAX.to_string();
        let expected = (u128::from(u64::MAX) + 76_561_197_960_265_728).to_string();

        assert_eq!(Strategy::Native.to_wide_id(Some(&max)), Err(ConversionError::OutOfRange));
        assert_eq!(Strategy::Auto.to_wide_id(Some(&max)).unwrap().unwrap(), expected.as_str());
        assert_eq!(
            Strategy::DigitString.to_wide_id(Some(&max)).unwrap().unwrap(),
            expected.as_str(),
        );
        assert_eq!(Strategy::Auto.to_narrow_id(Some(&expected)).unwrap().unwrap(), max.as_str());
    }

    #[test]
    fn direction() {
        let wide = Direction::ToWide.apply(Some("1"), Strategy::Auto).unwrap();

        assert_eq!(wide.unwrap(), "76561197960265729");
        assert_eq!(Direction::ToWide.inverse(), Direction::ToNarrow);
        assert_eq!(Direction::ToNarrow.apply(None, Strategy::Auto), Ok(None));
    }

    #[test]
    fn parse_strategy() {
        for strategy in STRATEGIES {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }

        assert!("fast".parse::<Strategy>().is_err());
    }
}
