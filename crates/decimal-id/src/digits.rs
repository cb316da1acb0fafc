use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

/// A non-negative integer of unbounded magnitude, stored as ASCII decimal digits.
///
/// The most significant digit comes first. There is no sign, and leading zeros are
/// preserved exactly as they were parsed; use [`Digits::normalized()`] to strip them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref)]
#[display("{_0}")]
#[deref(forward)]
pub struct Digits(Cow<'static, str>);

#[derive(Debug, Display, Error, From, Clone, PartialEq, Eq)]
#[display("failed to parse digit string: {reason}")]
#[from(forward)]
pub struct ParseDigitsError {
    reason: ParseDigitsErrorReason,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseDigitsErrorReason {
    #[display("value is empty")]
    Empty,

    #[display("malformed numeral: unexpected `{found}` at position {position}")]
    InvalidDigit { position: usize, found: char },
}

impl ParseDigitsError {
    pub const fn reason(&self) -> ParseDigitsErrorReason {
        self.reason
    }
}

impl Digits {
    /// `76561197960265728`, the SteamID64 of account number 0.
    pub const OFFSET: Self = Self(Cow::Borrowed("76561197960265728"));

    pub const ZERO: Self = Self(Cow::Borrowed("0"));

    /// Validates `value` and wraps it.
    ///
    /// The empty string is rejected rather than interpreted as zero.
    pub fn new<S>(value: S) -> Result<Self, ParseDigitsError>
    where
        S: Into<Cow<'static, str>>,
    {
        let value = value.into();

        if value.is_empty() {
            return Err(ParseDigitsErrorReason::Empty.into());
        }

        if let Some((position, found)) = value.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(ParseDigitsErrorReason::InvalidDigit { position, found }.into());
        }

        Ok(Self(value))
    }

    /// Wraps a string the caller has already checked to be non-empty and all digits.
    pub(crate) fn from_string_unchecked(value: String) -> Self {
        debug_assert!(!value.is_empty(), "digit string must not be empty");
        debug_assert!(value.bytes().all(|b| b.is_ascii_digit()), "`{value}` is not a numeral");

        Self(Cow::Owned(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0.into_owned()
    }

    pub fn is_zero(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }

    /// The digits without any leading zeros. Zero itself is `"0"`.
    pub(crate) fn significant(&self) -> &str {
        match self.0.trim_start_matches('0') {
            "" => "0",
            digits => digits,
        }
    }

    /// Returns a copy without leading zeros.
    pub fn normalized(&self) -> Self {
        let significant = self.significant();

        if significant.len() == self.0.len() {
            self.clone()
        } else {
            Self(Cow::Owned(significant.to_owned()))
        }
    }

    /// Compares the numeric values of `self` and `other`.
    ///
    /// `"007"` and `"7"` compare equal here even though they are not `==`.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = (self.significant(), other.significant());

        lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs))
    }

    /// Returns the value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.parse::<u64>().ok()
    }
}

impl FromStr for Digits {
    type Err = ParseDigitsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value.to_owned())
    }
}

impl TryFrom<String> for Digits {
    type Error = ParseDigitsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<u64> for Digits {
    fn from(value: u64) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl From<u32> for Digits {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl From<Digits> for String {
    fn from(digits: Digits) -> Self {
        digits.into_string()
    }
}

impl AsRef<str> for Digits {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Digits {
    fn eq(&self, rhs: &str) -> bool {
        self.as_str() == rhs
    }
}

impl PartialEq<&str> for Digits {
    fn eq(&self, rhs: &&str) -> bool {
        self.as_str() == *rhs
    }
}
