//! Schoolbook addition and subtraction on [`Digits`].
//!
//! These work for operands of any length and are what [`Strategy::DigitString`] and the
//! [`Strategy::Auto`] fallback use.
//!
//! [`Strategy::DigitString`]: crate::Strategy::DigitString
//! [`Strategy::Auto`]: crate::Strategy::Auto

use std::cmp::Ordering;
use std::ops::Add;

use itertools::Itertools;

use crate::{Digits, ParseDigitsError};

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[display("cannot subtract {subtrahend} from {minuend} without going negative")]
    Underflow { minuend: Digits, subtrahend: Digits },
}

/// Errors returned by [`add()`] and [`subtract()`].
#[derive(Debug, Display, Error, From, Clone, PartialEq, Eq)]
pub enum Error {
    #[display("{_0}")]
    Parse(ParseDigitsError),

    #[display("{_0}")]
    Arithmetic(ArithmeticError),
}

/// Adds two digit strings.
///
/// ```
/// assert_eq!(decimal_id::add("999", "1").unwrap(), "1000");
/// ```
pub fn add(lhs: &str, rhs: &str) -> Result<Digits, Error> {
    let lhs = lhs.parse::<Digits>()?;
    let rhs = rhs.parse::<Digits>()?;

    Ok(&lhs + &rhs)
}

/// Subtracts `subtrahend` from `minuend`.
///
/// Fails with [`ArithmeticError::Underflow`] if `subtrahend` is the larger of the two.
///
/// ```
/// assert_eq!(decimal_id::subtract("1000", "999").unwrap(), "1");
/// assert!(decimal_id::subtract("999", "1000").is_err());
/// ```
pub fn subtract(minuend: &str, subtrahend: &str) -> Result<Digits, Error> {
    let minuend = minuend.parse::<Digits>()?;
    let subtrahend = subtrahend.parse::<Digits>()?;

    Ok(minuend.checked_sub(&subtrahend)?)
}

impl Add for &Digits {
    type Output = Digits;

    fn add(self, rhs: Self) -> Self::Output {
        let mut reversed = Vec::with_capacity(self.len().max(rhs.len()) + 1);
        let mut carry = 0_u8;

        for (lhs, rhs) in columns(self, rhs) {
            let sum = lhs + rhs + carry;

            reversed.push(sum % 10);
            carry = sum / 10;
        }

        if carry != 0 {
            reversed.push(carry);
        }

        from_reversed(reversed)
    }
}

impl Digits {
    /// Subtracts `rhs` from `self`, failing if the result would be negative.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, ArithmeticError> {
        if self.cmp_value(rhs) == Ordering::Less {
            return Err(ArithmeticError::Underflow {
                minuend: self.clone(),
                subtrahend: rhs.clone(),
            });
        }

        let mut reversed = Vec::with_capacity(self.len());
        let mut borrow = 0_u8;

        for (lhs, rhs) in columns(self, rhs) {
            let rhs = rhs + borrow;

            if lhs >= rhs {
                reversed.push(lhs - rhs);
                borrow = 0;
            } else {
                reversed.push(lhs + 10 - rhs);
                borrow = 1;
            }
        }

        debug_assert_eq!(borrow, 0, "minuend was checked to be at least the subtrahend");

        Ok(from_reversed(reversed))
    }
}

/// Pairs up the digit values of `lhs` and `rhs`, least significant column first.
///
/// The shorter operand is padded with zeros.
fn columns<'a>(lhs: &'a Digits, rhs: &'a Digits) -> impl Iterator<Item = (u8, u8)> + 'a {
    lhs.bytes()
        .rev()
        .zip_longest(rhs.bytes().rev())
        .map(|column| column.or(b'0', b'0'))
        .map(|(lhs, rhs)| (lhs - b'0', rhs - b'0'))
}

/// Builds [`Digits`] out of digit values stored least significant first, dropping any
/// leading zeros.
fn from_reversed(mut reversed: Vec<u8>) -> Digits {
    while reversed.len() > 1 && reversed.last() == Some(&0) {
        reversed.pop();
    }

    if reversed.is_empty() {
        return Digits::ZERO;
    }

    let digits = reversed
        .iter()
        .rev()
        .map(|&digit| char::from(b'0' + digit))
        .collect::<String>();

    Digits::from_string_unchecked(digits)
}
