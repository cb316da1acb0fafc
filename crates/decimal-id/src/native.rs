//! Arithmetic on values that fit into a `u64`.
//!
//! Every SteamID64 fits, so this is the path taken for all well-formed identifiers.
//! Anything larger is reported as [`NativeError::OutOfRange`] so the caller can retry
//! with the digit-string implementation.

use crate::{ArithmeticError, Digits};

#[derive(Debug, Display, Error, From, Clone, PartialEq, Eq)]
pub enum NativeError {
    #[display("value does not fit into 64 bits")]
    #[from(ignore)]
    OutOfRange,

    #[display("{_0}")]
    Arithmetic(ArithmeticError),
}

pub fn add(lhs: &Digits, rhs: &Digits) -> Result<Digits, NativeError> {
    let (x, y) = operands(lhs, rhs)?;

    x.checked_add(y)
        .map(Digits::from)
        .ok_or(NativeError::OutOfRange)
}

pub fn subtract(minuend: &Digits, subtrahend: &Digits) -> Result<Digits, NativeError> {
    let (x, y) = operands(minuend, subtrahend)?;

    x.checked_sub(y).map(Digits::from).ok_or_else(|| {
        NativeError::Arithmetic(ArithmeticError::Underflow {
            minuend: minuend.clone(),
            subtrahend: subtrahend.clone(),
        })
    })
}

fn operands(lhs: &Digits, rhs: &Digits) -> Result<(u64, u64), NativeError> {
    match (lhs.to_u64(), rhs.to_u64()) {
        (Some(lhs), Some(rhs)) => Ok((lhs, rhs)),
        _ => Err(NativeError::OutOfRange),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn digits(value: &str) -> Digits {
        value.parse().unwrap()
    }

    #[test]
    fn in_range() {
        assert_eq!(add(&digits("999"), &digits("1")).unwrap(), "1000");
        assert_eq!(subtract(&digits("1000"), &digits("999")).unwrap(), "1");
        assert_eq!(subtract(&digits("0042"), &digits("42")).unwrap(), "0");
    }

    #[test]
    fn overflow_is_out_of_range() {
        let max = Digits::from(u64::MAX);

        assert_eq!(add(&max, &digits("1")), Err(NativeError::OutOfRange));
        assert_eq!(add(&max, &digits("0")).unwrap(), max);
    }

    #[test]
    fn wide_operands_are_out_of_range() {
        let wide = digits("18446744073709551616");

        assert_eq!(add(&wide, &digits("0")), Err(NativeError::OutOfRange));
        assert_eq!(subtract(&wide, &digits("1")), Err(NativeError::OutOfRange));
        assert_eq!(subtract(&digits("1"), &wide), Err(NativeError::OutOfRange));
    }

    #[test]
    fn underflow() {
        assert_eq!(
            subtract(&digits("1"), &Digits::OFFSET),
            Err(NativeError::Arithmetic(ArithmeticError::Underflow {
                minuend: digits("1"),
                subtrahend: Digits::OFFSET,
            })),
        );
    }
}
