/* Copyright (C) 2024  AlphaKeks <alphakeks@dawn.sh>
 *
 * This library is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this repository.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Arbitrary-precision decimal identifiers.
//!
//! Steam hands out two related identifiers for every user: a small "account ID" (the
//! number you see in `[U:1:XXXXXXXXX]`) and a 64-bit "SteamID64" that is the account ID
//! plus [`OFFSET`]. Both are commonly passed around as strings of decimal digits, because
//! JavaScript cannot represent the latter as a number without losing precision.
//!
//! This crate converts between the two spaces. It uses native 64-bit arithmetic when the
//! values fit and falls back to schoolbook arithmetic on digit strings when they don't.
//!
//! ```
//! use decimal_id::{to_narrow_id, to_wide_id};
//!
//! let wide = to_wide_id(Some("1")).unwrap().unwrap();
//! assert_eq!(wide.as_str(), "76561197960265729");
//!
//! let narrow = to_narrow_id(Some(wide.as_str())).unwrap().unwrap();
//! assert_eq!(narrow.as_str(), "1");
//!
//! assert_eq!(to_wide_id(None).unwrap(), None);
//! ```

#[macro_use]
extern crate derive_more;

mod digits;
pub use digits::{Digits, ParseDigitsError, ParseDigitsErrorReason};

mod arithmetic;
pub use arithmetic::{add, subtract, ArithmeticError, Error};

pub mod native;
pub use native::NativeError;

mod conversion;
pub use conversion::{to_narrow_id, to_wide_id, ConversionError, Direction, Strategy};

#[cfg(feature = "serde")]
pub mod serde;

#[cfg(feature = "serde")]
pub mod profiles;
#[cfg(feature = "serde")]
pub use profiles::{attach_account_ids, convert_all, BatchReport, PlayerSummaries, Profile};

/// The distance between the narrow (account ID) and wide (SteamID64) identifier spaces.
pub const OFFSET: Digits = Digits::OFFSET;
