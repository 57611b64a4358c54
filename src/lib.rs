/*
 * Copyright (C) 2024 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Code30.
 *
 * Code30 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Code30 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Code30. If not, see <https://www.gnu.org/licenses/>.
 */

//! Encodes arbitrary bytes as a stream of 30 German uppercase letters
//! (`A`–`Z`, `Ä`, `Ö`, `Ü`, `ẞ`), two letters per byte, and decodes them
//! back.
//!
//! ```
//! let encoded = code30::encode_to_string(*b"hi");
//! assert_eq!(encoded, "ODPD");
//! let decoded = code30::decode::decode_to_vec(code30::decode_str(&encoded));
//! assert_eq!(decoded.unwrap(), b"hi");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

mod digit;

pub mod alphabet;
pub mod decode;
pub mod encode;
mod iter;

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
pub mod io;

#[cfg(feature = "alloc")]
extern crate alloc;

pub use digit::Digit;

/// Number of symbols in the alphabet, and the radix each byte is split by.
pub const RADIX: u8 = 30;

/// Largest quotient a byte can produce (`255 / 30`).
pub const MAX_QUOTIENT: u8 = u8::MAX / RADIX;

pub use decode::decode_bytes;
pub use decode::decode_chars;
pub use decode::decode_str;
pub use decode::{DecodeConfig, DecodeError};

pub use encode::encode_to_bytes;
pub use encode::encode_to_chars;
#[cfg(feature = "alloc")]
pub use encode::encode_to_string;
pub use encode::EncodeConfig;
