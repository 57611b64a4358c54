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

use super::RADIX;

/// A base-30 digit: an integer in `[0, 30)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` if `x` is not less than 30.
    pub const fn new(x: u8) -> Option<Self> {
        if x < RADIX {
            Some(Self(x))
        } else {
            None
        }
    }

    /// Splits a byte into its `(remainder, quotient)` digits.
    ///
    /// The quotient is never greater than
    /// [`MAX_QUOTIENT`](crate::MAX_QUOTIENT).
    pub const fn split(byte: u8) -> (Self, Self) {
        (Self(byte % RADIX), Self(byte / RADIX))
    }

    /// Computes `quotient * 30 + remainder`.
    ///
    /// The result can exceed 255 when the pair did not come from
    /// [`Digit::split`].
    pub const fn combine(remainder: Self, quotient: Self) -> u16 {
        quotient.0 as u16 * RADIX as u16 + remainder.0 as u16
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl From<Digit> for usize {
    fn from(d: Digit) -> usize {
        usize::from(d.0)
    }
}
