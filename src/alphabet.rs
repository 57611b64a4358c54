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

//! The 30-letter alphabet and its inverse.

use super::{Digit, RADIX};

/// The symbols, in digit order.
pub const ALPHABET: [char; RADIX as usize] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ü', 'ẞ',
];

const NO_DIGIT: u8 = u8::MAX;

// Inverse of the ASCII part of `ALPHABET`; `NO_DIGIT` elsewhere.
const ASCII_INVERSE: [u8; 128] = {
    let mut table = [NO_DIGIT; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i] as u32;
        if c < 128 {
            table[c as usize] = i as u8;
        }
        i += 1;
    }
    table
};

// Index of the first non-ASCII symbol.
const NON_ASCII_START: usize = {
    let mut i = 0;
    while i < ALPHABET.len() && (ALPHABET[i] as u32) < 128 {
        i += 1;
    }
    i
};

/// Returns the symbol for `digit`.
pub fn forward(digit: Digit) -> char {
    ALPHABET[usize::from(digit)]
}

/// Returns the digit `c` stands for, or `None` if `c` is not in the
/// alphabet.
pub fn inverse(c: char) -> Option<Digit> {
    let n = if c.is_ascii() {
        ASCII_INVERSE[c as usize]
    } else {
        ALPHABET[NON_ASCII_START..]
            .iter()
            .position(|&a| a == c)
            .map_or(NO_DIGIT, |i| (NON_ASCII_START + i) as u8)
    };
    Digit::new(n)
}

/// Whether `c` is a line-break character the decoder ignores.
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\r' | '\n')
}
