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

//! Functions and types for encoding data as Code30 text.

use super::alphabet::forward;
use super::iter::InspectBaseIterator;
use super::Digit;

use core::iter::FusedIterator;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Used by the `encode_*_with` functions to configure the encoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeConfig {
    /// If nonzero, a CR LF line break is inserted once a line holds at least
    /// this many characters. Characters are emitted in pairs, so an odd width
    /// produces lines of `wrap_width + 1` characters. A line that ends
    /// exactly at the end of the input still gets its line break; a shorter
    /// final line doesn't. [default: 0]
    pub wrap_width: usize,
}

impl EncodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            wrap_width: 0,
        }
    }

    /// Returns the default configuration with [`Self::wrap_width`] set.
    pub const fn with_wrap_width(wrap_width: usize) -> Self {
        Self {
            wrap_width,
        }
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of characters the encoder produces for `byte_len` bytes, line
/// breaks included.
///
/// Returns `None` if the result does not fit in a `usize`.
pub fn encoded_len(byte_len: usize, config: EncodeConfig) -> Option<usize> {
    let payload = byte_len.checked_mul(2)?;
    let breaks = match config.wrap_width {
        0 => 0,
        // Lines fill up a pair at a time. A width of `usize::MAX` never
        // completes a line.
        width => width.checked_add(1).map_or(0, |line| payload / (line & !1)),
    };
    payload.checked_add(breaks * 2)
}

enum CharEncoderState {
    Remainder,
    Quotient(Digit),
    Cr,
    Lf,
}

/// Iterator returned by [`encode_to_chars`].
pub struct CharEncoder<I> {
    iter: I,
    state: CharEncoderState,
    wrap_width: usize,
    line_len: usize,
    consumed: u64,
}

impl<I> CharEncoder<I> {
    pub(crate) fn new(iter: I, config: EncodeConfig) -> Self {
        Self {
            iter,
            state: CharEncoderState::Remainder,
            wrap_width: config.wrap_width,
            line_len: 0,
            consumed: 0,
        }
    }

    /// Number of input bytes read so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    // (minimum, maximum) number of chars still owed for the current byte.
    fn pending_len(&self) -> (usize, usize) {
        match self.state {
            CharEncoderState::Remainder => (0, 0),
            CharEncoderState::Quotient(_) if self.wrap_width == 0 => (1, 1),
            CharEncoderState::Quotient(_) => {
                if self.line_len + 1 >= self.wrap_width {
                    (3, 3)
                } else {
                    (1, 1)
                }
            }
            CharEncoderState::Cr => (2, 2),
            CharEncoderState::Lf => (1, 1),
        }
    }
}

impl<I> InspectBaseIterator for CharEncoder<I> {
    type Iter = I;

    fn base_iterator(&self) -> &Self::Iter {
        &self.iter
    }
}

impl<I> Iterator for CharEncoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            CharEncoderState::Remainder => {
                let (rem, quo) = Digit::split(self.iter.next()?);
                self.consumed += 1;
                self.line_len += 1;
                self.state = CharEncoderState::Quotient(quo);
                Some(forward(rem))
            }
            CharEncoderState::Quotient(quo) => {
                self.line_len += 1;
                self.state = CharEncoderState::Remainder;
                if self.wrap_width > 0 && self.line_len >= self.wrap_width {
                    self.line_len = 0;
                    self.state = CharEncoderState::Cr;
                }
                Some(forward(quo))
            }
            CharEncoderState::Cr => {
                self.state = CharEncoderState::Lf;
                Some('\r')
            }
            CharEncoderState::Lf => {
                self.state = CharEncoderState::Remainder;
                Some('\n')
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        let (pending_min, pending_max) = self.pending_len();
        // Each byte adds two chars, plus at most one line break.
        let per_byte = if self.wrap_width == 0 {
            2
        } else {
            4
        };
        (
            lower.saturating_mul(2).saturating_add(pending_min),
            upper
                .and_then(|n| n.checked_mul(per_byte))
                .and_then(|n| n.checked_add(pending_max)),
        )
    }
}

impl<I: FusedIterator<Item = u8>> FusedIterator for CharEncoder<I> {}

/// Iterator returned by [`encode_to_bytes`].
pub struct Utf8Encoder<I> {
    chars: CharEncoder<I>,
    buf: [u8; 4],
    pos: u8,
    len: u8,
}

impl<I> Utf8Encoder<I> {
    pub(crate) fn new(iter: I, config: EncodeConfig) -> Self {
        Self {
            chars: CharEncoder::new(iter, config),
            buf: [0; 4],
            pos: 0,
            len: 0,
        }
    }

    /// Number of input bytes read so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.chars.bytes_consumed()
    }
}

impl<I> InspectBaseIterator for Utf8Encoder<I> {
    type Iter = I;

    fn base_iterator(&self) -> &Self::Iter {
        self.chars.base_iterator()
    }
}

impl<I> Iterator for Utf8Encoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.len {
            let c = self.chars.next()?;
            self.len = c.encode_utf8(&mut self.buf).len() as u8;
            self.pos = 0;
        }
        let b = self.buf[usize::from(self.pos)];
        self.pos += 1;
        Some(b)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.chars.size_hint();
        let buffered = usize::from(self.len - self.pos);
        (
            lower.saturating_add(buffered),
            // 'ẞ' takes three bytes in UTF-8.
            upper
                .and_then(|n| n.checked_mul(3))
                .and_then(|n| n.checked_add(buffered)),
        )
    }
}

impl<I: FusedIterator<Item = u8>> FusedIterator for Utf8Encoder<I> {}

/// Encodes bytes as a sequence of Code30 chars.
pub fn encode_to_chars<I>(bytes: I) -> CharEncoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    encode_to_chars_with(bytes, EncodeConfig::new())
}

/// Encodes bytes as UTF-8 Code30 data.
pub fn encode_to_bytes<I>(bytes: I) -> Utf8Encoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    encode_to_bytes_with(bytes, EncodeConfig::new())
}

/// Encodes bytes as a Code30 [`String`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string<I>(bytes: I) -> String
where
    I: IntoIterator<Item = u8>,
{
    encode_to_string_with(bytes, EncodeConfig::new())
}

/// Encodes bytes as a sequence of Code30 chars with the given config.
///
/// This function is like [`encode_to_chars`], but takes a configuration
/// object.
pub fn encode_to_chars_with<I>(
    bytes: I,
    config: EncodeConfig,
) -> CharEncoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    CharEncoder::new(bytes.into_iter(), config)
}

/// Encodes bytes as UTF-8 Code30 data with the given config.
///
/// This function is like [`encode_to_bytes`], but takes a configuration
/// object.
pub fn encode_to_bytes_with<I>(
    bytes: I,
    config: EncodeConfig,
) -> Utf8Encoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    Utf8Encoder::new(bytes.into_iter(), config)
}

/// Encodes bytes as a Code30 [`String`] with the given config.
///
/// This function is like [`encode_to_string`], but takes a configuration
/// object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string_with<I>(bytes: I, config: EncodeConfig) -> String
where
    I: IntoIterator<Item = u8>,
{
    encode_to_chars_with(bytes, config).collect()
}
