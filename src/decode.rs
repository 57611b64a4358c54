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

//! Functions and types for decoding Code30 data.

use super::alphabet::{inverse, is_line_break};
use super::iter::{ErrAdapter, InspectBaseIterator};
use super::Digit;

use core::fmt::{self, Debug, Display, Formatter};
use core::iter::FusedIterator;
use core::str::Chars;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An error encountered while decoding a [`str`] or sequence of [`char`]s.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Encountered a character that is neither in the alphabet nor a line
    /// break.
    #[error("invalid character in input: {0:?}")]
    InvalidChar(char),
    /// The input ended between the two characters of a pair.
    #[error("unexpected end of input: odd length")]
    OddLength,
    /// A pair decoded to a value that doesn't fit in a byte, and
    /// [`DecodeConfig::truncate_overflow`] was false.
    #[error(
        "pair {remainder}{quotient} decodes to {value}, which exceeds 255"
    )]
    Overflow {
        /// The first character of the pair.
        remainder: char,
        /// The second character of the pair.
        quotient: char,
        /// The value the pair decodes to.
        value: u16,
    },
}

use DecodeError as Error;

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Error information for [`DecodeBytesError::InvalidUtf8`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InvalidUtf8 {
    bytes: [u8; 4],
    len: u8,
}

impl InvalidUtf8 {
    /// The bytes that were invalid UTF-8.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

impl Debug for InvalidUtf8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InvalidUtf8").field(&self.bytes()).finish()
    }
}

impl Display for InvalidUtf8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid UTF-8: {:?}", self.bytes())
    }
}

impl core::error::Error for InvalidUtf8 {}

/// An error encountered while decoding a sequence of bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeBytesError {
    /// The provided bytes were not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(#[from] InvalidUtf8),
    /// A different decoding error occurred.
    #[error(transparent)]
    DecodeError(#[from] DecodeError),
}

/// Alias of <code>[Result]\<T, [DecodeBytesError]></code>.
pub type DecodeBytesResult<T> = Result<T, DecodeBytesError>;

/// Used by the `decode_*_with` functions to configure the decoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeConfig {
    /// A pair whose second character is past the ninth letter can decode to
    /// a value above 255, which the encoder never produces. If true, such a
    /// value is truncated to its low 8 bits; otherwise it causes
    /// [`DecodeError::Overflow`]. [default: false]
    pub truncate_overflow: bool,
}

impl DecodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            truncate_overflow: false,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`decode_chars`].
pub struct CharDecoder<I> {
    iter: I,
    config: DecodeConfig,
    done: bool,
    produced: u64,
}

impl<I> CharDecoder<I> {
    pub(crate) fn new(iter: I, config: DecodeConfig) -> Self {
        Self {
            iter,
            config,
            done: false,
            produced: 0,
        }
    }

    /// Number of bytes decoded so far.
    pub fn bytes_produced(&self) -> u64 {
        self.produced
    }
}

impl<I> CharDecoder<I>
where
    I: Iterator<Item = char>,
{
    fn next_data_char(&mut self) -> Option<char> {
        self.iter.find(|&c| !is_line_break(c))
    }

    fn decode_pair(&self, rem: char, quo: char) -> DecodeResult<u8> {
        let r = inverse(rem).ok_or(Error::InvalidChar(rem))?;
        let q = inverse(quo).ok_or(Error::InvalidChar(quo))?;
        let value = Digit::combine(r, q);
        match u8::try_from(value) {
            Ok(b) => Ok(b),
            Err(_) if self.config.truncate_overflow => Ok(value as u8),
            Err(_) => Err(Error::Overflow {
                remainder: rem,
                quotient: quo,
                value,
            }),
        }
    }
}

impl<I> InspectBaseIterator for CharDecoder<I> {
    type Iter = I;

    fn base_iterator(&self) -> &Self::Iter {
        &self.iter
    }
}

impl<I> Iterator for CharDecoder<I>
where
    I: Iterator<Item = char>,
{
    type Item = DecodeResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let rem = match self.next_data_char() {
            Some(c) => c,
            None => {
                self.done = true;
                return None;
            }
        };
        let result = self
            .next_data_char()
            .ok_or(Error::OddLength)
            .and_then(|quo| self.decode_pair(rem, quo));
        match result {
            Ok(_) => self.produced += 1,
            Err(_) => self.done = true,
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // Every char could be a line break.
        let (_, upper) = self.iter.size_hint();
        (0, upper.map(|n| (n + 1) / 2))
    }
}

// `done` is set once the base iterator returns `None`, so `CharDecoder` is
// fused even if `I` isn't.
impl<I: Iterator<Item = char>> FusedIterator for CharDecoder<I> {}

struct Utf8ToChars<I>(I);

impl<I> Utf8ToChars<I> {
    pub fn new(iter: I) -> Self {
        Self(iter)
    }
}

impl<I> InspectBaseIterator for Utf8ToChars<I> {
    type Iter = I;

    fn base_iterator(&self) -> &Self::Iter {
        &self.0
    }
}

impl<I> Iterator for Utf8ToChars<I>
where
    I: Iterator<Item = u8>,
{
    type Item = Result<char, InvalidUtf8>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut bytes = [self.0.next()?, 0, 0, 0];
        let mut len = 1;
        loop {
            match core::str::from_utf8(&bytes[..len]) {
                Ok(s) => {
                    if let Some(c) = s.chars().next() {
                        break Some(Ok(c));
                    }
                }
                Err(e) => {
                    if e.error_len().is_none() && len < bytes.len() {
                        if let Some(b) = self.0.next() {
                            bytes[len] = b;
                            len += 1;
                            continue;
                        }
                    }
                }
            }
            break Some(Err(InvalidUtf8 {
                bytes,
                len: len as u8,
            }));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.0.size_hint();
        ((lower + 3) / 4, upper)
    }
}

impl<I: FusedIterator<Item = u8>> FusedIterator for Utf8ToChars<I> {}

/// Iterator returned by [`decode_bytes`].
pub struct BytesDecoder<I>(
    CharDecoder<ErrAdapter<Utf8ToChars<I>, InvalidUtf8>>,
);

impl<I> BytesDecoder<I> {
    pub(crate) fn new(iter: I, config: DecodeConfig) -> Self {
        Self(CharDecoder::new(
            ErrAdapter::new(Utf8ToChars::new(iter)),
            config,
        ))
    }

    /// Number of bytes decoded so far.
    pub fn bytes_produced(&self) -> u64 {
        self.0.bytes_produced()
    }
}

impl<I> InspectBaseIterator for BytesDecoder<I> {
    type Iter = I;

    fn base_iterator(&self) -> &Self::Iter {
        self.0.base_iterator().base_iterator()
    }
}

impl<I> Iterator for BytesDecoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = DecodeBytesResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.0.next();
        if !matches!(item, Some(Ok(_))) {
            // Invalid UTF-8 ends the char stream early, which the char
            // decoder may have reported as an odd length.
            if let Some(e) = self.0.base_iterator().take_err() {
                return Some(Err(DecodeBytesError::InvalidUtf8(e)));
            }
        }
        Some(item?.map_err(DecodeBytesError::DecodeError))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.base_iterator().size_hint();
        (0, upper.map(|n| (n + 1) / 2))
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for BytesDecoder<I> {}

/// Iterator returned by [`decode_str`].
pub struct StrDecoder<'a>(CharDecoder<Chars<'a>>);

impl<'a> StrDecoder<'a> {
    pub(crate) fn new(s: &'a str, config: DecodeConfig) -> Self {
        Self(CharDecoder::new(s.chars(), config))
    }
}

impl<'a> Iterator for StrDecoder<'a> {
    type Item = DecodeResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Each char takes at least one byte of the `str`.
        let len = self.0.base_iterator().as_str().len();
        if self.0.done {
            (0, Some(0))
        } else {
            (0, Some((len + 1) / 2))
        }
    }
}

impl<'a> FusedIterator for StrDecoder<'a> {}

/// Decodes a sequence of Code30 chars.
pub fn decode_chars<I>(chars: I) -> CharDecoder<I::IntoIter>
where
    I: IntoIterator<Item = char>,
{
    decode_chars_with(chars, DecodeConfig::new())
}

/// Decodes UTF-8 Code30 data.
pub fn decode_bytes<I>(bytes: I) -> BytesDecoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    decode_bytes_with(bytes, DecodeConfig::new())
}

/// Decodes a Code30 `str`.
pub fn decode_str(s: &str) -> StrDecoder<'_> {
    decode_str_with(s, DecodeConfig::new())
}

/// Decodes a sequence of Code30 chars with the given config.
///
/// This function is like [`decode_chars`], but takes a configuration object.
pub fn decode_chars_with<I>(
    chars: I,
    config: DecodeConfig,
) -> CharDecoder<I::IntoIter>
where
    I: IntoIterator<Item = char>,
{
    CharDecoder::new(chars.into_iter(), config)
}

/// Decodes UTF-8 Code30 data with the given config.
///
/// This function is like [`decode_bytes`], but takes a configuration object.
pub fn decode_bytes_with<I>(
    bytes: I,
    config: DecodeConfig,
) -> BytesDecoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    BytesDecoder::new(bytes.into_iter(), config)
}

/// Decodes a Code30 `str` with the given config.
///
/// This function is like [`decode_str`], but takes a configuration object.
pub fn decode_str_with(s: &str, config: DecodeConfig) -> StrDecoder<'_> {
    StrDecoder::new(s, config)
}

/// Takes a decoder and stores the contents in a [`Vec`].
///
/// This is equivalent to calling [`decoder.collect()`](Iterator::collect).
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec<D, E>(decoder: D) -> Result<Vec<u8>, E>
where
    D: Iterator<Item = Result<u8, E>>,
{
    decoder.collect()
}
