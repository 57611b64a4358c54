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

use code30::alphabet::{forward, inverse, is_line_break, ALPHABET};
use code30::decode::{decode_str_with, decode_to_vec, DecodeBytesError};
use code30::encode::{encode_to_string_with, encoded_len};
use code30::{decode_bytes, decode_chars, decode_str, encode_to_bytes};
use code30::{encode_to_chars, encode_to_string};
use code30::{DecodeConfig, DecodeError, Digit, EncodeConfig};

fn digit(n: u8) -> Digit {
    Digit::new(n).unwrap()
}

fn pair(remainder: u8, quotient: u8) -> String {
    [forward(digit(remainder)), forward(digit(quotient))]
        .iter()
        .collect()
}

fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    decode_to_vec(decode_str(s))
}

#[test]
fn alphabet_is_german_uppercase() {
    let s: String = ALPHABET.iter().collect();
    assert_eq!(s, "ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÜẞ");
}

#[test]
fn concrete_vectors() {
    assert_eq!(encode_to_string([0]), "AA");
    assert_eq!(encode_to_string([255]), pair(15, 8));
    assert_eq!(encode_to_string([29]), pair(29, 0));
}

#[test]
fn wrap_placement() {
    let config = EncodeConfig::with_wrap_width(4);
    let encoded = encode_to_string_with([7, 8, 9], config);
    let lines: Vec<&str> = encoded.split("\r\n").collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].chars().count(), 4);
    assert_eq!(lines[1].chars().count(), 2);
    assert!(!encoded.ends_with("\r\n"));
}

#[test]
fn full_byte_range() {
    let input: Vec<u8> = (0..=u8::MAX).collect();
    let encoded = encode_to_string(input.iter().copied());
    assert_eq!(encoded.chars().count(), 512);
    assert_eq!(decode(&encoded), Ok(input));
}

#[test]
fn alphabet_closure() {
    let config = EncodeConfig::with_wrap_width(7);
    let encoded = encode_to_string_with(0..=u8::MAX, config);
    for c in encoded.chars().filter(|&c| !is_line_break(c)) {
        assert!(inverse(c).is_some(), "{:?} is not in the alphabet", c);
    }
}

#[test]
fn rejects_foreign_characters() {
    assert_eq!(decode("A1"), Err(DecodeError::InvalidChar('1')));
    assert_eq!(decode("AAÄ\tAA"), Err(DecodeError::InvalidChar('\t')));
    assert_eq!(decode("ß"), Err(DecodeError::OddLength));
    assert_eq!(decode("ßA"), Err(DecodeError::InvalidChar('ß')));
}

#[test]
fn rejects_odd_length() {
    assert_eq!(decode("A"), Err(DecodeError::OddLength));
    assert_eq!(decode("AAB\r\n\r\n"), Err(DecodeError::OddLength));
}

#[test]
fn overflowing_pairs() {
    // Quotient index 20 gives 600.
    assert!(matches!(decode("AU"), Err(DecodeError::Overflow { .. })));

    let mut config = DecodeConfig::new();
    config.truncate_overflow = true;
    let decoded = decode_to_vec(decode_str_with("AU", config));
    assert_eq!(decoded, Ok(vec![(600_u16 & 0xff) as u8]));
}

#[test]
fn chars_and_bytes_agree() {
    let input = "Grüße aus Köln".as_bytes();
    let chars: Vec<char> = encode_to_chars(input.iter().copied()).collect();
    let bytes: Vec<u8> = encode_to_bytes(input.iter().copied()).collect();
    assert_eq!(chars.iter().collect::<String>().into_bytes(), bytes);

    assert_eq!(decode_to_vec(decode_chars(chars)).unwrap(), input);
    assert_eq!(decode_to_vec(decode_bytes(bytes)).unwrap(), input);
}

#[test]
fn bytes_decoder_reports_bad_utf8() {
    let result = decode_to_vec(decode_bytes(vec![b'A', b'A', 0xc3]));
    assert!(matches!(result, Err(DecodeBytesError::InvalidUtf8(_))));
}

#[test]
fn encoded_len_with_wrapping() {
    let wrap = EncodeConfig::with_wrap_width;
    assert_eq!(encoded_len(3, wrap(4)), Some(8));
    assert_eq!(encoded_len(2, wrap(4)), Some(6));
    assert_eq!(encoded_len(3, EncodeConfig::new()), Some(6));
    assert_eq!(encoded_len(0, wrap(1)), Some(0));
    assert_eq!(encoded_len(3, wrap(usize::MAX)), Some(6));
}
