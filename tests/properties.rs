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

use code30::alphabet::{inverse, is_line_break};
use code30::decode::{decode_bytes_with, decode_to_vec};
use code30::encode::{encode_to_bytes_with, encode_to_string_with};
use code30::encode::encoded_len;
use code30::{decode_str, DecodeConfig, EncodeConfig, MAX_QUOTIENT};

use proptest::collection::vec;
use proptest::prelude::*;

fn line_breaks() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\r"), Just("\n"), Just("\r\n")]
}

proptest! {
    #[test]
    fn round_trip(input in vec(any::<u8>(), 0..512)) {
        let config = EncodeConfig::new();
        let encoded = encode_to_string_with(input.iter().copied(), config);
        prop_assert_eq!(decode_to_vec(decode_str(&encoded)), Ok(input));
    }

    #[test]
    fn round_trip_wrapped(
        input in vec(any::<u8>(), 0..512),
        width in 0_usize..100,
    ) {
        let config = EncodeConfig::with_wrap_width(width);
        let encoded: Vec<u8> =
            encode_to_bytes_with(input.iter().copied(), config).collect();
        let decoder = decode_bytes_with(encoded, DecodeConfig::new());
        prop_assert_eq!(decode_to_vec(decoder), Ok(input));
    }

    #[test]
    fn payload_is_twice_the_input(
        input in vec(any::<u8>(), 0..256),
        width in 0_usize..20,
    ) {
        let config = EncodeConfig::with_wrap_width(width);
        let encoded = encode_to_string_with(input.iter().copied(), config);
        let payload: Vec<char> =
            encoded.chars().filter(|&c| !is_line_break(c)).collect();
        prop_assert_eq!(payload.len(), input.len() * 2);
        prop_assert_eq!(
            Some(encoded.chars().count()),
            encoded_len(input.len(), config),
        );

        for pair in payload.chunks(2) {
            prop_assert!(inverse(pair[0]).is_some());
            let quo = inverse(pair[1]).map(u8::from);
            prop_assert!(matches!(quo, Some(q) if q <= MAX_QUOTIENT));
        }
    }

    #[test]
    fn line_breaks_are_ignored(
        input in vec(any::<u8>(), 1..64),
        breaks in vec((any::<prop::sample::Index>(), line_breaks()), 0..8),
    ) {
        let config = EncodeConfig::new();
        let mut encoded =
            encode_to_string_with(input.iter().copied(), config);
        for (index, line_break) in breaks {
            // 'Ä', 'Ö', 'Ü' and 'ẞ' are multi-byte; stay on char boundaries.
            let positions: Vec<usize> =
                encoded.char_indices().map(|(i, _)| i).collect();
            let at = positions[index.index(positions.len())];
            encoded.insert_str(at, line_break);
        }
        prop_assert_eq!(decode_to_vec(decode_str(&encoded)), Ok(input));
    }
}
