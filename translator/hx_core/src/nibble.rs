//! Hex digit decoding.
//!
//! A single 256-entry table maps each byte to its 4-bit value, or to a
//! marker for "not a hex digit". Table lookup replaces the multi-range
//! `matches!` with one indexed read.

/// Marker for bytes that are not hex digits.
const NOT_HEX: u8 = 0xFF;

/// 256-byte lookup table: `0`-`9`, `A`-`F`, `a`-`f` map to 0-15,
/// everything else to [`NOT_HEX`].
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static NIBBLE_TABLE: [u8; 256] = {
    let mut table = [NOT_HEX; 256];
    let mut i = 0u16;
    while i < 256 {
        let b = i as u8;
        table[i as usize] = match b {
            b'0'..=b'9' => b - b'0',
            b'A'..=b'F' => b - b'A' + 10,
            b'a'..=b'f' => b - b'a' + 10,
            _ => NOT_HEX,
        };
        i += 1;
    }
    table
};

/// Decode one byte as a hex digit.
///
/// Returns the value 0-15 for `0`-`9`, `A`-`F`, `a`-`f` (case-insensitive),
/// `None` otherwise. Pure and total.
#[inline]
pub fn decode(byte: u8) -> Option<u8> {
    let value = NIBBLE_TABLE[byte as usize];
    (value != NOT_HEX).then_some(value)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;

    #[test]
    fn decimal_digits() {
        for (i, b) in (b'0'..=b'9').enumerate() {
            assert_eq!(decode(b), Some(u8::try_from(i).unwrap()));
        }
    }

    #[test]
    fn uppercase_and_lowercase_agree() {
        for (upper, lower) in (b'A'..=b'F').zip(b'a'..=b'f') {
            assert_eq!(decode(upper), decode(lower));
            assert_eq!(decode(upper), Some(upper - b'A' + 10));
        }
    }

    #[test]
    fn non_hex_bytes_decode_to_none() {
        for byte in 0u16..=255 {
            let byte = u8::try_from(byte).unwrap();
            let expected = byte.is_ascii_hexdigit();
            assert_eq!(
                decode(byte).is_some(),
                expected,
                "byte {byte:#04x} misclassified"
            );
        }
    }

    #[test]
    fn boundary_neighbors_rejected() {
        // Bytes adjacent to the accepted ranges.
        for byte in [b'0' - 1, b'9' + 1, b'A' - 1, b'F' + 1, b'a' - 1, b'f' + 1] {
            assert_eq!(decode(byte), None, "byte {byte:#04x} wrongly accepted");
        }
    }
}
