use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::translate;
use crate::error::{ParseError, ParseErrorKind, TranslateError};

/// Helper: translate a source string, expecting success.
fn decode(source: &str) -> Vec<u8> {
    let mut out = Vec::new();
    match translate(source.as_bytes(), &mut out, "test.hex") {
        Ok(()) => out,
        Err(e) => panic!("unexpected failure on {source:?}: {e}"),
    }
}

/// Helper: translate a source string, expecting a parse error. Returns the
/// error together with whatever was written before the failure.
fn decode_err(source: &str) -> (ParseError, Vec<u8>) {
    let mut out = Vec::new();
    match translate(source.as_bytes(), &mut out, "test.hex") {
        Err(TranslateError::Parse(e)) => (e, out),
        Ok(()) => panic!("expected parse error on {source:?}"),
        Err(other) => panic!("expected parse error on {source:?}, got {other}"),
    }
}

// === Hex-byte tokens ===

#[test]
fn separated_pairs_decode_in_order() {
    assert_eq!(decode("00 01 ff\n"), vec![0x00, 0x01, 0xFF]);
}

#[test]
fn case_insensitive_pairs() {
    assert_eq!(decode("AB cD ef\n"), vec![0xAB, 0xCD, 0xEF]);
}

#[test]
fn high_nibble_comes_first() {
    assert_eq!(decode("12\n"), vec![0x12]);
}

#[test]
fn newlines_tabs_not_required_between_lines() {
    assert_eq!(decode("ab\ncd\n"), vec![0xAB, 0xCD]);
    assert_eq!(decode("ab \n cd\n"), vec![0xAB, 0xCD]);
}

#[test]
fn adjacent_pairs_without_separator_rejected() {
    let (err, out) = decode_err("abcd\n");
    assert_eq!(err.kind, ParseErrorKind::MissingSeparator);
    // The first pair was already emitted before the violation.
    assert_eq!(out, vec![0xAB]);
}

#[test]
fn odd_trailing_digit_rejected() {
    let (err, _) = decode_err("ab c\n");
    assert_eq!(err.kind, ParseErrorKind::MalformedHexPair);
}

#[test]
fn lone_digit_at_eof_rejected() {
    let (err, _) = decode_err("a");
    assert_eq!(err.kind, ParseErrorKind::MalformedHexPair);
}

#[test]
fn digit_then_non_digit_rejected() {
    let (err, _) = decode_err("a; comment\n");
    assert_eq!(err.kind, ParseErrorKind::MalformedHexPair);
}

// === End of input ===

#[test]
fn empty_input_is_empty_output() {
    assert_eq!(decode(""), Vec::<u8>::new());
}

#[test]
fn blank_lines_and_spaces_only() {
    assert_eq!(decode("\n\n   \n"), Vec::<u8>::new());
}

#[test]
fn eof_mid_line_rejected() {
    let (err, out) = decode_err("ab");
    assert_eq!(err.kind, ParseErrorKind::EofMidLine);
    assert_eq!((err.line, err.column), (1, 2));
    // The pair itself decoded fine; only the missing newline is the error.
    assert_eq!(out, vec![0xAB]);
}

#[test]
fn trailing_spaces_before_eof_rejected() {
    let (err, _) = decode_err("ab\n  ");
    assert_eq!(err.kind, ParseErrorKind::EofMidLine);
    assert_eq!((err.line, err.column), (2, 2));
}

// === Comments ===

#[test]
fn comment_contributes_no_output() {
    assert_eq!(decode("ab ; comment to end\ncd\n"), vec![0xAB, 0xCD]);
}

#[test]
fn comment_may_contain_arbitrary_bytes() {
    assert_eq!(decode("; !@#$%^&* \x01 \t 12 :0x9\nff\n"), vec![0xFF]);
}

#[test]
fn unterminated_comment_rejected() {
    let (err, _) = decode_err("ab ; xx");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
    assert_eq!((err.line, err.column), (1, 7));
}

#[test]
fn comment_newline_counted_once() {
    // The '!' sits on line 2, column 1. Double-counting the comment's
    // terminating newline would report line 3; skipping it would leave the
    // column unreset.
    let (err, _) = decode_err("; one\n!\n");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedByte { byte: b'!' });
    assert_eq!((err.line, err.column), (2, 1));
}

#[test]
fn token_directly_after_comment_line() {
    // Column resets via the comment's newline, so EOF after "cd\n" is legal.
    assert_eq!(decode("ab ;c\ncd\n"), vec![0xAB, 0xCD]);
}

// === Offset directives ===

#[test]
fn matching_offset_accepted() {
    assert_eq!(decode(":0x0 ab :0x1 cd\n"), vec![0xAB, 0xCD]);
}

#[test]
fn offset_counts_in_hex() {
    let body = "00 ".repeat(16);
    assert_eq!(decode(&format!("{body}:0x10\n")).len(), 16);
}

#[test]
fn mismatched_offset_rejected() {
    let (err, out) = decode_err("ab :0x0 cd\n");
    assert_eq!(
        err.kind,
        ParseErrorKind::OffsetMismatch {
            claimed: 0,
            actual: 1
        }
    );
    assert_eq!(out, vec![0xAB]);
}

#[test]
fn mismatch_location_is_after_the_digits() {
    let (err, _) = decode_err("ab :0x5\n");
    assert_eq!(
        err.kind,
        ParseErrorKind::OffsetMismatch {
            claimed: 5,
            actual: 1
        }
    );
    assert_eq!((err.line, err.column), (1, 7));
}

#[test]
fn directive_separates_tokens() {
    // A directive is a valid separator: no whitespace needed around it.
    assert_eq!(decode("ab:0x1 cd\n"), vec![0xAB, 0xCD]);
}

#[test]
fn directive_digit_scan_is_greedy() {
    // "0x1cd" is one claimed value (0x1CD), not offset 1 followed by a
    // "cd" token.
    let (err, _) = decode_err("ab:0x1cd\n");
    assert_eq!(
        err.kind,
        ParseErrorKind::OffsetMismatch {
            claimed: 0x1CD,
            actual: 1
        }
    );
}

#[test]
fn directive_terminator_is_pushed_back() {
    // The newline ending the digit scan must be re-delivered to the main
    // loop: it both ends the line and makes the final EOF legal.
    assert_eq!(decode(":0x0\nab\n"), vec![0xAB]);
}

#[test]
fn seventeenth_digit_is_an_unseparated_token() {
    // Sixteen zeros claim offset 0; the seventeenth digit is pushed back
    // and rejected because the directive seals the position.
    let (err, _) = decode_err(":0x00000000000000000\n");
    assert_eq!(err.kind, ParseErrorKind::MissingSeparator);
}

#[test]
fn sixteen_digit_offset_accepted() {
    assert_eq!(decode(":0x0000000000000000\n"), Vec::<u8>::new());
}

#[test]
fn missing_0x_prefix_rejected() {
    for source in [":ab\n", ":x0\n", ":0y0\n", ":"] {
        let (err, _) = decode_err(source);
        assert_eq!(
            err.kind,
            ParseErrorKind::MalformedOffsetDirective,
            "source {source:?}"
        );
    }
}

#[test]
fn prefix_without_digits_rejected() {
    let (err, _) = decode_err(":0x ab\n");
    assert_eq!(err.kind, ParseErrorKind::MalformedOffsetDirective);
}

#[test]
fn directive_never_moves_the_cursor() {
    // Asserting the current position twice in a row is fine; the directive
    // is a no-op on output content.
    assert_eq!(decode(":0x0 :0x0 ab :0x1 :0x1\n"), vec![0xAB]);
}

// === Unexpected characters ===

#[test]
fn unexpected_byte_rejected_with_location() {
    let (err, _) = decode_err("ab !cd\n");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedByte { byte: b'!' });
    assert_eq!((err.line, err.column), (1, 4));
}

#[test]
fn tab_is_not_a_separator() {
    let (err, _) = decode_err("ab\tcd\n");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedByte { byte: b'\t' });
}

// === Error formatting ===

#[test]
fn error_message_carries_input_name_and_location() {
    let mut out = Vec::new();
    let err = translate(&b"ab !\n"[..], &mut out, "image.hex")
        .err()
        .map(|e| e.to_string());
    assert_eq!(err.as_deref(), Some("image.hex:1:4: error: parse error"));
}

// === Round-trip property ===

proptest! {
    /// Any byte sequence rendered as space-separated lowercase pairs with
    /// a leading offset assertion and a trailing newline decodes back to
    /// exactly itself.
    #[test]
    fn round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let rendered: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let text = format!(":0x0\n{}\n", rendered.join(" "));

        let mut out = Vec::new();
        translate(text.as_bytes(), &mut out, "roundtrip.hex").unwrap();
        prop_assert_eq!(out, bytes);
    }

    /// The output cursor counts every emitted byte: a final offset
    /// assertion of the total length always holds.
    #[test]
    fn final_offset_matches_length(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let rendered: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
        let text = format!("{}\n:0x{:x}\n", rendered.join("\n"), bytes.len());

        let mut out = Vec::new();
        translate(text.as_bytes(), &mut out, "cursor.hex").unwrap();
        prop_assert_eq!(out.len(), bytes.len());
    }
}
