//! Single-pass translator from hex notation to raw bytes.
//!
//! The main loop reads one byte and dispatches on it, the hot case (a hex
//! digit) first. Each non-trivial case is a focused method that advances
//! the input and either emits output or fails with a located parse error.
//!
//! Position bookkeeping: `line` is 1-based; `column` counts the characters
//! consumed on the current line and resets to 0 at each newline, so end of
//! input is legal exactly when `column == 0`. The offset directive's digit
//! scan is the only place a byte is pushed back, and `unread` undoes the
//! column increment so the byte is counted once, when the main loop
//! finally consumes it.

use std::io::{Read, Write};

use crate::error::{ParseError, ParseErrorKind, TranslateError};
use crate::nibble;
use crate::reader::ByteReader;

/// Maximum number of digits in an offset directive (a full `u64`).
const OFFSET_DIGITS_MAX: u32 = 16;

/// Owns the streams and scan state for one conversion. A value lives for
/// exactly one [`run`](Self::run); nothing is shared between conversions.
pub struct Translator<'a, R, W> {
    input: ByteReader<R>,
    output: W,
    input_name: &'a str,
    /// 1-based source line.
    line: u32,
    /// Characters consumed on the current line; 0 at start of line.
    column: u32,
    /// Bytes written so far, checked by offset directives.
    written: u64,
    /// Set right after a hex-byte token or offset directive; a hex digit
    /// is not allowed as the very next character.
    sealed: bool,
}

impl<'a, R: Read, W: Write> Translator<'a, R, W> {
    /// Bind a translator to its input and output streams. `input_name` is
    /// an opaque label used only in error messages.
    pub fn new(input: R, output: W, input_name: &'a str) -> Self {
        Self {
            input: ByteReader::new(input),
            output,
            input_name,
            line: 1,
            column: 0,
            written: 0,
            sealed: false,
        }
    }

    /// Run the pass to completion or first error.
    ///
    /// The output sink is flushed on both paths, so on failure the sink
    /// holds exactly the bytes decoded before the error. A translate error
    /// takes precedence over a flush error.
    pub fn run(mut self) -> Result<(), TranslateError> {
        let result = self.scan();
        let flushed = self.output.flush();
        result?;
        flushed?;
        Ok(())
    }

    fn scan(&mut self) -> Result<(), TranslateError> {
        loop {
            let Some(byte) = self.next_byte()? else {
                // End of input is legal only at the start of a line.
                if self.column == 0 {
                    return Ok(());
                }
                return Err(self.parse_error(ParseErrorKind::EofMidLine));
            };

            if let Some(high) = nibble::decode(byte) {
                self.hex_pair(high)?;
                continue;
            }

            self.sealed = false;
            match byte {
                b';' => self.comment()?,
                b':' => self.offset_directive()?,
                b' ' => {}
                b'\n' => self.start_new_line(),
                other => {
                    return Err(self.parse_error(ParseErrorKind::UnexpectedByte { byte: other }))
                }
            }
        }
    }

    /// Second half of a hex-byte token: the next character must also be a
    /// hex digit (end of input here is a malformed pair, not legal EOF).
    fn hex_pair(&mut self, high: u8) -> Result<(), TranslateError> {
        if self.sealed {
            return Err(self.parse_error(ParseErrorKind::MissingSeparator));
        }
        let low = self
            .next_byte()?
            .and_then(nibble::decode)
            .ok_or_else(|| self.parse_error(ParseErrorKind::MalformedHexPair))?;
        self.emit((high << 4) | low)?;
        self.sealed = true;
        Ok(())
    }

    /// Skip a `;` comment through its terminating newline.
    ///
    /// The newline bookkeeping for the consumed `\n` happens here, via the
    /// same [`start_new_line`](Self::start_new_line) the top-level newline
    /// case uses, and exactly once.
    fn comment(&mut self) -> Result<(), TranslateError> {
        loop {
            match self.next_byte()? {
                Some(b'\n') => {
                    self.start_new_line();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(self.parse_error(ParseErrorKind::UnterminatedComment)),
            }
        }
    }

    /// Parse `:0xN` and check the claimed position against the output
    /// cursor. The directive is a self-check: it never moves the cursor.
    fn offset_directive(&mut self) -> Result<(), TranslateError> {
        if self.next_byte()? != Some(b'0') || self.next_byte()? != Some(b'x') {
            return Err(self.parse_error(ParseErrorKind::MalformedOffsetDirective));
        }

        // Greedy scan: up to 16 hex digits, big-endian. The terminating
        // non-digit is pushed back for the main loop.
        let mut claimed: u64 = 0;
        let mut digits = 0;
        while digits < OFFSET_DIGITS_MAX {
            let Some(byte) = self.next_byte()? else {
                break;
            };
            let Some(value) = nibble::decode(byte) else {
                self.unread(byte);
                break;
            };
            claimed = (claimed << 4) | u64::from(value);
            digits += 1;
        }
        if digits == 0 {
            return Err(self.parse_error(ParseErrorKind::MalformedOffsetDirective));
        }

        if claimed != self.written {
            return Err(self.parse_error(ParseErrorKind::OffsetMismatch {
                claimed,
                actual: self.written,
            }));
        }
        self.sealed = true;
        Ok(())
    }

    /// Write one decoded byte and advance the output cursor.
    fn emit(&mut self, byte: u8) -> Result<(), TranslateError> {
        self.output.write_all(&[byte])?;
        self.written += 1;
        Ok(())
    }

    /// Consume one input character, counting it on the current line.
    fn next_byte(&mut self) -> Result<Option<u8>, TranslateError> {
        let byte = self.input.read_byte()?;
        if byte.is_some() {
            self.column += 1;
        }
        Ok(byte)
    }

    /// Un-read one character, undoing its column count; it will be counted
    /// again when re-delivered.
    fn unread(&mut self, byte: u8) {
        self.input.unread(byte);
        self.column -= 1;
    }

    fn start_new_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }

    #[cold]
    fn parse_error(&self, kind: ParseErrorKind) -> TranslateError {
        TranslateError::Parse(ParseError {
            input_name: self.input_name.to_string(),
            line: self.line,
            column: self.column,
            kind,
        })
    }
}

/// Convenience entry point: translate a whole input stream into `output`.
///
/// Equivalent to constructing a [`Translator`] and calling
/// [`run`](Translator::run).
pub fn translate(
    input: impl Read,
    output: impl Write,
    input_name: &str,
) -> Result<(), TranslateError> {
    Translator::new(input, output, input_name).run()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
