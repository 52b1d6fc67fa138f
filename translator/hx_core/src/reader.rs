//! Single-byte input source with one-slot pushback.
//!
//! The translator needs exactly one character of lookahead: the offset
//! directive's digit scan stops at the first non-hex byte, which must be
//! re-delivered to the main loop. A one-slot buffer is enough; the slot is
//! always drained by the very next read.

use std::io::{self, Read};

/// Sequential byte reader over any [`Read`] with a one-slot pushback.
///
/// # Invariant
///
/// The pushback slot never holds a value across more than one subsequent
/// read: [`unread`](Self::unread) requires the slot to be empty, and
/// [`read_byte`](Self::read_byte) drains it before touching the underlying
/// stream.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    pushback: Option<u8>,
}

impl<R: Read> ByteReader<R> {
    /// Wrap an input stream. Callers that care about throughput should
    /// hand in a buffered reader; this type only guarantees ordered
    /// single-byte delivery.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushback: None,
        }
    }

    /// Read the next byte, delivering a pushed-back byte first.
    ///
    /// Returns `Ok(None)` at end of stream. `ErrorKind::Interrupted` reads
    /// are retried.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Stash one byte for re-delivery on the next [`read_byte`](Self::read_byte).
    ///
    /// The slot must be empty.
    pub fn unread(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        self.pushback = Some(byte);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_bytes_in_order() {
        let mut reader = ByteReader::new(&b"abc"[..]);
        assert_eq!(reader.read_byte().unwrap(), Some(b'a'));
        assert_eq!(reader.read_byte().unwrap(), Some(b'b'));
        assert_eq!(reader.read_byte().unwrap(), Some(b'c'));
        assert_eq!(reader.read_byte().unwrap(), None);
    }

    #[test]
    fn eof_is_sticky() {
        let mut reader = ByteReader::new(&b""[..]);
        assert_eq!(reader.read_byte().unwrap(), None);
        assert_eq!(reader.read_byte().unwrap(), None);
    }

    #[test]
    fn unread_is_delivered_before_the_stream() {
        let mut reader = ByteReader::new(&b"xy"[..]);
        assert_eq!(reader.read_byte().unwrap(), Some(b'x'));
        reader.unread(b'x');
        assert_eq!(reader.read_byte().unwrap(), Some(b'x'));
        assert_eq!(reader.read_byte().unwrap(), Some(b'y'));
        assert_eq!(reader.read_byte().unwrap(), None);
    }

    #[test]
    fn unread_works_at_eof() {
        let mut reader = ByteReader::new(&b""[..]);
        assert_eq!(reader.read_byte().unwrap(), None);
        reader.unread(b'z');
        assert_eq!(reader.read_byte().unwrap(), Some(b'z'));
        assert_eq!(reader.read_byte().unwrap(), None);
    }

    /// Reader that yields one byte per call, with an `Interrupted` error
    /// before each.
    struct Flaky<'a> {
        data: &'a [u8],
        interrupted: bool,
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            self.interrupted = false;
            match self.data.split_first() {
                Some((&first, rest)) => {
                    self.data = rest;
                    buf[0] = first;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let mut reader = ByteReader::new(Flaky {
            data: b"ok",
            interrupted: false,
        });
        assert_eq!(reader.read_byte().unwrap(), Some(b'o'));
        assert_eq!(reader.read_byte().unwrap(), Some(b'k'));
        assert_eq!(reader.read_byte().unwrap(), None);
    }
}
