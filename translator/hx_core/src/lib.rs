//! Core of the `hx` hex-to-binary translator.
//!
//! The input notation is hex-byte tokens (two adjacent hex digits, high
//! nibble first), `;` line comments, and `:0xN` offset assertions that
//! self-document the output position. The translator makes a single pass
//! over the input byte stream, writing decoded bytes to the output sink
//! and failing fast with a located parse error on the first grammar
//! violation.
//!
//! This crate is standalone: it knows nothing about files or process exit
//! codes. The CLI (`hxc`) supplies the streams and reports errors.

mod error;
pub mod nibble;
mod reader;
mod translator;

pub use error::{ParseError, ParseErrorKind, TranslateError};
pub use reader::ByteReader;
pub use translator::{translate, Translator};
