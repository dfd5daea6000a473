//! Conversion between UTF-8 and UTF-16 with strict validation.
//!
//! Every decoder rejects overlong UTF-8, invalid lead bytes, unpaired
//! surrogates and values above U+10FFFF, and reports what went wrong and
//! where. Nothing is ever replaced with U+FFFD.
//!
//! ```
//! let utf16 = utfconv::utf8_to_utf16("aл𐌀")?;
//! assert_eq!(utf16, [0x61, 0x43B, 0xD800, 0xDF00]);
//! assert_eq!(utfconv::utf16_to_utf8(&utf16)?, "aл𐌀".as_bytes());
//! # Ok::<(), utfconv::Error>(())
//! ```

use std::ffi::OsString;
use std::fmt;

use itertools::Itertools;
use parking_lot::Mutex;

pub mod error;
pub mod iter;
pub mod utf;

pub use error::{DecodingError, EncodingError, Error, ErrorKind};
pub use iter::{CodePoints, Utf16CodePoints, Utf8CodePoints};
pub use utf::utf16sequence::{
    decode_next_utf16, encode_utf16, estimate_utf8_units, units_from_bytes,
};
pub use utf::utf8sequence::{decode_next_utf8, encode_utf8, estimate_utf16_units};
pub use utf::{
    append_code_point_utf16, append_code_point_utf8, find_invalid, is_code_point_valid,
    is_utf16_lead_surrogate, is_utf16_surrogate, is_utf16_trail_surrogate, is_utf8_trail,
    is_valid, sequence_length, utf16_to_utf8, utf8_to_utf16, validate, Endianness, Utf,
    CODE_POINT_MAX, REPLACEMENT_CHARACTER,
};

/// Prints the text encoding of each file in `argv`, one line per file, in order.
pub fn utfconv(argv: Vec<OsString>) -> Result<(), Box<dyn std::error::Error>> {
    if argv.is_empty() {
        eprintln!("Not enough arguments.");
        return Err(std::io::Error::from(std::io::ErrorKind::InvalidInput).into());
    }
    let reports = Mutex::new(vec![String::new(); argv.len()]);
    std::thread::scope(|scope| {
        for (index, argument) in argv.iter().enumerate() {
            let reports = &reports;
            scope.spawn(move || {
                let line = match std::fs::read(argument) {
                    Ok(bytes) => {
                        let classification = classify_file(&bytes);
                        tracing::debug!(
                            path = ?argument,
                            len = bytes.len(),
                            %classification,
                            "classified"
                        );
                        classification.to_string()
                    }
                    Err(error) => {
                        tracing::debug!(path = ?argument, %error, "unreadable");
                        error.to_string()
                    }
                };
                reports.lock()[index] = format!("{}: {line}", argument.to_string_lossy());
            });
        }
    });
    println!("{}", reports.into_inner().iter().join("\n"));
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClassification {
    Empty,
    Ascii,
    Utf8,
    Utf16(Endianness),
    InvalidUtf8(DecodingError),
    InvalidUtf16(Endianness, DecodingError),
}

impl fmt::Display for FileClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Ascii => write!(f, "ASCII text"),
            Self::Utf8 => write!(f, "UTF-8 text"),
            Self::Utf16(endianness) => write!(f, "{} text", utf16_name(*endianness)),
            Self::InvalidUtf8(error) => {
                write!(f, "invalid UTF-8 at byte {} ({})", error.offset, error.kind)
            }
            Self::InvalidUtf16(endianness, error) => write!(
                f,
                "invalid {} at unit {} ({})",
                utf16_name(*endianness),
                error.offset,
                error.kind
            ),
        }
    }
}

const fn utf16_name(endianness: Endianness) -> &'static str {
    match endianness {
        Endianness::BigEndian => "UTF-16BE",
        Endianness::LittleEndian => "UTF-16LE",
    }
}

/// Classifies a whole file. UTF-16 is only recognized behind a byte-order mark.
pub fn classify_file(file: &[u8]) -> FileClassification {
    if file.is_empty() {
        return FileClassification::Empty;
    }
    let endianness = match file {
        [0xFF, 0xFE, ..] => Some(Endianness::LittleEndian),
        [0xFE, 0xFF, ..] => Some(Endianness::BigEndian),
        _ => None,
    };
    if let Some(endianness) = endianness {
        let body = &file[2..];
        return match units_from_bytes(body, endianness) {
            Some(units) => match validate(&units) {
                Ok(()) => FileClassification::Utf16(endianness),
                Err(error) => FileClassification::InvalidUtf16(endianness, error),
            },
            None => FileClassification::InvalidUtf16(
                endianness,
                DecodingError::new(ErrorKind::IncompleteSequence, body.len() / 2),
            ),
        };
    }
    if file.is_ascii() {
        return FileClassification::Ascii;
    }
    match validate(file) {
        Ok(()) => FileClassification::Utf8,
        Err(error) => FileClassification::InvalidUtf8(error),
    }
}
