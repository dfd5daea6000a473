pub mod utf16sequence;
pub mod utf8sequence;

use crate::error::{DecodingError, EncodingError, ErrorKind};

// Leading (high) surrogates: D800 - DBFF
// Trailing (low) surrogates: DC00 - DFFF
pub const LEAD_SURROGATE_MIN: u16 = 0xD800;
pub const LEAD_SURROGATE_MAX: u16 = 0xDBFF;
pub const TRAIL_SURROGATE_MIN: u16 = 0xDC00;
pub const TRAIL_SURROGATE_MAX: u16 = 0xDFFF;
/// `LEAD_SURROGATE_MIN - (0x10000 >> 10)`
pub(crate) const LEAD_OFFSET: u32 = 0xD7C0;

/// Largest valid Unicode code point.
pub const CODE_POINT_MAX: u32 = 0x10FFFF;
/// U+FFFD, for callers that substitute invalid input themselves.
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// A code unit type of a Unicode encoding form: `u8` for UTF-8, `u16` for UTF-16.
///
/// Everything that walks a sequence (validation, transcoding, [`CodePoints`](crate::CodePoints))
/// goes through these two functions, so the encoding rules live in exactly one place.
pub trait Utf: Copy + core::fmt::Debug + sealed::Sealed {
    /// Decodes the code point starting at `*cursor`.
    ///
    /// On success the cursor is moved past the sequence. On failure it is left
    /// where it was, pointing at the start of the offending sequence.
    fn decode_next(seq: &[Self], cursor: &mut usize) -> Result<u32, ErrorKind>;

    /// Appends the encoding of `code_point` to `out`. `out` is untouched on failure.
    fn encode_next(code_point: u32, out: &mut Vec<Self>) -> Result<(), EncodingError>;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

#[inline]
pub const fn is_utf8_trail(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

#[inline]
pub const fn is_utf16_lead_surrogate(unit: u16) -> bool {
    unit >= LEAD_SURROGATE_MIN && unit <= LEAD_SURROGATE_MAX
}

#[inline]
pub const fn is_utf16_trail_surrogate(unit: u16) -> bool {
    unit >= TRAIL_SURROGATE_MIN && unit <= TRAIL_SURROGATE_MAX
}

#[inline]
pub const fn is_utf16_surrogate(unit: u16) -> bool {
    unit >= LEAD_SURROGATE_MIN && unit <= TRAIL_SURROGATE_MAX
}

/// True for Unicode scalar values: at most U+10FFFF and not a surrogate.
#[inline]
pub const fn is_code_point_valid(code_point: u32) -> bool {
    code_point <= CODE_POINT_MAX
        && !(code_point >= LEAD_SURROGATE_MIN as u32 && code_point <= TRAIL_SURROGATE_MAX as u32)
}

/// Number of bytes in the UTF-8 sequence introduced by `lead`, or 0 if
/// `lead` cannot start a sequence.
#[inline]
pub const fn sequence_length(lead: u8) -> usize {
    match lead.leading_ones() {
        0 => 1,
        n @ 2..=4 => n as usize,
        _ => 0,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

/// Walks `seq` one code point at a time and reports the first sequence that
/// fails to decode.
pub fn validate<U: Utf>(seq: &[U]) -> Result<(), DecodingError> {
    let mut cursor = 0;
    while cursor < seq.len() {
        if let Err(kind) = U::decode_next(seq, &mut cursor) {
            tracing::trace!(offset = cursor, %kind, "invalid sequence");
            return Err(DecodingError::new(kind, cursor));
        }
    }
    Ok(())
}

/// Offset of the first invalid sequence in `seq`, or `None` if all of it decodes.
///
/// ```
/// assert_eq!(utfconv::find_invalid("日ш\u{FFFD}".as_bytes()), None);
/// assert_eq!(utfconv::find_invalid(b"\xE6\x97\xA5\xD1\x88\xFA".as_slice()), Some(5));
/// assert_eq!(utfconv::find_invalid(&[0x0041u16, 0xDD1E][..]), Some(1));
/// ```
pub fn find_invalid<U: Utf>(seq: &[U]) -> Option<usize> {
    validate(seq).err().map(|error| error.offset)
}

pub fn is_valid<U: Utf>(seq: &[U]) -> bool {
    find_invalid(seq).is_none()
}

/// Encodes `code_point` as UTF-8 and appends it to `utf8`.
pub fn append_code_point_utf8(utf8: &mut Vec<u8>, code_point: u32) -> Result<(), EncodingError> {
    u8::encode_next(code_point, utf8)
}

/// Encodes `code_point` as UTF-16 and appends it to `utf16`.
pub fn append_code_point_utf16(utf16: &mut Vec<u16>, code_point: u32) -> Result<(), EncodingError> {
    u16::encode_next(code_point, utf16)
}

/// Converts a UTF-8 sequence to UTF-16, failing at the first invalid sequence.
pub fn utf8_to_utf16(utf8: impl AsRef<[u8]>) -> Result<Vec<u16>, DecodingError> {
    let utf8 = utf8.as_ref();
    transcode(utf8, utf8sequence::estimate_utf16_units(utf8))
}

/// Converts a UTF-16 sequence to UTF-8, failing at the first invalid sequence.
pub fn utf16_to_utf8(utf16: impl AsRef<[u16]>) -> Result<Vec<u8>, DecodingError> {
    let utf16 = utf16.as_ref();
    transcode(utf16, utf16sequence::estimate_utf8_units(utf16))
}

fn transcode<S: Utf, D: Utf>(seq: &[S], capacity: usize) -> Result<Vec<D>, DecodingError> {
    tracing::trace!(len = seq.len(), capacity, "transcoding");
    let mut out = Vec::with_capacity(capacity);
    let mut cursor = 0;
    while cursor < seq.len() {
        let start = cursor;
        let code_point = S::decode_next(seq, &mut cursor).map_err(|kind| {
            tracing::trace!(offset = start, %kind, "invalid sequence");
            DecodingError::new(kind, start)
        })?;
        // decoded code points are always valid
        D::encode_next(code_point, &mut out)
            .map_err(|_| DecodingError::new(ErrorKind::InvalidCodePoint, start))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trail_bytes() {
        assert!(is_utf8_trail(0x80));
        assert!(is_utf8_trail(0xBF));
        assert!(!is_utf8_trail(0x7F));
        assert!(!is_utf8_trail(0xC0));
        assert!(!is_utf8_trail(0xFA));
    }

    #[test]
    fn surrogate_classes() {
        assert!(is_utf16_lead_surrogate(0xD800));
        assert!(is_utf16_lead_surrogate(0xDBFF));
        assert!(!is_utf16_lead_surrogate(0xDC00));
        assert!(is_utf16_trail_surrogate(0xDC00));
        assert!(is_utf16_trail_surrogate(0xDFFF));
        assert!(!is_utf16_trail_surrogate(0xDBFF));
        assert!(is_utf16_surrogate(0xD800));
        assert!(is_utf16_surrogate(0xDFFF));
        assert!(!is_utf16_surrogate(0xD7FF));
        assert!(!is_utf16_surrogate(0xE000));
    }

    #[test]
    fn code_point_validity() {
        assert!(is_code_point_valid(0));
        assert!(is_code_point_valid(0xD7FF));
        assert!(!is_code_point_valid(0xD800));
        assert!(!is_code_point_valid(0xDFFF));
        assert!(is_code_point_valid(0xE000));
        assert!(is_code_point_valid(CODE_POINT_MAX));
        assert!(!is_code_point_valid(0x110000));
        assert!(!is_code_point_valid(u32::MAX));
    }

    #[test]
    fn lead_lengths() {
        assert_eq!(sequence_length(b'a'), 1);
        assert_eq!(sequence_length(0x7F), 1);
        assert_eq!(sequence_length(0x80), 0);
        assert_eq!(sequence_length(0xBF), 0);
        assert_eq!(sequence_length(0xC2), 2);
        assert_eq!(sequence_length(0xE6), 3);
        assert_eq!(sequence_length(0xF0), 4);
        assert_eq!(sequence_length(0xF7), 4);
        assert_eq!(sequence_length(0xF8), 0);
        assert_eq!(sequence_length(0xFF), 0);
    }

    #[test]
    fn append_to_utf8() {
        let mut utf8 = Vec::new();
        append_code_point_utf8(&mut utf8, 'a' as u32).unwrap();
        assert_eq!(utf8, b"a");
        append_code_point_utf8(&mut utf8, 'л' as u32).unwrap();
        assert_eq!(utf8, "aл".as_bytes());
        assert_eq!(
            append_code_point_utf8(&mut utf8, 0xDC00),
            Err(EncodingError::InvalidCodePoint(0xDC00))
        );
        assert_eq!(utf8, "aл".as_bytes());
    }

    #[test]
    fn append_to_utf16() {
        let mut utf16 = Vec::new();
        append_code_point_utf16(&mut utf16, 'a' as u32).unwrap();
        assert_eq!(utf16, [0x61]);
        append_code_point_utf16(&mut utf16, 'л' as u32).unwrap();
        assert_eq!(utf16, "aл".encode_utf16().collect::<Vec<_>>());
        assert!(append_code_point_utf16(&mut utf16, 0x110000).is_err());
        assert_eq!(utf16.len(), 2);
    }

    #[test]
    fn surrogates_are_never_encoded() {
        for code_point in 0xD800..=0xDFFF {
            let mut utf8 = Vec::new();
            let mut utf16 = Vec::new();
            assert_eq!(
                append_code_point_utf8(&mut utf8, code_point),
                Err(EncodingError::InvalidCodePoint(code_point))
            );
            assert_eq!(
                append_code_point_utf16(&mut utf16, code_point),
                Err(EncodingError::InvalidCodePoint(code_point))
            );
            assert!(utf8.is_empty());
            assert!(utf16.is_empty());
        }
    }

    #[test]
    fn utf8_to_16() {
        assert_eq!(utf8_to_utf16("aл").unwrap(), "aл".encode_utf16().collect::<Vec<_>>());
        assert_eq!(utf8_to_utf16("").unwrap(), Vec::<u16>::new());
        assert_eq!(utf8_to_utf16("𐌀").unwrap(), [0xD800, 0xDF00]);

        // 0xFA cannot start a sequence
        let invalid = b"\xE6\x97\xA5\xD1\x88\xFA";
        assert_eq!(
            utf8_to_utf16(invalid),
            Err(DecodingError::new(ErrorKind::InvalidLead, 5))
        );
    }

    #[test]
    fn utf16_to_8() {
        let utf16: Vec<u16> = "aл".encode_utf16().collect();
        assert_eq!(utf16_to_utf8(&utf16).unwrap(), "aл".as_bytes());
        assert_eq!(utf16_to_utf8([0xD800u16, 0xDF00]).unwrap(), "𐌀".as_bytes());

        // 0xDD1E is a trail surrogate with no lead
        let invalid = [0x0041u16, 0x0448, 0x65E5, 0xDD1E];
        assert_eq!(
            utf16_to_utf8(invalid),
            Err(DecodingError::new(ErrorKind::InvalidLead, 3))
        );
        assert_eq!(
            utf16_to_utf8([0x0041u16, 0xD800]),
            Err(DecodingError::new(ErrorKind::IncompleteSequence, 1))
        );
    }

    #[test]
    fn invalid_utf8_conversions() {
        assert_eq!(
            utf8_to_utf16([0xC1u8, 0x81]).unwrap_err().kind,
            ErrorKind::OverlongSequence
        );
        assert_eq!(utf8_to_utf16([0x80u8]).unwrap_err().kind, ErrorKind::InvalidLead);
        assert_eq!(
            utf8_to_utf16([0xE2u8, 0x82]).unwrap_err().kind,
            ErrorKind::IncompleteSequence
        );
        assert_eq!(
            utf8_to_utf16([0xEDu8, 0xA0, 0x80]).unwrap_err().kind,
            ErrorKind::InvalidCodePoint
        );
    }

    #[test]
    fn find_invalid_utf8() {
        assert_eq!(find_invalid("日ш".as_bytes()), None);
        assert_eq!(find_invalid(b"".as_slice()), None);
        let invalid = b"\xE6\x97\xA5\xD1\x88\xFA";
        assert_eq!(find_invalid(invalid.as_slice()), Some(5));
        assert!(!is_valid(invalid.as_slice()));
        assert!(is_valid("水手 𐌀".as_bytes()));
        assert_eq!(
            validate(b"ab\xE2\x82".as_slice()),
            Err(DecodingError::new(ErrorKind::IncompleteSequence, 2))
        );
    }

    #[test]
    fn find_invalid_utf16() {
        let valid: Vec<u16> = "шницла 𐌀".encode_utf16().collect();
        assert_eq!(find_invalid(&valid), None);
        assert!(is_valid(&valid));
        let invalid = [0x0041u16, 0x0448, 0x65E5, 0xDD1E];
        assert_eq!(find_invalid(&invalid), Some(3));
        assert!(!is_valid(&invalid));
        assert_eq!(
            validate(&invalid),
            Err(DecodingError::new(ErrorKind::InvalidLead, 3))
        );
    }

    #[test]
    fn length_invariants() {
        for code_point in (0..0x80).chain([0x10000, 0x1F4A9, CODE_POINT_MAX]) {
            let mut utf8 = Vec::new();
            let mut utf16 = Vec::new();
            append_code_point_utf8(&mut utf8, code_point).unwrap();
            append_code_point_utf16(&mut utf16, code_point).unwrap();
            if code_point < 0x80 {
                assert_eq!((utf8.len(), utf16.len()), (1, 1));
            } else {
                assert_eq!((utf8.len(), utf16.len()), (4, 2));
                assert!(is_utf16_lead_surrogate(utf16[0]));
                assert!(is_utf16_trail_surrogate(utf16[1]));
            }
        }
    }

    proptest! {
        #[test]
        fn cross_encoding_round_trip(s in any::<String>()) {
            let utf16 = utf8_to_utf16(&s).unwrap();
            prop_assert_eq!(&utf16, &s.encode_utf16().collect::<Vec<_>>());
            prop_assert_eq!(utf16_to_utf8(&utf16).unwrap(), s.as_bytes());
        }

        #[test]
        fn std_agrees_on_validity(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let expected = std::str::from_utf8(&bytes).err().map(|e| e.valid_up_to());
            prop_assert_eq!(find_invalid(bytes.as_slice()), expected);
        }
    }
}
