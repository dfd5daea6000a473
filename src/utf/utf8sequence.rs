use crate::error::{EncodingError, ErrorKind};
use crate::utf::*;

impl Utf for u8 {
    #[inline]
    fn decode_next(seq: &[Self], cursor: &mut usize) -> Result<u32, ErrorKind> {
        decode_next_utf8(seq, cursor)
    }

    #[inline]
    fn encode_next(code_point: u32, out: &mut Vec<Self>) -> Result<(), EncodingError> {
        encode_utf8(code_point, out)
    }
}

/// Decodes the UTF-8 sequence starting at `seq[*cursor]`.
///
/// A continuation byte that is missing or malformed is reported as
/// [`ErrorKind::IncompleteSequence`]. The cursor only moves on success.
#[inline]
pub fn decode_next_utf8(seq: &[u8], cursor: &mut usize) -> Result<u32, ErrorKind> {
    let rest = seq.get(*cursor..).unwrap_or_default();
    let Some(&lead) = rest.first() else {
        return Err(ErrorKind::IncompleteSequence);
    };
    let length = sequence_length(lead);
    if length == 1 {
        *cursor += 1;
        return Ok(lead as u32);
    }
    if length == 0 {
        return Err(ErrorKind::InvalidLead);
    }
    let Some(bytes) = rest.get(..length) else {
        return Err(ErrorKind::IncompleteSequence);
    };
    let mut code_point = match length {
        2 => lead ^ 0b1100_0000,
        3 => lead ^ 0b1110_0000,
        _ => lead ^ 0b1111_0000,
    } as u32;
    for &byte in &bytes[1..] {
        if !is_utf8_trail(byte) {
            return Err(ErrorKind::IncompleteSequence);
        }
        code_point = (code_point << 6) | (byte ^ 0b1000_0000) as u32;
    }
    if !is_code_point_valid(code_point) {
        return Err(ErrorKind::InvalidCodePoint);
    }
    if is_overlong(code_point, length) {
        return Err(ErrorKind::OverlongSequence);
    }
    *cursor += length;
    Ok(code_point)
}

#[inline]
const fn is_overlong(code_point: u32, length: usize) -> bool {
    if code_point < 0x80 {
        length != 1
    } else if code_point < 0x800 {
        length > 2
    } else if code_point < 0x10000 {
        length > 3
    } else {
        false
    }
}

/// Appends the UTF-8 encoding of `code_point` to `out`.
#[inline]
pub fn encode_utf8(code_point: u32, out: &mut Vec<u8>) -> Result<(), EncodingError> {
    if !is_code_point_valid(code_point) {
        return Err(EncodingError::InvalidCodePoint(code_point));
    }
    if code_point < 0x80 {
        out.push(code_point as u8);
    } else if code_point < 0x800 {
        out.extend_from_slice(&[
            (code_point >> 6) as u8 | 0b1100_0000,
            trail(code_point),
        ]);
    } else if code_point < 0x10000 {
        out.extend_from_slice(&[
            (code_point >> 12) as u8 | 0b1110_0000,
            trail(code_point >> 6),
            trail(code_point),
        ]);
    } else {
        out.extend_from_slice(&[
            (code_point >> 18) as u8 | 0b1111_0000,
            trail(code_point >> 12),
            trail(code_point >> 6),
            trail(code_point),
        ]);
    }
    Ok(())
}

#[inline]
const fn trail(bits: u32) -> u8 {
    (bits & 0b11_1111) as u8 | 0b1000_0000
}

/// Number of UTF-16 units needed for `utf8`, assuming it is well formed.
pub fn estimate_utf16_units(utf8: &[u8]) -> usize {
    utf8.iter()
        .filter(|&&byte| !is_utf8_trail(byte))
        .map(|&byte| if sequence_length(byte) == 4 { 2 } else { 1 })
        .sum()
}
