use crate::error::{EncodingError, ErrorKind};
use crate::utf::*;

impl Utf for u16 {
    #[inline]
    fn decode_next(seq: &[Self], cursor: &mut usize) -> Result<u32, ErrorKind> {
        decode_next_utf16(seq, cursor)
    }

    #[inline]
    fn encode_next(code_point: u32, out: &mut Vec<Self>) -> Result<(), EncodingError> {
        encode_utf16(code_point, out)
    }
}

/// Decodes the UTF-16 sequence starting at `seq[*cursor]`.
///
/// A trail surrogate in lead position is [`ErrorKind::InvalidLead`]; a lead
/// surrogate without a trail after it is [`ErrorKind::IncompleteSequence`].
/// The cursor only moves on success.
#[inline]
pub fn decode_next_utf16(seq: &[u16], cursor: &mut usize) -> Result<u32, ErrorKind> {
    let Some(&lead) = seq.get(*cursor) else {
        return Err(ErrorKind::IncompleteSequence);
    };
    if !is_utf16_surrogate(lead) {
        *cursor += 1;
        return Ok(lead as u32);
    }
    if is_utf16_trail_surrogate(lead) {
        return Err(ErrorKind::InvalidLead);
    }
    match seq.get(*cursor + 1) {
        Some(&trail) if is_utf16_trail_surrogate(trail) => {
            *cursor += 2;
            Ok((((lead - LEAD_SURROGATE_MIN) as u32) << 10)
                + (trail - TRAIL_SURROGATE_MIN) as u32
                + 0x10000)
        }
        _ => Err(ErrorKind::IncompleteSequence),
    }
}

/// Appends the UTF-16 encoding of `code_point` to `out`.
#[inline]
pub fn encode_utf16(code_point: u32, out: &mut Vec<u16>) -> Result<(), EncodingError> {
    if !is_code_point_valid(code_point) {
        return Err(EncodingError::InvalidCodePoint(code_point));
    }
    if code_point < 0x10000 {
        out.push(code_point as u16);
    } else {
        out.extend_from_slice(&[
            (LEAD_OFFSET + (code_point >> 10)) as u16,
            TRAIL_SURROGATE_MIN + (code_point & 0x3FF) as u16,
        ]);
    }
    Ok(())
}

/// Number of UTF-8 bytes needed for `utf16`, assuming it is well formed.
///
/// A lead surrogate accounts for the whole 4-byte sequence, so trail
/// surrogates count for nothing.
pub fn estimate_utf8_units(utf16: &[u16]) -> usize {
    utf16
        .iter()
        .map(|&unit| match unit {
            0..=0x7F => 1,
            0x80..=0x7FF => 2,
            LEAD_SURROGATE_MIN..=LEAD_SURROGATE_MAX => 4,
            TRAIL_SURROGATE_MIN..=TRAIL_SURROGATE_MAX => 0,
            _ => 3,
        })
        .sum()
}

/// Reinterprets raw bytes as UTF-16 code units.
///
/// Returns `None` if `bytes` has an odd length.
pub fn units_from_bytes(bytes: &[u8], endianness: Endianness) -> Option<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let from_bytes: fn([u8; 2]) -> u16 = match endianness {
        Endianness::BigEndian => u16::from_be_bytes,
        Endianness::LittleEndian => u16::from_le_bytes,
    };
    Some(
        bytes
            .chunks_exact(2)
            .map(|pair| from_bytes([pair[0], pair[1]]))
            .collect(),
    )
}
