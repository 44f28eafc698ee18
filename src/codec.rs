//! Single-unit transcoding between UTF-8, UTF-16, UCS-2, and UCS-4
//!
//! Every function here is pure and allocation-free: it reads one encoded
//! unit from a caller-owned buffer (or takes one scalar value) and either
//! fully converts it, reporting the exact number of bytes/units consumed
//! or written, or returns `None` without touching the output. `None` is the
//! only failure signal; callers that need diagnostics (offsets, which unit
//! failed) derive them from their own bookkeeping.
//!
//! Scalar values are capped at 0x1FFFFF, the ceiling of the 4-byte UTF-8
//! form. This is deliberately above Unicode's 0x10FFFF limit and below what
//! the retired 5/6-byte forms could express.

/// Number of continuation bytes implied by a UTF-8 lead byte.
///
/// Counts the leading 1-bits and subtracts one: `0xxxxxxx` and `110xxxxx`
/// map to 0 and 1 trailing bytes, up to `11110xxx` mapping to 3. A bare
/// continuation byte (`10xxxxxx`) has a single leading 1-bit and therefore
/// also maps to 0, the same as ASCII; decoding then treats it as a 1-byte
/// unit rather than rejecting it. Callers feeding untrusted data must not
/// rely on continuation bytes being flagged here.
#[inline]
pub fn utf8_trailing_bytes(lead: u8) -> u32 {
    let ones = lead.leading_ones();
    ones.saturating_sub(1)
}

/// Whether `from` holds enough bytes to decode the sequence starting at
/// `from[0]`.
///
/// This is a pre-check only; [`utf8_to_ucs4`] re-validates the length
/// itself.
#[inline]
pub fn can_decode_utf8(from: &[u8]) -> bool {
    match from.first() {
        Some(&lead) => (utf8_trailing_bytes(lead) as usize) < from.len(),
        None => false,
    }
}

/// Decodes one UTF-8 sequence from the front of `from` into a UCS-4 scalar
/// value.
///
/// Returns the scalar and the number of bytes consumed (1-4). Fails when
/// `from` is empty, when the lead byte implies more trailing bytes than the
/// buffer holds, or when the lead byte implies 4 or more trailing bytes
/// (no supported UTF-8 form is that wide).
///
/// Trailing bytes are not checked for the `10xxxxxx` continuation pattern;
/// their low 6 bits are taken as-is. Well-formedness beyond length is the
/// caller's problem.
pub fn utf8_to_ucs4(from: &[u8]) -> Option<(u32, usize)> {
    let &lead = from.first()?;
    let trailing = utf8_trailing_bytes(lead) as usize;
    if trailing >= from.len() {
        return None;
    }
    let converted = match trailing {
        0 => u32::from(lead),
        1 => (u32::from(lead) & 0x1F) << 6 | (u32::from(from[1]) & 0x3F),
        2 => {
            (u32::from(lead) & 0x0F) << 12
                | (u32::from(from[1]) & 0x3F) << 6
                | (u32::from(from[2]) & 0x3F)
        }
        3 => {
            (u32::from(lead) & 0x07) << 18
                | (u32::from(from[1]) & 0x3F) << 12
                | (u32::from(from[2]) & 0x3F) << 6
                | (u32::from(from[3]) & 0x3F)
        }
        _ => return None,
    };
    Some((converted, trailing + 1))
}

/// Encodes one UCS-4 scalar value as UTF-8 at the front of `to`.
///
/// Returns the number of bytes written (1-4), chosen by the value's range:
/// up to 0x7F, 0x7FF, 0xFFFF, and 0x1FFFFF for 1 through 4 bytes. Fails
/// when `to` is too small for the required width or when `from` exceeds
/// 0x1FFFFF. On failure `to` is left untouched.
pub fn ucs4_to_utf8(from: u32, to: &mut [u8]) -> Option<usize> {
    if from <= 0x7F {
        let out = to.first_mut()?;
        *out = from as u8;
        Some(1)
    } else if from <= 0x7FF {
        let out = to.get_mut(..2)?;
        out[0] = (from >> 6) as u8 | 0xC0;
        out[1] = (from & 0x3F) as u8 | 0x80;
        Some(2)
    } else if from <= 0xFFFF {
        let out = to.get_mut(..3)?;
        out[0] = (from >> 12) as u8 | 0xE0;
        out[1] = (from >> 6 & 0x3F) as u8 | 0x80;
        out[2] = (from & 0x3F) as u8 | 0x80;
        Some(3)
    } else if from <= 0x1F_FFFF {
        let out = to.get_mut(..4)?;
        out[0] = (from >> 18) as u8 | 0xF0;
        out[1] = (from >> 12 & 0x3F) as u8 | 0x80;
        out[2] = (from >> 6 & 0x3F) as u8 | 0x80;
        out[3] = (from & 0x3F) as u8 | 0x80;
        Some(4)
    } else {
        None
    }
}

/// Decodes one UTF-8 sequence into a UCS-2 code unit.
///
/// Same as [`utf8_to_ucs4`], with the additional failure when the decoded
/// scalar does not fit the Basic Multilingual Plane (> 0xFFFF).
pub fn utf8_to_ucs2(from: &[u8]) -> Option<(u16, usize)> {
    let (ucs4, len) = utf8_to_ucs4(from)?;
    if ucs4 > 0xFFFF {
        return None;
    }
    Some((ucs4 as u16, len))
}

/// Encodes one UCS-2 code unit as UTF-8 at the front of `to`.
///
/// Widens and delegates to [`ucs4_to_utf8`]; only fails when `to` is too
/// small, since every 16-bit value is in encodable range.
#[inline]
pub fn ucs2_to_utf8(from: u16, to: &mut [u8]) -> Option<usize> {
    ucs4_to_utf8(u32::from(from), to)
}

/// Decodes one UTF-16 unit or surrogate pair from the front of `from` into
/// a UCS-4 scalar value.
///
/// Returns the scalar and the number of units consumed (1 or 2). A unit
/// whose bits match `0xDC00` under the `0xDC00` mask is a stray low
/// surrogate and fails. A unit matching `0xD800` under the `0xD800` mask
/// starts a pair: the next unit must exist and match `0xDC00`, else the
/// call fails; the pair combines to `0x10000` plus the two 10-bit halves.
/// Any other unit is the scalar itself. Note the surrogate tests are the
/// masked bit-pattern comparisons shown, not range checks over
/// 0xD800..=0xDFFF.
pub fn utf16_to_ucs4(from: &[u16]) -> Option<(u32, usize)> {
    let &unit = from.first()?;
    if unit & 0xDC00 == 0xDC00 {
        None
    } else if unit & 0xD800 == 0xD800 {
        let &low = from.get(1)?;
        if low & 0xDC00 != 0xDC00 {
            return None;
        }
        let converted =
            0x10000 | u32::from(unit & !0xD800) << 10 | u32::from(low & !0xDC00);
        Some((converted, 2))
    } else {
        Some((u32::from(unit), 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_bytes_lead_patterns() {
        assert_eq!(utf8_trailing_bytes(0x00), 0);
        assert_eq!(utf8_trailing_bytes(0x7F), 0);
        assert_eq!(utf8_trailing_bytes(0xC2), 1);
        assert_eq!(utf8_trailing_bytes(0xDF), 1);
        assert_eq!(utf8_trailing_bytes(0xE0), 2);
        assert_eq!(utf8_trailing_bytes(0xEF), 2);
        assert_eq!(utf8_trailing_bytes(0xF0), 3);
        assert_eq!(utf8_trailing_bytes(0xF7), 3);
        // Retired 5- and 6-byte lead patterns
        assert_eq!(utf8_trailing_bytes(0xF8), 4);
        assert_eq!(utf8_trailing_bytes(0xFC), 5);
        assert_eq!(utf8_trailing_bytes(0xFF), 7);
    }

    #[test]
    fn trailing_bytes_conflates_continuation_with_ascii() {
        // 10xxxxxx has one leading 1-bit; count-minus-one lands on 0,
        // the same as ASCII.
        assert_eq!(utf8_trailing_bytes(0x80), 0);
        assert_eq!(utf8_trailing_bytes(0xBF), 0);
    }

    #[test]
    fn can_decode_checks_available_length() {
        assert!(can_decode_utf8(b"a"));
        assert!(can_decode_utf8(&[0xE0, 0xA0, 0x80]));
        assert!(!can_decode_utf8(&[0xE0, 0xA0]));
        assert!(!can_decode_utf8(&[]));
    }

    #[test]
    fn decode_boundary_sequences() {
        assert_eq!(utf8_to_ucs4(&[0x7F]), Some((0x7F, 1)));
        assert_eq!(utf8_to_ucs4(&[0xC2, 0x80]), Some((0x80, 2)));
        assert_eq!(utf8_to_ucs4(&[0xDF, 0xBF]), Some((0x7FF, 2)));
        assert_eq!(utf8_to_ucs4(&[0xE0, 0xA0, 0x80]), Some((0x800, 3)));
        assert_eq!(utf8_to_ucs4(&[0xEF, 0xBF, 0xBF]), Some((0xFFFF, 3)));
        assert_eq!(utf8_to_ucs4(&[0xF0, 0x90, 0x80, 0x80]), Some((0x10000, 4)));
    }

    #[test]
    fn decode_consumes_exact_length_with_extra_bytes_present() {
        let buf = [0xC2, 0x80, b'a', b'b'];
        assert_eq!(utf8_to_ucs4(&buf), Some((0x80, 2)));
    }

    #[test]
    fn decode_fails_on_truncation() {
        assert_eq!(utf8_to_ucs4(&[0xE0, 0xA0]), None);
        assert_eq!(utf8_to_ucs4(&[0xF0, 0x90, 0x80]), None);
        assert_eq!(utf8_to_ucs4(&[]), None);
    }

    #[test]
    fn decode_fails_on_unsupported_lead() {
        // 0xF8 implies 4 trailing bytes, beyond the 4-byte form.
        assert_eq!(utf8_to_ucs4(&[0xF8, 0x80, 0x80, 0x80, 0x80]), None);
        assert_eq!(utf8_to_ucs4(&[0xFF, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80]), None);
    }

    #[test]
    fn encode_boundary_sequences() {
        let mut buf = [0u8; 4];
        assert_eq!(ucs4_to_utf8(0x7F, &mut buf), Some(1));
        assert_eq!(&buf[..1], &[0x7F]);
        assert_eq!(ucs4_to_utf8(0x80, &mut buf), Some(2));
        assert_eq!(&buf[..2], &[0xC2, 0x80]);
        assert_eq!(ucs4_to_utf8(0x7FF, &mut buf), Some(2));
        assert_eq!(&buf[..2], &[0xDF, 0xBF]);
        assert_eq!(ucs4_to_utf8(0x800, &mut buf), Some(3));
        assert_eq!(&buf[..3], &[0xE0, 0xA0, 0x80]);
        assert_eq!(ucs4_to_utf8(0xFFFF, &mut buf), Some(3));
        assert_eq!(&buf[..3], &[0xEF, 0xBF, 0xBF]);
        assert_eq!(ucs4_to_utf8(0x10000, &mut buf), Some(4));
        assert_eq!(&buf[..4], &[0xF0, 0x90, 0x80, 0x80]);
    }

    #[test]
    fn encode_width_is_monotonic() {
        let mut buf = [0u8; 4];
        let mut previous = 0;
        for value in [0, 0x7F, 0x80, 0x7FF, 0x800, 0xFFFF, 0x10000, 0x1F_FFFF] {
            let width = ucs4_to_utf8(value, &mut buf).unwrap();
            assert!(width >= previous, "width shrank at 0x{value:X}");
            previous = width;
        }
    }

    #[test]
    fn encode_fails_on_insufficient_capacity() {
        let mut buf = [0u8; 2];
        assert_eq!(ucs4_to_utf8(0x800, &mut buf), None);
        assert_eq!(ucs4_to_utf8(0x41, &mut []), None);
    }

    #[test]
    fn encode_fails_above_ceiling() {
        let mut buf = [0u8; 4];
        assert_eq!(ucs4_to_utf8(0x20_0000, &mut buf), None);
        assert_eq!(ucs4_to_utf8(u32::MAX, &mut buf), None);
    }

    #[test]
    fn encode_leaves_buffer_untouched_on_failure() {
        let mut buf = [0xAA; 2];
        assert_eq!(ucs4_to_utf8(0x800, &mut buf), None);
        assert_eq!(buf, [0xAA; 2]);
    }

    #[test]
    fn ucs2_rejects_values_outside_bmp() {
        let mut buf = [0u8; 4];
        let len = ucs4_to_utf8(0x10000, &mut buf).unwrap();
        assert_eq!(utf8_to_ucs2(&buf[..len]), None);
    }

    #[test]
    fn ucs2_round_trip_across_bmp() {
        let mut buf = [0u8; 4];
        for unit in [0u16, 0x7F, 0x80, 0x7FF, 0x800, 0xD7FF, 0xFFFF] {
            let len = ucs2_to_utf8(unit, &mut buf).unwrap();
            assert_eq!(utf8_to_ucs2(&buf[..len]), Some((unit, len)));
        }
    }

    #[test]
    fn utf16_direct_units_pass_through() {
        assert_eq!(utf16_to_ucs4(&[0x0041]), Some((0x41, 1)));
        assert_eq!(utf16_to_ucs4(&[0xFFFF, 0x0041]), Some((0xFFFF, 1)));
    }

    #[test]
    fn utf16_decodes_surrogate_pairs() {
        assert_eq!(utf16_to_ucs4(&[0xD800, 0xDC00]), Some((0x10000, 2)));
        assert_eq!(utf16_to_ucs4(&[0xD83D, 0xDE00]), Some((0x1F600, 2)));
        assert_eq!(utf16_to_ucs4(&[0xDBFF, 0xDFFF]), Some((0x10FFFF, 2)));
    }

    #[test]
    fn utf16_rejects_lone_low_surrogate() {
        assert_eq!(utf16_to_ucs4(&[0xDC00]), None);
        assert_eq!(utf16_to_ucs4(&[0xDFFF, 0x0041]), None);
    }

    #[test]
    fn utf16_rejects_unpaired_high_surrogate() {
        assert_eq!(utf16_to_ucs4(&[0xD800]), None);
        assert_eq!(utf16_to_ucs4(&[0xD800, 0x0041]), None);
    }

    #[test]
    fn utf16_empty_input_fails() {
        assert_eq!(utf16_to_ucs4(&[]), None);
    }

    #[test]
    fn exhaustive_utf8_round_trip() {
        let mut buf = [0u8; 4];
        for value in 0..=0x1F_FFFFu32 {
            let len = ucs4_to_utf8(value, &mut buf)
                .unwrap_or_else(|| panic!("encoding 0x{value:06X} failed"));
            let (decoded, consumed) = utf8_to_ucs4(&buf[..len])
                .unwrap_or_else(|| panic!("decoding 0x{value:06X} failed"));
            assert_eq!(decoded, value);
            assert_eq!(consumed, len);
        }
    }
}
