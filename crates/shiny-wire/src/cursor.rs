// ── Wire format ───────────────────────────────────────────────
//
// Layout per document:
//   [4-byte LE i32 total length][tag][name\0][payload] ... [0x00]
//
// The length prefix counts itself and the trailing terminator byte.
// String payloads carry their own i32 length that counts one trailing
// NUL which is not part of the logical value.

/// Type tags as they appear on the wire.
pub mod tag {
    pub const DOUBLE: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const DOCUMENT: u8 = 0x03;
    pub const ARRAY: u8 = 0x04;
    pub const BINARY: u8 = 0x05;
    pub const OBJECT_ID: u8 = 0x07;
    pub const BOOL: u8 = 0x08;
    pub const DATETIME: u8 = 0x09;
    pub const NULL: u8 = 0x0A;
    pub const REGEX: u8 = 0x0B;
    pub const INT32: u8 = 0x10;
    pub const TIMESTAMP: u8 = 0x11;
    pub const INT64: u8 = 0x12;
}

/// Smallest possible document: length prefix + terminator byte.
pub const MIN_FRAME_LEN: usize = 5;

/// Read a little-endian i32 at `offset`.
///
/// `None` only means fewer than four bytes remain. The returned value is
/// not validated against the buffer; callers decide whether an oversized
/// length is corruption.
pub fn read_frame_len(buf: &[u8], offset: usize) -> Option<i32> {
    let end = offset.checked_add(4)?;
    let raw = buf.get(offset..end)?.try_into().ok()?;
    Some(i32::from_le_bytes(raw))
}

/// Read a NUL-terminated name starting at `pos`.
///
/// The scan is clamped to the buffer: hitting the end without a NUL yields
/// the remainder as the name with the cursor resting at the end.
pub fn read_cstring(buf: &[u8], pos: usize) -> (&[u8], usize) {
    let start = pos.min(buf.len());
    let mut end = start;
    while end < buf.len() && buf[end] != 0x00 {
        end += 1;
    }
    let name = &buf[start..end];
    if end < buf.len() {
        (name, end + 1)
    } else {
        (name, end)
    }
}

/// Advance past one payload of the given type without interpreting it.
///
/// `None` means the tag is unknown or the payload runs past the end of the
/// buffer; either way the scan is over. This layer never reads out of
/// bounds and never panics on malformed input.
pub fn skip_value(buf: &[u8], tag_byte: u8, pos: usize) -> Option<usize> {
    match tag_byte {
        tag::DOUBLE | tag::DATETIME | tag::TIMESTAMP | tag::INT64 => advance(buf, pos, 8),
        tag::STRING => {
            let len = read_frame_len(buf, pos)?;
            if len < 0 {
                return None;
            }
            advance(buf, pos + 4, len as usize)
        }
        tag::DOCUMENT | tag::ARRAY => {
            // The declared length spans the entire sub-region.
            let len = read_frame_len(buf, pos)?;
            if (len as usize) < MIN_FRAME_LEN {
                return None;
            }
            advance(buf, pos, len as usize)
        }
        tag::BINARY => {
            let len = read_frame_len(buf, pos)?;
            if len < 0 {
                return None;
            }
            // length + subtype byte + payload
            advance(buf, pos + 4, 1 + len as usize)
        }
        tag::OBJECT_ID => advance(buf, pos, 12),
        tag::BOOL => advance(buf, pos, 1),
        tag::NULL => Some(pos),
        tag::REGEX => {
            let (_, after_pattern) = read_cstring(buf, pos);
            let (_, after_options) = read_cstring(buf, after_pattern);
            Some(after_options)
        }
        tag::INT32 => advance(buf, pos, 4),
        _ => None,
    }
}

fn advance(buf: &[u8], pos: usize, width: usize) -> Option<usize> {
    let end = pos.checked_add(width)?;
    (end <= buf.len()).then_some(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_len_reads_little_endian() {
        let buf = [0x10, 0x00, 0x00, 0x00, 0xFF];
        assert_eq!(read_frame_len(&buf, 0), Some(16));
    }

    #[test]
    fn frame_len_short_buffer() {
        assert_eq!(read_frame_len(&[0x01, 0x02, 0x03], 0), None);
        assert_eq!(read_frame_len(&[0x01, 0x02, 0x03, 0x04], 1), None);
    }

    #[test]
    fn frame_len_never_validates_magnitude() {
        let buf = [0xFF, 0xFF, 0xFF, 0x7F];
        assert_eq!(read_frame_len(&buf, 0), Some(i32::MAX));
    }

    #[test]
    fn cstring_stops_at_nul() {
        let buf = b"name\0rest";
        let (name, pos) = read_cstring(buf, 0);
        assert_eq!(name, b"name");
        assert_eq!(pos, 5);
    }

    #[test]
    fn cstring_clamps_at_end_of_buffer() {
        let buf = b"unterminated";
        let (name, pos) = read_cstring(buf, 0);
        assert_eq!(name, b"unterminated");
        assert_eq!(pos, buf.len());
    }

    #[test]
    fn cstring_past_end_is_empty() {
        let buf = b"ab";
        let (name, pos) = read_cstring(buf, 10);
        assert_eq!(name, b"");
        assert_eq!(pos, 2);
    }

    #[test]
    fn skip_fixed_width_payloads() {
        let buf = [0u8; 16];
        assert_eq!(skip_value(&buf, tag::DOUBLE, 0), Some(8));
        assert_eq!(skip_value(&buf, tag::INT32, 0), Some(4));
        assert_eq!(skip_value(&buf, tag::INT64, 0), Some(8));
        assert_eq!(skip_value(&buf, tag::OBJECT_ID, 0), Some(12));
        assert_eq!(skip_value(&buf, tag::BOOL, 0), Some(1));
        assert_eq!(skip_value(&buf, tag::NULL, 3), Some(3));
    }

    #[test]
    fn skip_string_uses_declared_length() {
        // i32 len 4, then "abc\0"
        let buf = [0x04, 0x00, 0x00, 0x00, b'a', b'b', b'c', 0x00];
        assert_eq!(skip_value(&buf, tag::STRING, 0), Some(8));
    }

    #[test]
    fn skip_string_truncated_payload() {
        let buf = [0x08, 0x00, 0x00, 0x00, b'a'];
        assert_eq!(skip_value(&buf, tag::STRING, 0), None);
    }

    #[test]
    fn skip_binary_counts_subtype_byte() {
        // len 2, subtype, payload
        let buf = [0x02, 0x00, 0x00, 0x00, 0x00, 0xAA, 0xBB];
        assert_eq!(skip_value(&buf, tag::BINARY, 0), Some(7));
    }

    #[test]
    fn skip_regex_two_cstrings() {
        let buf = b"^abc\0im\0tail";
        assert_eq!(skip_value(buf, tag::REGEX, 0), Some(8));
    }

    #[test]
    fn skip_subdocument_consumes_whole_region() {
        let mut buf = vec![0x05, 0x00, 0x00, 0x00, 0x00];
        buf.push(0xFF);
        assert_eq!(skip_value(&buf, tag::DOCUMENT, 0), Some(5));
    }

    #[test]
    fn skip_unknown_tag_ends_scan() {
        let buf = [0u8; 8];
        assert_eq!(skip_value(&buf, 0x7F, 0), None);
    }

    #[test]
    fn skip_fixed_width_past_end() {
        let buf = [0u8; 4];
        assert_eq!(skip_value(&buf, tag::DOUBLE, 0), None);
    }
}
