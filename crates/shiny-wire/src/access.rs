use crate::cursor::{MIN_FRAME_LEN, read_cstring, read_frame_len, skip_value, tag};
use crate::value::FieldValue;

/// Look up a named scalar field in one document.
///
/// Entries are scanned in encounter order from just past the length prefix;
/// the first name match wins. A match carrying a non-scalar type decodes to
/// `NotFound`, as does a scan exhausted by the terminator tag or by
/// malformed bytes.
pub fn scalar_field(doc: &[u8], name: &str) -> FieldValue {
    match find_entry(doc, name.as_bytes()) {
        Some((tag_byte, pos)) => decode_scalar(doc, tag_byte, pos),
        None => FieldValue::NotFound,
    }
}

/// Look up a named sub-document or array.
///
/// Returns a slice spanning exactly the sub-document's declared length,
/// borrowed from the parent buffer. Any other type at that name, a bad
/// declared length, or no match yields `None`.
pub fn sub_document<'a>(doc: &'a [u8], name: &str) -> Option<&'a [u8]> {
    let (tag_byte, pos) = find_entry(doc, name.as_bytes())?;
    if tag_byte != tag::DOCUMENT && tag_byte != tag::ARRAY {
        return None;
    }
    let len = read_frame_len(doc, pos)?;
    if (len as usize) < MIN_FRAME_LEN {
        return None;
    }
    let end = pos.checked_add(len as usize)?;
    (end <= doc.len()).then(|| &doc[pos..end])
}

/// Resolve a dotted path like `Address.City` by recursive descent.
///
/// The prefix before the first `.` must resolve to a sub-document; a path
/// without a dot is a plain scalar lookup. Every missing link fails closed
/// to `NotFound`.
pub fn nested_field(doc: &[u8], path: &str) -> FieldValue {
    match path.split_once('.') {
        Some((head, rest)) => match sub_document(doc, head) {
            Some(sub) => nested_field(sub, rest),
            None => FieldValue::NotFound,
        },
        None => scalar_field(doc, path),
    }
}

/// Count complete documents in a concatenated buffer.
///
/// A frame is complete iff its declared length is at least
/// [`MIN_FRAME_LEN`] and does not exceed the remaining bytes. The walk
/// stops silently at the first invalid or truncated frame, so the count is
/// exactly how many documents are safe to read.
pub fn count_frames(buf: &[u8]) -> usize {
    let mut offset = 0;
    let mut count = 0;
    while let Some((_, end)) = frame_bounds(buf, offset) {
        offset = end;
        count += 1;
    }
    count
}

/// Borrow the `n`th complete frame, if that many exist.
pub fn nth_frame(buf: &[u8], n: usize) -> Option<&[u8]> {
    let mut offset = 0;
    let mut index = 0;
    while let Some((start, end)) = frame_bounds(buf, offset) {
        if index == n {
            return Some(&buf[start..end]);
        }
        offset = end;
        index += 1;
    }
    None
}

/// Resolve a (possibly dotted) field on the `n`th frame of a concatenated
/// buffer. `NotFound` when fewer than `n + 1` complete frames exist.
pub fn nth_frame_field(buf: &[u8], n: usize, path: &str) -> FieldValue {
    match nth_frame(buf, n) {
        Some(frame) => nested_field(frame, path),
        None => FieldValue::NotFound,
    }
}

fn frame_bounds(buf: &[u8], offset: usize) -> Option<(usize, usize)> {
    let len = read_frame_len(buf, offset)?;
    if (len as usize) < MIN_FRAME_LEN {
        return None;
    }
    let end = offset.checked_add(len as usize)?;
    (end <= buf.len()).then_some((offset, end))
}

/// Scan entries for `name`; first match wins. Returns the matched entry's
/// tag and payload offset, or `None` at the terminator tag or wherever a
/// malformed entry ends the scan.
fn find_entry(doc: &[u8], name: &[u8]) -> Option<(u8, usize)> {
    let mut pos = 4; // skip the outer length prefix
    while pos < doc.len() {
        let tag_byte = doc[pos];
        if tag_byte == 0x00 {
            return None;
        }
        pos += 1;
        let (entry_name, after_name) = read_cstring(doc, pos);
        if entry_name == name {
            return Some((tag_byte, after_name));
        }
        pos = skip_value(doc, tag_byte, after_name)?;
    }
    None
}

fn decode_scalar(doc: &[u8], tag_byte: u8, pos: usize) -> FieldValue {
    match tag_byte {
        tag::DOUBLE => match read_bytes::<8>(doc, pos) {
            Some(raw) => FieldValue::Double(f64::from_le_bytes(raw)),
            None => FieldValue::NotFound,
        },
        tag::INT32 => match read_bytes::<4>(doc, pos) {
            Some(raw) => FieldValue::Int32(i32::from_le_bytes(raw)),
            None => FieldValue::NotFound,
        },
        tag::INT64 => match read_bytes::<8>(doc, pos) {
            Some(raw) => FieldValue::Int64(i64::from_le_bytes(raw)),
            None => FieldValue::NotFound,
        },
        tag::STRING => decode_string(doc, pos),
        _ => FieldValue::NotFound,
    }
}

fn decode_string(doc: &[u8], pos: usize) -> FieldValue {
    let Some(len) = read_frame_len(doc, pos) else {
        return FieldValue::NotFound;
    };
    if len < 0 {
        return FieldValue::NotFound;
    }
    // The declared length counts exactly one trailing NUL that is not part
    // of the logical value; saturate so a declared zero cannot underflow.
    let usable = (len as usize).saturating_sub(1);
    let start = pos + 4;
    let Some(end) = start.checked_add(usable) else {
        return FieldValue::NotFound;
    };
    if end > doc.len() {
        return FieldValue::NotFound;
    }
    FieldValue::Str(String::from_utf8_lossy(&doc[start..end]).into_owned())
}

fn read_bytes<const N: usize>(doc: &[u8], pos: usize) -> Option<[u8; N]> {
    let end = pos.checked_add(N)?;
    doc.get(pos..end)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::rawdoc;

    fn bytes(doc: &bson::raw::RawDocumentBuf) -> &[u8] {
        doc.as_bytes()
    }

    #[test]
    fn scalar_lookup_by_name() {
        let doc = rawdoc! { "EmployeeID": 289_i32, "TotalDue": 51.5, "big": 3_000_000_000_i64 };
        assert_eq!(scalar_field(bytes(&doc), "EmployeeID"), FieldValue::Int32(289));
        assert_eq!(scalar_field(bytes(&doc), "TotalDue"), FieldValue::Double(51.5));
        assert_eq!(scalar_field(bytes(&doc), "big"), FieldValue::Int64(3_000_000_000));
        assert_eq!(scalar_field(bytes(&doc), "missing"), FieldValue::NotFound);
    }

    #[test]
    fn string_drops_counted_trailing_nul() {
        let doc = rawdoc! { "City": "New York" };
        assert_eq!(
            scalar_field(bytes(&doc), "City"),
            FieldValue::Str("New York".into())
        );
    }

    #[test]
    fn empty_string_decodes_empty_not_missing() {
        let doc = rawdoc! { "note": "" };
        assert_eq!(scalar_field(bytes(&doc), "note"), FieldValue::Str(String::new()));
    }

    #[test]
    fn lookup_is_order_independent() {
        // The same field must be reached no matter what precedes it.
        let plain = rawdoc! { "target": 7_i32 };
        let cluttered = rawdoc! {
            "a": 1.5,
            "b": "text",
            "c": { "inner": 1_i32 },
            "d": [1_i32, 2_i32],
            "e": true,
            "f": bson::RawBson::Null,
            "g": 9_i64,
            "target": 7_i32,
        };
        assert_eq!(
            scalar_field(plain.as_bytes(), "target"),
            scalar_field(cluttered.as_bytes(), "target")
        );
    }

    #[test]
    fn first_match_wins_over_later_duplicates() {
        // Hand-build a doc with duplicate names; the encoder won't.
        let mut body = Vec::new();
        body.push(0x10);
        body.extend_from_slice(b"x\0");
        body.extend_from_slice(&1_i32.to_le_bytes());
        body.push(0x10);
        body.extend_from_slice(b"x\0");
        body.extend_from_slice(&2_i32.to_le_bytes());
        body.push(0x00);
        let mut doc = ((body.len() + 4) as i32).to_le_bytes().to_vec();
        doc.extend_from_slice(&body);
        assert_eq!(scalar_field(&doc, "x"), FieldValue::Int32(1));
    }

    #[test]
    fn non_scalar_type_at_name_is_not_found() {
        let doc = rawdoc! { "Address": { "City": "Austin" }, "flags": [1_i32] };
        assert_eq!(scalar_field(bytes(&doc), "Address"), FieldValue::NotFound);
        assert_eq!(scalar_field(bytes(&doc), "flags"), FieldValue::NotFound);
    }

    #[test]
    fn sub_document_spans_declared_length() {
        let inner = rawdoc! { "City": "New York" };
        let doc = rawdoc! { "Address": inner.clone(), "after": 1_i32 };
        let sub = sub_document(bytes(&doc), "Address").unwrap();
        assert_eq!(sub, inner.as_bytes());
    }

    #[test]
    fn sub_document_rejects_scalars() {
        let doc = rawdoc! { "Address": "not a doc" };
        assert!(sub_document(bytes(&doc), "Address").is_none());
        assert!(sub_document(bytes(&doc), "missing").is_none());
    }

    #[test]
    fn nested_field_descends_dotted_path() {
        let doc = rawdoc! {
            "Name": "Alice",
            "Address": { "City": "New York", "Geo": { "Lat": 40.71 } },
        };
        assert_eq!(
            nested_field(bytes(&doc), "Address.City"),
            FieldValue::Str("New York".into())
        );
        assert_eq!(
            nested_field(bytes(&doc), "Address.Geo.Lat"),
            FieldValue::Double(40.71)
        );
        assert_eq!(nested_field(bytes(&doc), "Name"), FieldValue::Str("Alice".into()));
        assert_eq!(nested_field(bytes(&doc), "Address.Zip"), FieldValue::NotFound);
        assert_eq!(nested_field(bytes(&doc), "Missing.City"), FieldValue::NotFound);
    }

    #[test]
    fn nested_equals_manual_descent() {
        let doc = rawdoc! { "A": { "B": 42_i32 } };
        let manual = sub_document(bytes(&doc), "A")
            .map(|sub| scalar_field(sub, "B"))
            .unwrap_or(FieldValue::NotFound);
        assert_eq!(nested_field(bytes(&doc), "A.B"), manual);
    }

    #[test]
    fn concatenated_frames_counted_and_indexed() {
        let first = rawdoc! { "EmployeeID": 289_i32 };
        let second = rawdoc! { "EmployeeID": 288_i32 };
        let mut buf = first.as_bytes().to_vec();
        buf.extend_from_slice(second.as_bytes());

        assert_eq!(count_frames(&buf), 2);
        assert_eq!(nth_frame_field(&buf, 0, "EmployeeID"), FieldValue::Int32(289));
        assert_eq!(nth_frame_field(&buf, 1, "EmployeeID"), FieldValue::Int32(288));
        assert_eq!(nth_frame_field(&buf, 2, "EmployeeID"), FieldValue::NotFound);
    }

    #[test]
    fn nth_frame_matches_isolated_decode() {
        let docs = [
            rawdoc! { "v": 1_i32 },
            rawdoc! { "v": 2_i32, "pad": "xyz" },
            rawdoc! { "v": 3_i32 },
        ];
        let mut buf = Vec::new();
        for doc in &docs {
            buf.extend_from_slice(doc.as_bytes());
        }
        assert_eq!(count_frames(&buf), docs.len());
        for (i, doc) in docs.iter().enumerate() {
            assert_eq!(
                nth_frame_field(&buf, i, "v"),
                scalar_field(doc.as_bytes(), "v")
            );
        }
    }

    #[test]
    fn truncated_buffer_degrades_to_zero_frames() {
        let doc = rawdoc! { "EmployeeID": 289_i32 };
        let full = doc.as_bytes();
        let cut = &full[..full.len() - 3];
        assert_eq!(count_frames(cut), 0);
        assert_eq!(nth_frame_field(cut, 0, "EmployeeID"), FieldValue::NotFound);
    }

    #[test]
    fn trailing_garbage_stops_the_walk() {
        let doc = rawdoc! { "v": 1_i32 };
        let mut buf = doc.as_bytes().to_vec();
        buf.extend_from_slice(&[0x02, 0x00]); // declared len 2 is below minimum
        assert_eq!(count_frames(&buf), 1);
    }

    #[test]
    fn negative_frame_length_is_invalid() {
        let mut buf = (-8_i32).to_le_bytes().to_vec();
        buf.extend_from_slice(&[0u8; 8]);
        assert_eq!(count_frames(&buf), 0);
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(count_frames(&[]), 0);
        assert_eq!(scalar_field(&[], "x"), FieldValue::NotFound);
        assert_eq!(nested_field(&[], "a.b"), FieldValue::NotFound);
    }
}
