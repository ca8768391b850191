//! Secure notes encode/decode.
//!
//! Format: `[label_len:1][note_len:2 BE][index:1][label bytes][note bytes]`
//!
//! Absent notes (`None`) emit nothing. A note with an empty label and body
//! still emits its 4-byte header.

use crate::error::Result;
use crate::options::EncodeOptions;
use crate::primitives::{fit_index, fit_text, push_u16, Reader, U16_MAX, U8_MAX};
use crate::types::{SecureNote, SecureNotesMap};

const SECTION: &str = "secure_notes";

pub fn encode_secure_notes(map: &SecureNotesMap) -> Result<Vec<u8>> {
    encode_secure_notes_with(map, &EncodeOptions::default())
}

pub fn encode_secure_notes_with(map: &SecureNotesMap, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut written = 0usize;

    for (&index, note) in map {
        let Some(note) = note else { continue };

        let index = fit_index("secure_notes.index", index, opts)?;
        let label = fit_text("secure_notes.label", &note.label, U8_MAX, opts)?;
        let body = fit_text("secure_notes.note", &note.note, U16_MAX, opts)?;

        out.push(label.len() as u8);
        push_u16(&mut out, body.len() as u16);
        out.push(index);
        out.extend_from_slice(label);
        out.extend_from_slice(body);
        written += 1;
    }

    tracing::debug!(
        notes = written,
        skipped = map.len() - written,
        bytes = out.len(),
        "encoded secure notes"
    );
    Ok(out)
}

/// Decode secure notes. Every returned entry is `Some`.
pub fn decode_secure_notes(data: &[u8]) -> Result<SecureNotesMap> {
    let mut reader = Reader::new(SECTION, data);
    let mut map = SecureNotesMap::new();

    while !reader.is_empty() {
        let label_len = reader.u8()? as usize;
        let note_len = reader.u16()? as usize;
        let index = reader.u8()?;
        let label = reader.text(label_len)?;
        let note = reader.text(note_len)?;
        map.insert(index as u32, Some(SecureNote { label, note }));
    }

    tracing::debug!(notes = map.len(), bytes = data.len(), "decoded secure notes");
    Ok(map)
}
