//! Integration tests for the global sync envelope and JSON-shaped input.

use vault_codec::{
    decode_global_sync, encode_global_sync, encode_global_sync_with, encode_logins_metadata,
    encode_secure_notes, encode_spreadsheet, split_global_sync, CodecError, EncodeOptions,
    GlobalSync, LoginsMetadataMap, SecureNote, SecureNotesMap, SpreadsheetMap,
    ENVELOPE_HEADER_BYTES,
};

// ============================================================================
// Helpers
// ============================================================================

const VAULT_JSON: &str = r#"{
    "spreadsheet": { "1": { "2": "A" } },
    "columns": { "1": { "name": "name", "hidden": false } },
    "secure_notes": { "3": { "label": "foo", "note": "bar" } },
    "logins_metadata": { "4": "meta" },
    "logins": { "5": { "6": "B" } }
}"#;

fn vault() -> GlobalSync {
    GlobalSync::from_json(VAULT_JSON).expect("parse vault json")
}

// ============================================================================
// Byte layout
// ============================================================================

#[test]
fn reference_vault_bytes() {
    let encoded = encode_global_sync(&vault()).unwrap();
    let expected = concat!(
        "0000000005", // spreadsheet size
        "0000000008", // columns size
        "000000000a", // secure notes size
        "0001010241", // spreadsheet: len 1, (1,2), "A"
        "00040101", "6e616d65", // columns: len 4, visible, col 1, "name"
        "03000303", "666f6f", "626172", // note: label 3, note 3, index 3
        "0000000007", // logins metadata size
        "000404", "6d657461", // logins metadata: len 4, index 4, "meta"
        "0001050642", // login cells: len 1, (5,6), "B"
    );
    assert_eq!(hex::encode(&encoded), expected);
}

#[test]
fn total_length_is_headers_plus_regions() {
    let sync = vault();
    let encoded = encode_global_sync(&sync).unwrap();
    let regions = split_global_sync(&encoded).unwrap();
    let payload = regions.spreadsheet.len()
        + regions.columns.len()
        + regions.secure_notes.len()
        + regions.logins_metadata.len()
        + regions.logins.len();
    assert_eq!(encoded.len(), ENVELOPE_HEADER_BYTES + payload);
}

#[test]
fn trailing_region_is_whatever_remains() {
    let encoded = encode_global_sync(&vault()).unwrap();
    let mut extended = encoded.clone();
    // One more login cell appended after the fact.
    extended.extend_from_slice(&[0, 1, 7, 7, b'C']);

    let decoded = decode_global_sync(&extended).unwrap();
    assert_eq!(decoded.logins[&5][&6], "B");
    assert_eq!(decoded.logins[&7][&7], "C");
}

#[test]
fn truncated_envelope_is_rejected() {
    let encoded = encode_global_sync(&vault()).unwrap();
    for cut in [3, 14, 20, 30] {
        let err = decode_global_sync(&encoded[..cut]).unwrap_err();
        assert!(
            matches!(err, CodecError::Framing { .. }),
            "cut at {cut}: {err:?}"
        );
    }
}

#[test]
fn partial_trailing_cell_is_rejected() {
    let encoded = encode_global_sync(&vault()).unwrap();
    let err = decode_global_sync(&encoded[..encoded.len() - 1]).unwrap_err();
    assert!(matches!(err, CodecError::Framing { section: "logins", .. }));
}

#[test]
fn sections_encoded_separately_match_regions() {
    let sync = vault();
    let encoded = encode_global_sync(&sync).unwrap();
    let regions = split_global_sync(&encoded).unwrap();
    assert_eq!(regions.spreadsheet, encode_spreadsheet(&sync.spreadsheet).unwrap());
    assert_eq!(regions.secure_notes, encode_secure_notes(&sync.secure_notes).unwrap());
    assert_eq!(
        regions.logins_metadata,
        encode_logins_metadata(&sync.logins_metadata).unwrap()
    );
}

// ============================================================================
// Overflow policy across the envelope
// ============================================================================

#[test]
fn strict_envelope_fails_whole_encode() {
    let mut sync = vault();
    sync.logins_metadata.insert(300, "wide".to_string());
    assert!(matches!(
        encode_global_sync(&sync),
        Err(CodecError::ValueOutOfRange { field: "logins_metadata.index", value: 300, .. })
    ));
}

#[test]
fn masking_envelope_collapses_wide_indices() {
    let mut sync = GlobalSync::default();
    sync.logins_metadata =
        LoginsMetadataMap::from([(0, "zero".to_string()), (256, "wide".to_string())]);

    let encoded = encode_global_sync_with(&sync, &EncodeOptions::masking()).unwrap();
    let decoded = decode_global_sync(&encoded).unwrap();
    assert_eq!(decoded.logins_metadata.len(), 1);
    assert_eq!(decoded.logins_metadata[&0], "wide");
}

// ============================================================================
// Absent vs empty
// ============================================================================

#[test]
fn absent_and_empty_notes_differ_on_the_wire() {
    let absent: SecureNotesMap = [(5, None)].into_iter().collect();
    let empty: SecureNotesMap = [(5, Some(SecureNote::default()))].into_iter().collect();

    assert!(encode_secure_notes(&absent).unwrap().is_empty());
    assert_eq!(encode_secure_notes(&empty).unwrap(), vec![0, 0, 0, 5]);
}

#[test]
fn empty_cell_is_header_only_inside_envelope() {
    let mut sync = GlobalSync::default();
    sync.spreadsheet = SpreadsheetMap::from([(5, [(6, String::new())].into_iter().collect())]);
    let encoded = encode_global_sync(&sync).unwrap();
    assert_eq!(encoded.len(), ENVELOPE_HEADER_BYTES + 4);
    assert_eq!(decode_global_sync(&encoded).unwrap(), sync);
}
