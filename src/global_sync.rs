//! Global sync envelope: five sections framed into one buffer.
//!
//! Format:
//! ```text
//! [spreadsheet size:5 BE][columns size:5 BE][secure notes size:5 BE]
//! [spreadsheet][columns][secure notes]
//! [logins metadata size:5 BE][logins metadata]
//! [login cells]   // unsized, runs to the end of the buffer
//! ```
//!
//! The login cell region is a second spreadsheet grid. It carries no size
//! header and must stay last.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::options::EncodeOptions;
use crate::primitives::{push_u40, Reader, U40_MAX};
use crate::sections::columns::{decode_columns, encode_columns_with};
use crate::sections::logins_metadata::{decode_logins_metadata, encode_logins_metadata_with};
use crate::sections::secure_notes::{decode_secure_notes, encode_secure_notes_with};
use crate::sections::spreadsheet::{decode_grid, encode_spreadsheet_with};
use crate::types::{FlexGridColumns, LoginsMetadataMap, SecureNotesMap, SpreadsheetMap};

const SECTION: &str = "global_sync";

/// Size of one region header.
pub const SIZE_FIELD_BYTES: usize = 5;

/// Bytes of framing in every envelope: four sized regions.
pub const ENVELOPE_HEADER_BYTES: usize = 4 * SIZE_FIELD_BYTES;

/// Everything carried by one global sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSync {
    pub spreadsheet: SpreadsheetMap,
    pub columns: FlexGridColumns,
    pub secure_notes: SecureNotesMap,
    pub logins_metadata: LoginsMetadataMap,
    /// Login cell data, encoded with the spreadsheet grid codec.
    pub logins: SpreadsheetMap,
}

impl GlobalSync {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Borrowed view of the five regions of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalSyncRegions<'a> {
    pub spreadsheet: &'a [u8],
    pub columns: &'a [u8],
    pub secure_notes: &'a [u8],
    pub logins_metadata: &'a [u8],
    pub logins: &'a [u8],
}

// ============================================================================
// Encode
// ============================================================================

pub fn encode_global_sync(sync: &GlobalSync) -> Result<Vec<u8>> {
    encode_global_sync_with(sync, &EncodeOptions::default())
}

pub fn encode_global_sync_with(sync: &GlobalSync, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let regions = [
        encode_spreadsheet_with(&sync.spreadsheet, opts)?,
        encode_columns_with(&sync.columns, opts)?,
        encode_secure_notes_with(&sync.secure_notes, opts)?,
        encode_logins_metadata_with(&sync.logins_metadata, opts)?,
        encode_spreadsheet_with(&sync.logins, opts)?,
    ];
    let [spreadsheet, columns, secure_notes, logins_metadata, logins] = &regions;

    let total = ENVELOPE_HEADER_BYTES + regions.iter().map(Vec::len).sum::<usize>();
    let mut out = Vec::with_capacity(total);

    push_size(&mut out, "global_sync.spreadsheet", spreadsheet.len())?;
    push_size(&mut out, "global_sync.columns", columns.len())?;
    push_size(&mut out, "global_sync.secure_notes", secure_notes.len())?;
    out.extend_from_slice(spreadsheet);
    out.extend_from_slice(columns);
    out.extend_from_slice(secure_notes);
    push_size(&mut out, "global_sync.logins_metadata", logins_metadata.len())?;
    out.extend_from_slice(logins_metadata);
    out.extend_from_slice(logins);

    tracing::debug!(
        spreadsheet = spreadsheet.len(),
        columns = columns.len(),
        secure_notes = secure_notes.len(),
        logins_metadata = logins_metadata.len(),
        logins = logins.len(),
        total = out.len(),
        "encoded global sync"
    );
    Ok(out)
}

/// Region sizes never mask: a wrong size would misframe every later region.
fn push_size(out: &mut Vec<u8>, field: &'static str, len: usize) -> Result<()> {
    let len = len as u64;
    if len > U40_MAX {
        return Err(CodecError::ValueOutOfRange {
            field,
            value: len,
            max: U40_MAX,
        });
    }
    push_u40(out, len);
    Ok(())
}

// ============================================================================
// Decode
// ============================================================================

/// Split an envelope into its regions without decoding them.
pub fn split_global_sync(data: &[u8]) -> Result<GlobalSyncRegions<'_>> {
    let mut reader = Reader::new(SECTION, data);

    let spreadsheet_len = read_size(&mut reader)?;
    let columns_len = read_size(&mut reader)?;
    let secure_notes_len = read_size(&mut reader)?;

    let spreadsheet = reader.take(spreadsheet_len)?;
    let columns = reader.take(columns_len)?;
    let secure_notes = reader.take(secure_notes_len)?;
    tracing::trace!(offset = reader.position(), "leading regions framed");

    let logins_metadata_len = read_size(&mut reader)?;
    let logins_metadata = reader.take(logins_metadata_len)?;
    let logins = reader.rest();
    tracing::trace!(logins = logins.len(), "trailing region framed");

    Ok(GlobalSyncRegions {
        spreadsheet,
        columns,
        secure_notes,
        logins_metadata,
        logins,
    })
}

fn read_size(reader: &mut Reader<'_>) -> Result<usize> {
    let size = reader.u40()?;
    usize::try_from(size)
        .map_err(|_| reader.framing(format!("region size {} exceeds address space", size)))
}

pub fn decode_global_sync(data: &[u8]) -> Result<GlobalSync> {
    let regions = split_global_sync(data)?;

    let sync = GlobalSync {
        spreadsheet: decode_grid("spreadsheet", regions.spreadsheet)?,
        columns: decode_columns(regions.columns)?,
        secure_notes: decode_secure_notes(regions.secure_notes)?,
        logins_metadata: decode_logins_metadata(regions.logins_metadata)?,
        logins: decode_grid("logins", regions.logins)?,
    };

    tracing::debug!(bytes = data.len(), "decoded global sync");
    Ok(sync)
}
