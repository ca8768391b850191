//! Spreadsheet grid encode/decode.
//!
//! Format, one record per cell, no separators:
//! `[len:2 BE][x:1][y:1][len bytes: UTF-8 value]`
//!
//! The same codec carries the login cell grid inside the global sync envelope.

use crate::error::Result;
use crate::options::EncodeOptions;
use crate::primitives::{fit_index, fit_text, push_u16, Reader, U16_MAX};
use crate::types::SpreadsheetMap;

const SECTION: &str = "spreadsheet";

/// Encode a grid with the default (strict) options.
pub fn encode_spreadsheet(map: &SpreadsheetMap) -> Result<Vec<u8>> {
    encode_spreadsheet_with(map, &EncodeOptions::default())
}

/// Encode a grid, cells in ascending (x, y) order.
pub fn encode_spreadsheet_with(map: &SpreadsheetMap, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut cells = 0usize;

    for (&x, row) in map {
        let x = fit_index("spreadsheet.x", x, opts)?;
        for (&y, value) in row {
            let y = fit_index("spreadsheet.y", y, opts)?;
            let bytes = fit_text("spreadsheet.value", value, U16_MAX, opts)?;

            push_u16(&mut out, bytes.len() as u16);
            out.push(x);
            out.push(y);
            out.extend_from_slice(bytes);
            cells += 1;
        }
    }

    tracing::debug!(cells, bytes = out.len(), "encoded spreadsheet");
    Ok(out)
}

/// Decode a grid. Cells sharing a coordinate keep the last value.
pub fn decode_spreadsheet(data: &[u8]) -> Result<SpreadsheetMap> {
    decode_grid(SECTION, data)
}

pub(crate) fn decode_grid(section: &'static str, data: &[u8]) -> Result<SpreadsheetMap> {
    let mut reader = Reader::new(section, data);
    let mut map = SpreadsheetMap::new();
    let mut cells = 0usize;

    while !reader.is_empty() {
        let len = reader.u16()? as usize;
        let x = reader.u8()?;
        let y = reader.u8()?;
        let value = reader.text(len)?;
        map.entry(x as u32).or_default().insert(y as u32, value);
        cells += 1;
    }

    tracing::debug!(section, cells, bytes = data.len(), "decoded grid");
    Ok(map)
}
