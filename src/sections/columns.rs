//! Column metadata encode/decode.
//!
//! Format: `[len:2 BE][hidden:1][column:1][UTF-8 name]`
//!
//! Two legacy quirks are part of the format:
//! - `len` counts UTF-16 code units of the name, not bytes. The decoder walks
//!   UTF-8 characters until that many code units have been consumed.
//! - the flag byte is inverted: `0x00` means hidden, `0x01` means visible.

use crate::error::{CodecError, Result};
use crate::options::{EncodeOptions, OverflowPolicy};
use crate::primitives::{fit_index, push_u16, Reader, U16_MAX};
use crate::types::{Column, FlexGridColumns};

const SECTION: &str = "columns";

const FLAG_HIDDEN: u8 = 0x00;
const FLAG_VISIBLE: u8 = 0x01;

pub fn encode_columns(map: &FlexGridColumns) -> Result<Vec<u8>> {
    encode_columns_with(map, &EncodeOptions::default())
}

pub fn encode_columns_with(map: &FlexGridColumns, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for (&index, column) in map {
        let index = fit_index("columns.index", index, opts)?;
        let name = fit_name(&column.name, opts)?;
        let units = name.encode_utf16().count();

        push_u16(&mut out, units as u16);
        out.push(if column.hidden { FLAG_HIDDEN } else { FLAG_VISIBLE });
        out.push(index);
        out.extend_from_slice(name.as_bytes());
    }

    tracing::debug!(columns = map.len(), bytes = out.len(), "encoded columns");
    Ok(out)
}

/// The name as written: at most `U16_MAX` UTF-16 code units.
fn fit_name<'a>(name: &'a str, opts: &EncodeOptions) -> Result<&'a str> {
    let units = name.encode_utf16().count();
    if units <= U16_MAX {
        return Ok(name);
    }
    match opts.overflow {
        OverflowPolicy::Reject => Err(CodecError::ValueOutOfRange {
            field: "columns.name",
            value: units as u64,
            max: U16_MAX as u64,
        }),
        OverflowPolicy::Mask => {
            let mut kept = 0;
            let mut end = 0;
            for c in name.chars() {
                if kept + c.len_utf16() > U16_MAX {
                    break;
                }
                kept += c.len_utf16();
                end += c.len_utf8();
            }
            tracing::warn!(units, kept, "column name truncated");
            Ok(&name[..end])
        }
    }
}

pub fn decode_columns(data: &[u8]) -> Result<FlexGridColumns> {
    let mut reader = Reader::new(SECTION, data);
    let mut map = FlexGridColumns::new();

    while !reader.is_empty() {
        let units = reader.u16()? as usize;
        let hidden = match reader.u8()? {
            FLAG_HIDDEN => true,
            FLAG_VISIBLE => false,
            other => return Err(reader.framing(format!("invalid hidden flag 0x{:02x}", other))),
        };
        let index = reader.u8()?;
        let name = read_utf16_units(&mut reader, units)?;
        map.insert(index as u32, Column { name, hidden });
    }

    tracing::debug!(columns = map.len(), bytes = data.len(), "decoded columns");
    Ok(map)
}

/// Read UTF-8 characters until `units` UTF-16 code units are consumed.
fn read_utf16_units(reader: &mut Reader<'_>, units: usize) -> Result<String> {
    let mut name = String::new();
    let mut seen = 0usize;

    while seen < units {
        let lead = reader
            .peek()
            .ok_or_else(|| reader.framing(format!("name ended after {} of {} units", seen, units)))?;
        let width = match lead {
            0x00..=0x7f => 1,
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Err(reader.framing(format!("invalid UTF-8 lead byte 0x{:02x}", lead))),
        };
        let bytes = reader.take(width)?;
        let c = std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| reader.framing("invalid UTF-8 in column name"))?;

        seen += c.len_utf16();
        if seen > units {
            return Err(reader.framing("column name splits a surrogate pair"));
        }
        name.push(c);
    }

    Ok(name)
}
