//! Logins metadata encode/decode.
//!
//! Format: `[len:2 BE][index:1][len bytes: UTF-8 value]`

use crate::error::Result;
use crate::options::EncodeOptions;
use crate::primitives::{fit_index, fit_text, push_u16, Reader, U16_MAX};
use crate::types::LoginsMetadataMap;

const SECTION: &str = "logins_metadata";

pub fn encode_logins_metadata(map: &LoginsMetadataMap) -> Result<Vec<u8>> {
    encode_logins_metadata_with(map, &EncodeOptions::default())
}

pub fn encode_logins_metadata_with(
    map: &LoginsMetadataMap,
    opts: &EncodeOptions,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for (&index, value) in map {
        let index = fit_index("logins_metadata.index", index, opts)?;
        let bytes = fit_text("logins_metadata.value", value, U16_MAX, opts)?;

        push_u16(&mut out, bytes.len() as u16);
        out.push(index);
        out.extend_from_slice(bytes);
    }

    tracing::debug!(entries = map.len(), bytes = out.len(), "encoded logins metadata");
    Ok(out)
}

pub fn decode_logins_metadata(data: &[u8]) -> Result<LoginsMetadataMap> {
    let mut reader = Reader::new(SECTION, data);
    let mut map = LoginsMetadataMap::new();

    while !reader.is_empty() {
        let len = reader.u16()? as usize;
        let index = reader.u8()?;
        let value = reader.text(len)?;
        map.insert(index as u32, value);
    }

    tracing::debug!(entries = map.len(), bytes = data.len(), "decoded logins metadata");
    Ok(map)
}
