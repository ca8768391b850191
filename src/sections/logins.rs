//! Login credential encode/decode.
//!
//! Format, one record per credential:
//! `[x:1][y:1][username_len:2 BE][password_len:2 BE][username][password]`
//!
//! `x` is the vault entry index and `y` the credential index inside that
//! entry's `entries` map. Older writers paired every top-level key with every
//! other top-level key instead of walking `entries`; that produced records
//! for credentials that did not exist and missed ones whose `y` was not also
//! a top-level key. This codec walks the nested map. Entry names are not on
//! the wire.

use crate::error::Result;
use crate::options::EncodeOptions;
use crate::primitives::{fit_index, fit_text, push_u16, Reader, U16_MAX};
use crate::types::{Credential, LoginsMap};

const SECTION: &str = "logins";

pub fn encode_logins(map: &LoginsMap) -> Result<Vec<u8>> {
    encode_logins_with(map, &EncodeOptions::default())
}

pub fn encode_logins_with(map: &LoginsMap, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut records = 0usize;

    for (&x, entry) in map {
        let x = fit_index("logins.x", x, opts)?;
        for (&y, credential) in &entry.entries {
            let y = fit_index("logins.y", y, opts)?;
            let username = fit_text("logins.username", &credential.username, U16_MAX, opts)?;
            let password = fit_text("logins.password", &credential.password, U16_MAX, opts)?;

            out.push(x);
            out.push(y);
            push_u16(&mut out, username.len() as u16);
            push_u16(&mut out, password.len() as u16);
            out.extend_from_slice(username);
            out.extend_from_slice(password);
            records += 1;
        }
    }

    tracing::debug!(entries = map.len(), records, bytes = out.len(), "encoded logins");
    Ok(out)
}

/// Decode credentials grouped by entry. Entries only exist if they have at
/// least one credential, and their `name` is empty.
pub fn decode_logins(data: &[u8]) -> Result<LoginsMap> {
    let mut reader = Reader::new(SECTION, data);
    let mut map = LoginsMap::new();

    while !reader.is_empty() {
        let x = reader.u8()?;
        let y = reader.u8()?;
        let username_len = reader.u16()? as usize;
        let password_len = reader.u16()? as usize;
        let username = reader.text(username_len)?;
        let password = reader.text(password_len)?;

        map.entry(x as u32)
            .or_default()
            .entries
            .insert(y as u32, Credential { username, password });
    }

    tracing::debug!(entries = map.len(), bytes = data.len(), "decoded logins");
    Ok(map)
}
