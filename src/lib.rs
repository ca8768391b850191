//! Vault codec: compact binary encoding for vault sections (spreadsheet
//! cells, column metadata, secure notes, login metadata, logins, vault
//! names) and the global sync envelope that frames several of them.

pub mod error;
pub mod global_sync;
pub mod options;
pub mod primitives;
pub mod sections;
pub mod types;

pub use error::{CodecError, Result};
pub use global_sync::{
    decode_global_sync, encode_global_sync, encode_global_sync_with, split_global_sync,
    GlobalSync, GlobalSyncRegions, ENVELOPE_HEADER_BYTES, SIZE_FIELD_BYTES,
};
pub use options::{EncodeOptions, OverflowPolicy};
pub use sections::columns::{decode_columns, encode_columns, encode_columns_with};
pub use sections::logins::{decode_logins, encode_logins, encode_logins_with};
pub use sections::logins_metadata::{
    decode_logins_metadata, encode_logins_metadata, encode_logins_metadata_with,
};
pub use sections::secure_notes::{
    decode_secure_notes, encode_secure_notes, encode_secure_notes_with,
};
pub use sections::spreadsheet::{decode_spreadsheet, encode_spreadsheet, encode_spreadsheet_with};
pub use sections::vault_names::{decode_vault_names, encode_vault_names, encode_vault_names_with};
pub use types::{
    Column, Credential, FlexGridColumns, Index, LoginEntry, LoginsMap, LoginsMetadataMap,
    SecureNote, SecureNotesMap, SpreadsheetMap, VaultName, VaultNames,
};
