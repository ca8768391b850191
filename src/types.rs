//! Container types for the vault sections.
//!
//! Every numeric-keyed container is a `BTreeMap`, so iteration (and with it
//! the order of records on the wire) is ascending by key. Keys are `u32` to
//! match what host applications hand over; only the low byte reaches the
//! wire (see `OverflowPolicy`).

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Row, column, or entry index as supplied by the caller.
pub type Index = u32;

/// Sparse grid of cell text: x → y → value.
pub type SpreadsheetMap = BTreeMap<Index, BTreeMap<Index, String>>;

/// Column metadata keyed by column index.
pub type FlexGridColumns = BTreeMap<Index, Column>;

/// Secure notes keyed by index. `None` entries are skipped on encode.
pub type SecureNotesMap = BTreeMap<Index, Option<SecureNote>>;

/// Login metadata text keyed by index.
pub type LoginsMetadataMap = BTreeMap<Index, String>;

/// Login entries keyed by vault entry index.
pub type LoginsMap = BTreeMap<Index, LoginEntry>;

/// Ordered vault name list. `None` slots are skipped on encode.
pub type VaultNames = Vec<Option<VaultName>>;

// ============================================================================
// Columns
// ============================================================================

/// Display metadata for one spreadsheet column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub name: String,
    pub hidden: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, hidden: bool) -> Self {
        Self {
            name: name.into(),
            hidden,
        }
    }
}

// ============================================================================
// Secure notes
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureNote {
    pub label: String,
    pub note: String,
}

impl SecureNote {
    pub fn new(label: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            note: note.into(),
        }
    }
}

// ============================================================================
// Logins
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// One vault entry and its credentials keyed by y.
///
/// `name` is not part of the login wire format and decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entries: BTreeMap<Index, Credential>,
}

// ============================================================================
// Vault names
// ============================================================================

/// A vault identifier and its display name.
///
/// In JSON the identifier is standard base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultName {
    #[serde(with = "base64_bytes")]
    pub vault_id: Vec<u8>,
    pub vault_name: String,
}

impl VaultName {
    pub fn new(vault_id: impl Into<Vec<u8>>, vault_name: impl Into<String>) -> Self {
        Self {
            vault_id: vault_id.into(),
            vault_name: vault_name.into(),
        }
    }

    /// Build from a base64-encoded identifier.
    pub fn from_base64_id(vault_id: &str, vault_name: impl Into<String>) -> Result<Self> {
        let vault_id = STANDARD
            .decode(vault_id)
            .map_err(|e| CodecError::Base64(e.to_string()))?;
        Ok(Self {
            vault_id,
            vault_name: vault_name.into(),
        })
    }

    pub fn vault_id_base64(&self) -> String {
        STANDARD.encode(&self.vault_id)
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
