//! Vault name list encode/decode.
//!
//! Format: `[id_len:1][name_len:2 BE][id_len raw bytes][name_len bytes: UTF-8 name]`
//!
//! Records follow list order. `None` slots are skipped.

use crate::error::Result;
use crate::options::EncodeOptions;
use crate::primitives::{fit_bytes, fit_text, push_u16, Reader, U16_MAX, U8_MAX};
use crate::types::{VaultName, VaultNames};

const SECTION: &str = "vault_names";

pub fn encode_vault_names(names: &[Option<VaultName>]) -> Result<Vec<u8>> {
    encode_vault_names_with(names, &EncodeOptions::default())
}

pub fn encode_vault_names_with(names: &[Option<VaultName>], opts: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for name in names.iter().flatten() {
        let id = fit_bytes("vault_names.vault_id", &name.vault_id, U8_MAX, opts)?;
        let display = fit_text("vault_names.vault_name", &name.vault_name, U16_MAX, opts)?;

        out.push(id.len() as u8);
        push_u16(&mut out, display.len() as u16);
        out.extend_from_slice(id);
        out.extend_from_slice(display);
    }

    tracing::debug!(names = names.len(), bytes = out.len(), "encoded vault names");
    Ok(out)
}

/// Decode vault names. Every returned slot is `Some`.
pub fn decode_vault_names(data: &[u8]) -> Result<VaultNames> {
    let mut reader = Reader::new(SECTION, data);
    let mut names = VaultNames::new();

    while !reader.is_empty() {
        let id_len = reader.u8()? as usize;
        let name_len = reader.u16()? as usize;
        let vault_id = reader.take(id_len)?.to_vec();
        let vault_name = reader.text(name_len)?;
        names.push(Some(VaultName {
            vault_id,
            vault_name,
        }));
    }

    tracing::debug!(names = names.len(), bytes = data.len(), "decoded vault names");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn single_name() {
        let names = vec![Some(VaultName::new(vec![0xaa, 0xbb], "Home"))];
        let encoded = encode_vault_names(&names).unwrap();
        assert_eq!(encoded, vec![2, 0, 4, 0xaa, 0xbb, b'H', b'o', b'm', b'e']);
        assert_eq!(decode_vault_names(&encoded).unwrap(), names);
    }

    #[test]
    fn empty_list() {
        assert!(encode_vault_names(&[]).unwrap().is_empty());
        assert!(decode_vault_names(&[]).unwrap().is_empty());
    }

    #[test]
    fn none_slots_are_skipped() {
        let names = vec![
            None,
            Some(VaultName::new(vec![1], "A")),
            None,
            Some(VaultName::new(Vec::new(), "")),
        ];
        let encoded = encode_vault_names(&names).unwrap();
        assert_eq!(encoded, vec![1, 0, 1, 1, b'A', 0, 0, 0]);

        let decoded = decode_vault_names(&encoded).unwrap();
        assert_eq!(decoded, vec![names[1].clone(), names[3].clone()]);
    }

    #[test]
    fn order_is_preserved() {
        let names = vec![
            Some(VaultName::new(vec![9], "Zeta")),
            Some(VaultName::new(vec![1], "Alpha")),
        ];
        let decoded = decode_vault_names(&encode_vault_names(&names).unwrap()).unwrap();
        assert_eq!(decoded, names);
    }

    #[test]
    fn long_id_is_reported() {
        let names = vec![Some(VaultName::new(vec![7u8; 256], "big"))];
        assert!(matches!(
            encode_vault_names(&names),
            Err(CodecError::ValueOutOfRange { field: "vault_names.vault_id", value: 256, max: 255 })
        ));

        let encoded = encode_vault_names_with(&names, &EncodeOptions::masking()).unwrap();
        let decoded = decode_vault_names(&encoded).unwrap();
        let name = decoded[0].as_ref().unwrap();
        assert_eq!(name.vault_id.len(), 255);
        assert_eq!(name.vault_name, "big");
    }

    #[test]
    fn truncated_id_is_framing_error() {
        let err = decode_vault_names(&[4, 0, 0, 1, 2]).unwrap_err();
        assert!(matches!(err, CodecError::Framing { section: "vault_names", offset: 3, .. }));
    }
}
