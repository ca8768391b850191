//! One encoder/decoder pair per vault section.

pub mod columns;
pub mod logins;
pub mod logins_metadata;
pub mod secure_notes;
pub mod spreadsheet;
pub mod vault_names;
