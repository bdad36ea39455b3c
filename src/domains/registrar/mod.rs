//! Reg.ru API access: wire types, form encoding, errors and the HTTP client.

pub mod client;
pub mod error;
pub mod form;
pub mod types;

#[cfg(test)]
pub mod mock;

pub use client::{DEFAULT_BASE_URL, RegistrarApi, RegruClient, endpoints};
pub use error::{RegistrarError, RegistrarResult};
pub use form::FormParams;
pub use types::{ActionKind, ApiResponse, CaaTag, DnsRecord, RecordType, ZoneAction};
