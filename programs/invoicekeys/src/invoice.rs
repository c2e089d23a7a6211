//! Invoice identifiers
//!
//! An invoice id is an opaque byte string both parties learn out of band. The
//! derivation places no constraint on it; an empty id is accepted but gives
//! every invoice between the same two parties the same key.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Opaque invoice identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InvoiceId(Vec<u8>);

impl InvoiceId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a hex-encoded id
    pub fn from_hex(input: &str) -> Result<Self> {
        Ok(Self(hex::decode(input.trim())?))
    }

    /// Hash a request description and a timestamp into a 32-byte id
    ///
    /// id = SHA256("<description> at <RFC 3339 timestamp>")
    pub fn from_request(description: &str, at: DateTime<Utc>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(description.as_bytes());
        hasher.update(b" at ");
        hasher.update(at.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
        Self(hasher.finalize().to_vec())
    }

    /// [`from_request`](Self::from_request) stamped with the current time
    pub fn from_request_now(description: &str) -> Self {
        Self::from_request(description, Utc::now())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for InvoiceId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for InvoiceId {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<&[u8]> for InvoiceId {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
