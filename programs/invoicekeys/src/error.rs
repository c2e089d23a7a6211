//! Error types for invoice key derivation.

use thiserror::Error;

/// Errors surfaced by the derivation core.
///
/// Every fallible operation returns one of these immediately; nothing is
/// retried and no zero scalar or identity point is substituted on failure.
#[derive(Debug, Error)]
pub enum InvoiceKeyError {
    /// The bytes do not encode a point on secp256k1, or encode the identity.
    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    /// The scalar is zero or not below the group order where a private key is required.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// The point at infinity has no compressed encoding.
    #[error("Cannot encode the identity point")]
    IdentityPointEncoding,

    /// A fixed-width input had the wrong length.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex input could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, InvoiceKeyError>;
