//! Invoice-keyed Diffie-Hellman key derivation over secp256k1
//!
//! Two parties with long-term key pairs (a, A) and (b, B) derive a one-time
//! key pair per invoice without talking to each other:
//!
//! - payer: `P = HMAC-SHA256(a·B, invoice)·G + B`
//! - payee: `p = b + HMAC-SHA256(b·A, invoice) mod N`
//!
//! and `p·G == P`. See [`crypto::derive`] for the protocol walk-through.

pub mod crypto;
pub mod error;
pub mod invoice;


#[cfg(test)]
mod test_vectors;


pub use crypto::{
    base_point_multiply, compute_shared_secret, decompress, derive_private_key,
    derive_public_key, derive_tweak, keys_match, point_add, reduce_scalar, scalar_multiply,
    serialize_compressed, InvoiceSession, KeyPair, Point, Scalar, SecretEncoding, SecretScalar,
    SharedSecret,
};
pub use error::{InvoiceKeyError, Result};
pub use invoice::InvoiceId;
