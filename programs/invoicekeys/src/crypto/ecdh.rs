//! ECDH shared secret
//!
//! Both parties compute `S = own_private · counterpart_public`. Because
//! `a·(b·G) = b·(a·G)`, the payer and the payee arrive at the same point and,
//! given the same [`SecretEncoding`], the same bytes.

use tracing::trace;
use zeroize::Zeroize;

use super::curve::{scalar_multiply, Point};
use super::keys::SecretScalar;
use crate::error::{InvoiceKeyError, Result};

/// Byte encoding of the shared point used as HMAC key material.
///
/// Both parties in a deployment must use the same convention: it changes the
/// tweak and therefore every derived key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SecretEncoding {
    /// 33-byte compressed point (parity prefix + x)
    #[default]
    Compressed,
    /// 32-byte x-coordinate only
    XOnly,
}

impl SecretEncoding {
    /// Encoded length in bytes
    pub fn encoded_len(&self) -> usize {
        match self {
            SecretEncoding::Compressed => 33,
            SecretEncoding::XOnly => 32,
        }
    }
}

impl std::fmt::Display for SecretEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretEncoding::Compressed => write!(f, "compressed"),
            SecretEncoding::XOnly => write!(f, "x-only"),
        }
    }
}

/// Encoded ECDH shared point. Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex encoding (use carefully)
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Compute the shared secret `own_private · counterpart_public`, encoded per
/// `encoding`.
///
/// Fails with `InvalidPoint` if the counterpart key is the identity. Decoded
/// points are already on the curve, so a non-identity counterpart and a
/// non-zero scalar always give a non-identity product.
pub fn compute_shared_secret(
    own_private: &SecretScalar,
    counterpart_public: &Point,
    encoding: SecretEncoding,
) -> Result<SharedSecret> {
    if counterpart_public.is_identity() {
        return Err(InvoiceKeyError::InvalidPoint("counterpart public key is the identity".into()));
    }
    let shared_point = scalar_multiply(counterpart_public, &own_private.to_scalar());

    let bytes = match encoding {
        SecretEncoding::Compressed => shared_point.to_compressed()?.to_vec(),
        SecretEncoding::XOnly => shared_point.x_only()?.to_vec(),
    };
    trace!(%encoding, len = bytes.len(), "computed ECDH shared secret");

    Ok(SharedSecret { bytes })
}
