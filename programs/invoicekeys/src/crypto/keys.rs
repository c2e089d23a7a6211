//! Long-term key pairs
//!
//! Security features:
//! - Private scalars are validated to lie in `[1, N-1]` on construction
//! - Secret bytes are zeroized on drop
//! - Debug output never includes the secret

use k256::NonZeroScalar;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use super::curve::{base_point_multiply, decode_fixed, reduce_scalar, Point, Scalar, SCALAR_LEN};
use crate::error::{InvoiceKeyError, Result};

// ============================================================================
// Zeroizing Scalar Wrapper
// ============================================================================

/// A private scalar in `[1, N-1]` that zeroizes its bytes on drop
#[derive(Clone)]
pub struct SecretScalar {
    bytes: [u8; 32],
}

impl SecretScalar {
    /// Create from big-endian bytes, rejecting zero and values `>= N`
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let scalar = Scalar::from_canonical_bytes(bytes)?;
        Self::from_scalar(&scalar)
    }

    /// Create from a slice that must be exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SCALAR_LEN {
            return Err(InvoiceKeyError::InvalidLength {
                expected: SCALAR_LEN,
                actual: bytes.len(),
            });
        }
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        let result = Self::from_bytes(&buf);
        buf.zeroize();
        result
    }

    /// Create from a 64-character hex string
    pub fn from_hex(input: &str) -> Result<Self> {
        let mut bytes = decode_fixed::<32>(input)?;
        let result = Self::from_bytes(&bytes);
        bytes.zeroize();
        result
    }

    /// Create from a scalar, rejecting zero
    pub fn from_scalar(scalar: &Scalar) -> Result<Self> {
        if scalar.is_zero() {
            return Err(InvoiceKeyError::InvalidScalar("private key must be non-zero".into()));
        }
        Ok(Self { bytes: scalar.to_bytes() })
    }

    /// Get as a curve scalar
    pub fn to_scalar(&self) -> Scalar {
        // Stored bytes are canonical, so the reduction leaves them unchanged
        reduce_scalar(&self.bytes)
    }

    /// Get the raw bytes (use carefully)
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Hex encoding of the raw bytes (use carefully)
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// `self · G`
    pub fn public_point(&self) -> Point {
        base_point_multiply(&self.to_scalar())
    }
}

impl Drop for SecretScalar {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretScalar").finish_non_exhaustive()
    }
}

// ============================================================================
// Key Pair
// ============================================================================

/// A long-term key pair: private scalar `d` and public point `D = d·G`
///
/// The public point is always computed from the secret, so the two can never
/// disagree.
///
/// Clone is NOT derived to prevent accidental copies of the secret.
pub struct KeyPair {
    secret: SecretScalar,
    public: Point,
}

impl KeyPair {
    /// Generate a new random key pair from OS entropy
    pub fn generate() -> Self {
        let scalar = NonZeroScalar::random(&mut OsRng);
        let secret = SecretScalar {
            bytes: Scalar(*scalar.as_ref()).to_bytes(),
        };
        Self::from_secret(secret)
    }

    /// Build the pair from a validated private scalar
    pub fn from_secret(secret: SecretScalar) -> Self {
        let public = secret.public_point();
        Self { secret, public }
    }

    /// Reconstruct from stored private key bytes
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Ok(Self::from_secret(SecretScalar::from_bytes(bytes)?))
    }

    /// Reconstruct from a hex private key
    pub fn from_secret_hex(input: &str) -> Result<Self> {
        Ok(Self::from_secret(SecretScalar::from_hex(input)?))
    }

    /// The private scalar
    pub fn secret(&self) -> &SecretScalar {
        &self.secret
    }

    /// The public point `secret · G`
    pub fn public(&self) -> &Point {
        &self.public
    }

    /// Compressed public key
    pub fn public_compressed(&self) -> Result<[u8; 33]> {
        self.public.to_compressed()
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public.to_hex().ok())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
