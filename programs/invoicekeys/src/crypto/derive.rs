//! Invoice key derivation
//!
//! ## Protocol Overview
//!
//! ### Setup
//! 1. Payer holds (a, A) where A = a·G
//! 2. Payee holds (b, B) where B = b·G
//! 3. Both know the counterpart's public key and a shared invoice id I
//!
//! ### Payer Flow
//! 1. Compute shared secret: S = a·B
//! 2. Compute tweak: t = HMAC-SHA256(S, I) mod N
//! 3. Derive one-time public key: P = t·G + B
//!
//! ### Payee Flow
//! 1. Compute shared secret: S = b·A (same as payer!)
//! 2. Compute tweak: t = HMAC-SHA256(S, I) mod N
//! 3. Derive one-time private key: p = b + t mod N
//!
//! p·G = (b + t)·G = t·G + B = P, so the payee can spend what the payer
//! locked to P.

use subtle::ConstantTimeEq;
use tracing::debug;

use super::curve::{base_point_multiply, point_add, Point, Scalar};
use super::ecdh::{compute_shared_secret, SecretEncoding, SharedSecret};
use super::keys::{KeyPair, SecretScalar};
use super::tweak::derive_tweak;
use crate::error::{InvoiceKeyError, Result};

// ============================================================================
// Derivation Primitives
// ============================================================================

/// Payer side: `tweak·G + counterpart_public`
pub fn derive_public_key(counterpart_public: &Point, tweak: &Scalar) -> Point {
    point_add(&base_point_multiply(tweak), counterpart_public)
}

/// Payee side: `(own_private + tweak) mod N`
///
/// Fails with `InvalidScalar` if the sum is zero, i.e. the tweak is exactly
/// `N - own_private`.
pub fn derive_private_key(own_private: &SecretScalar, tweak: &Scalar) -> Result<SecretScalar> {
    let sum = own_private.to_scalar() + *tweak;
    SecretScalar::from_scalar(&sum)
        .map_err(|_| InvoiceKeyError::InvalidScalar("derived private key is zero".into()))
}

/// Check that a payer-derived public key belongs to a payee-derived private key
///
/// Compares compressed encodings in constant time. The identity never matches.
pub fn keys_match(derived_public: &Point, derived_private: &SecretScalar) -> bool {
    let (Ok(expected), Ok(actual)) = (
        derived_public.to_compressed(),
        derived_private.public_point().to_compressed(),
    ) else {
        return false;
    };

    bool::from(expected[..].ct_eq(&actual[..]))
}

// ============================================================================
// Invoice Session
// ============================================================================

/// One party's view of a relationship with a counterpart
///
/// The same session type serves both roles: the payer calls
/// [`counterpart_public_key`](Self::counterpart_public_key), the payee calls
/// [`own_private_key`](Self::own_private_key) or [`claim`](Self::claim).
#[derive(Debug)]
pub struct InvoiceSession<'a> {
    own: &'a KeyPair,
    counterpart: Point,
    encoding: SecretEncoding,
}

impl<'a> InvoiceSession<'a> {
    /// Create a session with the default (compressed) secret encoding
    pub fn new(own: &'a KeyPair, counterpart: Point) -> Result<Self> {
        if counterpart.is_identity() {
            return Err(InvoiceKeyError::InvalidPoint(
                "counterpart public key is the identity".into(),
            ));
        }
        Ok(Self {
            own,
            counterpart,
            encoding: SecretEncoding::default(),
        })
    }

    /// Create a session from the counterpart's SEC1-encoded public key
    pub fn from_counterpart_bytes(own: &'a KeyPair, counterpart: &[u8]) -> Result<Self> {
        Self::new(own, Point::from_sec1_bytes(counterpart)?)
    }

    /// Use a different shared-secret encoding
    pub fn with_encoding(mut self, encoding: SecretEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn encoding(&self) -> SecretEncoding {
        self.encoding
    }

    pub fn counterpart(&self) -> &Point {
        &self.counterpart
    }

    /// ECDH secret between our private key and the counterpart's public key
    pub fn shared_secret(&self) -> Result<SharedSecret> {
        compute_shared_secret(self.own.secret(), &self.counterpart, self.encoding)
    }

    /// Per-invoice tweak
    pub fn tweak(&self, invoice_id: impl AsRef<[u8]>) -> Result<Scalar> {
        let shared = self.shared_secret()?;
        Ok(derive_tweak(shared.as_bytes(), invoice_id.as_ref()))
    }

    /// Payer flow: one-time public key for the counterpart
    pub fn counterpart_public_key(&self, invoice_id: impl AsRef<[u8]>) -> Result<Point> {
        let invoice_id = invoice_id.as_ref();
        let tweak = self.tweak(invoice_id)?;
        let derived = derive_public_key(&self.counterpart, &tweak);

        debug!(
            encoding = %self.encoding,
            invoice_len = invoice_id.len(),
            derived = %derived.to_hex().unwrap_or_default(),
            "derived counterpart public key"
        );
        Ok(derived)
    }

    /// Payee flow: one-time private key for ourselves
    pub fn own_private_key(&self, invoice_id: impl AsRef<[u8]>) -> Result<SecretScalar> {
        let invoice_id = invoice_id.as_ref();
        let tweak = self.tweak(invoice_id)?;
        let derived = derive_private_key(self.own.secret(), &tweak)?;

        debug!(
            encoding = %self.encoding,
            invoice_len = invoice_id.len(),
            public = %derived.public_point().to_hex().unwrap_or_default(),
            "derived own private key"
        );
        Ok(derived)
    }

    /// Payee flow with verification
    ///
    /// Returns the spending key only if `paid_to` is the public key the payer
    /// would have derived for this invoice.
    pub fn claim(
        &self,
        invoice_id: impl AsRef<[u8]>,
        paid_to: &Point,
    ) -> Result<Option<SecretScalar>> {
        let private = self.own_private_key(invoice_id)?;

        if keys_match(paid_to, &private) {
            Ok(Some(private))
        } else {
            debug!("payment key does not match derived key");
            Ok(None)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
