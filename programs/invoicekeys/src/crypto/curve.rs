//! secp256k1 primitive layer
//!
//! Thin value types over `k256` with validity checked at the decode
//! boundaries:
//! - [`Scalar`]: an integer in `[0, N)`
//! - [`Point`]: a curve point, possibly the identity when produced by
//!   arithmetic, never the identity when decoded from bytes
//!
//! The group arithmetic uses the curve parameters compiled into `k256`. The
//! table below is the same data in byte form, for callers that need to check
//! ranges or print them.

use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, Tag, ToEncodedPoint};
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint};

use crate::error::{InvoiceKeyError, Result};

/// Group order N (big-endian)
pub const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Field prime p = 2^256 - 2^32 - 977 (big-endian)
pub const FIELD_PRIME: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

/// Generator G in compressed SEC1 form
pub const GENERATOR_COMPRESSED: [u8; 33] = [
    0x02,
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac,
    0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07,
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9,
    0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];

/// Length of a compressed SEC1 point
pub const COMPRESSED_POINT_LEN: usize = 33;

/// Length of a serialized scalar
pub const SCALAR_LEN: usize = 32;

// ============================================================================
// Scalar
// ============================================================================

/// An integer modulo the group order N.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scalar(pub(crate) k256::Scalar);

impl Scalar {
    pub const ZERO: Self = Self(k256::Scalar::ZERO);
    pub const ONE: Self = Self(k256::Scalar::ONE);

    /// Parse a big-endian scalar, rejecting values `>= N`.
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Option::<k256::Scalar>::from(k256::Scalar::from_repr(FieldBytes::from(*bytes)))
            .map(Self)
            .ok_or_else(|| {
                InvoiceKeyError::InvalidScalar("value is not below the group order".into())
            })
    }

    /// Parse a 64-character hex scalar, rejecting values `>= N`.
    pub fn from_hex(input: &str) -> Result<Self> {
        Self::from_canonical_bytes(&decode_fixed::<32>(input)?)
    }

    /// Big-endian encoding
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.0.to_bytes());
        bytes
    }

    pub fn is_zero(&self) -> bool {
        bool::from(Field::is_zero(&self.0))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self(k256::Scalar::from(value))
    }
}

impl std::ops::Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

// ============================================================================
// Point
// ============================================================================

/// A point on secp256k1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point(pub(crate) ProjectivePoint);

impl Point {
    pub const GENERATOR: Self = Self(ProjectivePoint::GENERATOR);
    pub const IDENTITY: Self = Self(ProjectivePoint::IDENTITY);

    /// Decode a SEC1 point (33-byte compressed or 65-byte uncompressed).
    ///
    /// Fails with `InvalidPoint` if the encoding is malformed, the point is
    /// not on the curve, or it is the identity. Only the `0x02`/`0x03`
    /// compressed and `0x04` uncompressed tags are accepted; the compact
    /// `0x05` form carries no y parity and would decode to either of two keys.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let encoded = EncodedPoint::from_bytes(bytes)
            .map_err(|e| InvoiceKeyError::InvalidPoint(format!("malformed SEC1 encoding: {}", e)))?;

        match encoded.tag() {
            Tag::CompressedEvenY | Tag::CompressedOddY | Tag::Uncompressed => {}
            other => {
                return Err(InvoiceKeyError::InvalidPoint(format!(
                    "unsupported SEC1 tag 0x{:02x}",
                    other as u8
                )));
            }
        }

        let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or_else(|| InvoiceKeyError::InvalidPoint("not on the secp256k1 curve".into()))?;

        let point = Self(ProjectivePoint::from(affine));
        if point.is_identity() {
            return Err(InvoiceKeyError::InvalidPoint("identity point".into()));
        }
        Ok(point)
    }

    /// Decode a hex SEC1 point
    pub fn from_hex(input: &str) -> Result<Self> {
        Self::from_sec1_bytes(&hex::decode(input.trim())?)
    }

    /// 33-byte compressed encoding: parity prefix (0x02 even, 0x03 odd) then x.
    pub fn to_compressed(&self) -> Result<[u8; 33]> {
        if self.is_identity() {
            return Err(InvoiceKeyError::IdentityPointEncoding);
        }
        let encoded = self.0.to_affine().to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(encoded.as_bytes());
        Ok(bytes)
    }

    /// 32-byte big-endian x-coordinate
    pub fn x_only(&self) -> Result<[u8; 32]> {
        let compressed = self.to_compressed()?;
        let mut x = [0u8; 32];
        x.copy_from_slice(&compressed[1..]);
        Ok(x)
    }

    pub fn to_hex(&self) -> Result<String> {
        Ok(hex::encode(self.to_compressed()?))
    }

    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }
}

// ============================================================================
// Primitive operations
// ============================================================================

/// `scalar · point`
pub fn scalar_multiply(point: &Point, scalar: &Scalar) -> Point {
    Point(point.0 * scalar.0)
}

/// Group addition. The identity and the doubling case `p1 == p2` follow the
/// complete addition formulas of the underlying implementation.
pub fn point_add(p1: &Point, p2: &Point) -> Point {
    Point(p1.0 + p2.0)
}

/// `scalar · G`
pub fn base_point_multiply(scalar: &Scalar) -> Point {
    Point(ProjectivePoint::GENERATOR * scalar.0)
}

/// Compressed SEC1 encoding; the identity has none.
pub fn serialize_compressed(point: &Point) -> Result<[u8; 33]> {
    point.to_compressed()
}

/// Inverse of [`serialize_compressed`]
pub fn decompress(bytes: &[u8]) -> Result<Point> {
    if bytes.len() != COMPRESSED_POINT_LEN {
        return Err(InvoiceKeyError::InvalidLength {
            expected: COMPRESSED_POINT_LEN,
            actual: bytes.len(),
        });
    }
    Point::from_sec1_bytes(bytes)
}

/// Interpret 32 bytes as a big-endian integer and reduce it modulo N.
///
/// The reduction is biased: values in `[N, 2^256)` fold onto `[0, 2^256 - N)`.
/// Since `2^256 - N < 2^129`, a uniform input lands there with probability
/// below `2^-127`, so the output is indistinguishable from uniform for a hash
/// digest input.
pub fn reduce_scalar(bytes: &[u8; 32]) -> Scalar {
    Scalar(<k256::Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*bytes)))
}

/// Decode a hex string of exactly `N` bytes
pub(crate) fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(input.trim())?;
    if bytes.len() != N {
        return Err(InvoiceKeyError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}
