//! Invoice tweak: `t = HMAC-SHA256(key = shared secret, msg = invoice id) mod N`

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use super::curve::{reduce_scalar, Scalar};

type HmacSha256 = Hmac<Sha256>;

/// Raw HMAC-SHA256 digest of `message` under `key`
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

/// Derive the per-invoice tweak scalar.
///
/// Deterministic: identical inputs always give the identical scalar. This is
/// the only place the shared secret and the public invoice id are combined.
pub fn derive_tweak(shared_secret: &[u8], invoice_id: &[u8]) -> Scalar {
    let mut digest = hmac_sha256(shared_secret, invoice_id);
    let tweak = reduce_scalar(&digest);
    digest.zeroize();
    tweak
}
