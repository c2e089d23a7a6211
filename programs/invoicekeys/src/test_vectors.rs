//! Invoice key derivation test vectors
//!
//! Known-answer values for the full pipeline with small private scalars,
//! computed independently from the textbook secp256k1 group law and
//! HMAC-SHA256.

#[cfg(test)]
#[allow(non_snake_case)] // Crypto notation uses A, B, P, etc.
mod derivation_test_vectors {
    use crate::crypto::{
        base_point_multiply, compute_shared_secret, derive_private_key, derive_public_key,
        derive_tweak, InvoiceSession, KeyPair, Scalar, SecretEncoding, SecretScalar,
    };

    fn small_pair(value: u64) -> KeyPair {
        KeyPair::from_secret(SecretScalar::from_scalar(&Scalar::from(value)).unwrap())
    }

    /// Test Vector 1: long-term public keys for d_A = 7, d_B = 11
    #[test]
    fn test_vector_1_public_keys() {
        let alice = small_pair(7);
        let bob = small_pair(11);

        assert_eq!(
            alice.public().to_hex().unwrap(),
            "025cbdf0646e5db4eaa398f365f2ea7a0e3d419b7e0330e39ce92bddedcac4f9bc"
        );
        assert_eq!(
            bob.public().to_hex().unwrap(),
            "03774ae7f858a9411e5ef4246b70c65aac5649980be5c17891bbec17895da008cb"
        );
    }

    /// Test Vector 2: shared secret 7·B == 11·A == 77·G
    #[test]
    fn test_vector_2_shared_secret() {
        let alice = small_pair(7);
        let bob = small_pair(11);

        let S_alice =
            compute_shared_secret(alice.secret(), bob.public(), SecretEncoding::Compressed)
                .unwrap();
        let S_bob =
            compute_shared_secret(bob.secret(), alice.public(), SecretEncoding::Compressed)
                .unwrap();

        let expected = "0259dbf46f8c94759ba21277c33784f41645f7b44f6c596a58ce92e666191abe3e";
        assert_eq!(S_alice.to_hex(), expected);
        assert_eq!(S_bob.to_hex(), expected);
        assert_eq!(
            base_point_multiply(&Scalar::from(77)).to_hex().unwrap(),
            expected
        );
    }

    /// Test Vector 3: full pipeline, invoice "test-invoice-001"
    #[test]
    fn test_vector_3_full_pipeline() {
        let alice = small_pair(7);
        let bob = small_pair(11);
        let invoice = b"test-invoice-001";

        let S = compute_shared_secret(alice.secret(), bob.public(), SecretEncoding::Compressed)
            .unwrap();
        let t = derive_tweak(S.as_bytes(), invoice);
        assert_eq!(
            hex::encode(t.to_bytes()),
            "6451c67a83b5981c21dc69a4333feada87061058965d8e3631f01616716a123e"
        );

        // Payer
        let P = derive_public_key(bob.public(), &t);
        assert_eq!(
            P.to_hex().unwrap(),
            "032737968fb25c3dddc94ecac05e357f1c0337e47119dad6894e4d51d0f8edf378"
        );

        // Payee
        let p = derive_private_key(bob.secret(), &t).unwrap();
        assert_eq!(
            p.to_hex(),
            "6451c67a83b5981c21dc69a4333feada87061058965d8e3631f01616716a1249"
        );
        assert_eq!(
            p.public_point().to_compressed().unwrap(),
            P.to_compressed().unwrap()
        );
    }

    /// Test Vector 4: a different invoice id changes every derived key
    #[test]
    fn test_vector_4_second_invoice() {
        let alice = small_pair(7);
        let bob = small_pair(11);

        let payer = InvoiceSession::new(&alice, *bob.public()).unwrap();
        let payee = InvoiceSession::new(&bob, *alice.public()).unwrap();

        let P1 = payer.counterpart_public_key(b"test-invoice-001").unwrap();
        let P2 = payer.counterpart_public_key(b"test-invoice-002").unwrap();
        assert_ne!(P1, P2);

        assert_eq!(
            P2.to_hex().unwrap(),
            "03681cdab16880b9b89c91e1f50c3f58a272bfadb16f475474471346817237ee91"
        );

        let p2 = payee.own_private_key(b"test-invoice-002").unwrap();
        assert_eq!(
            p2.to_hex(),
            "9f973af393e243b29cdb2770d35b1d913653575e5640353bdfad44aabfe1a9e8"
        );
        assert_eq!(p2.public_point(), P2);
    }

    /// Test Vector 5: x-only shared-secret convention
    #[test]
    fn test_vector_5_x_only_encoding() {
        let alice = small_pair(7);
        let bob = small_pair(11);

        let payer = InvoiceSession::new(&alice, *bob.public())
            .unwrap()
            .with_encoding(SecretEncoding::XOnly);
        let payee = InvoiceSession::new(&bob, *alice.public())
            .unwrap()
            .with_encoding(SecretEncoding::XOnly);

        let t = payer.tweak(b"test-invoice-001").unwrap();
        assert_eq!(
            hex::encode(t.to_bytes()),
            "cc4767f6508a9592f63cc9dce81057cbc1a573e998ebfefa328941c0127d879d"
        );

        let P = payer.counterpart_public_key(b"test-invoice-001").unwrap();
        assert_eq!(
            P.to_hex().unwrap(),
            "02c6da40336980bf18bd8a3f25824d2c7b9640eba85f09391a2b77048e83567f4f"
        );

        let p = payee.own_private_key(b"test-invoice-001").unwrap();
        assert_eq!(
            p.to_hex(),
            "cc4767f6508a9592f63cc9dce81057cbc1a573e998ebfefa328941c0127d87a8"
        );
    }

    /// Test Vector 6: mismatched conventions do not interoperate
    #[test]
    fn test_vector_6_encoding_mismatch() {
        let alice = small_pair(7);
        let bob = small_pair(11);

        let payer = InvoiceSession::new(&alice, *bob.public()).unwrap();
        let payee = InvoiceSession::new(&bob, *alice.public())
            .unwrap()
            .with_encoding(SecretEncoding::XOnly);

        let P = payer.counterpart_public_key(b"test-invoice-001").unwrap();
        assert!(payee.claim(b"test-invoice-001", &P).unwrap().is_none());
    }
}
