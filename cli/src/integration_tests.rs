//! Integration tests for the invoicekeys CLI
//!
//! These tests verify complete end-to-end flows:
//! - Key generation → Storage → Load
//! - Payer and payee commands deriving matching keys from stored key files
//! - Error handling for overwrites and mismatched payments

#[cfg(test)]
mod e2e_tests {
    use crate::commands::{demo, keygen, pay, receive};
    use crate::config::{load_keypair, load_keys, parse_invoice, save_keys, StoredKeys};
    use invoicekeys::{InvoiceId, KeyPair, SecretEncoding};
    use tempfile::tempdir;

    // ==================== Key Management Integration Tests ====================

    /// Test key lifecycle: generate → store → load
    #[test]
    fn test_key_lifecycle() {
        let temp_dir = tempdir().expect("Should create temp dir");
        let path = temp_dir.path().join("nested").join("keys.json");

        let keys = keygen::store_new_keys(&path, false, None).expect("Should store keys");
        assert!(path.exists());

        let loaded = load_keypair(&path).expect("Should load keys");
        assert_eq!(loaded.public(), keys.public());
    }

    #[test]
    fn test_keygen_refuses_overwrite_without_force() {
        let temp_dir = tempdir().expect("Should create temp dir");
        let path = temp_dir.path().join("keys.json");

        let first = keygen::store_new_keys(&path, false, None).unwrap();

        let err = keygen::store_new_keys(&path, false, None).unwrap_err();
        assert!(err.to_string().contains("--force"));

        // File still holds the first key pair
        assert_eq!(load_keypair(&path).unwrap().public(), first.public());

        let second = keygen::store_new_keys(&path, true, None).unwrap();
        assert_ne!(second.public(), first.public());
        assert_eq!(load_keypair(&path).unwrap().public(), second.public());
    }

    #[test]
    fn test_keygen_import() {
        let temp_dir = tempdir().expect("Should create temp dir");
        let path = temp_dir.path().join("keys.json");

        let secret = format!("{:064x}", 11);
        let keys = keygen::store_new_keys(&path, false, Some(secret)).unwrap();
        assert_eq!(
            keys.public().to_hex().unwrap(),
            "03774ae7f858a9411e5ef4246b70c65aac5649980be5c17891bbec17895da008cb"
        );

        let stored = load_keys(&path).unwrap();
        assert_eq!(stored.secret_key, format!("{:064x}", 11));
    }

    #[test]
    fn test_keygen_import_rejects_zero() {
        let temp_dir = tempdir().expect("Should create temp dir");
        let path = temp_dir.path().join("keys.json");

        let result = keygen::store_new_keys(&path, false, Some("00".repeat(32)));
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().expect("Should create temp dir");
        let path = temp_dir.path().join("keys.json");
        keygen::store_new_keys(&path, false, None).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_force_overwrite_tightens_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().expect("Should create temp dir");
        let path = temp_dir.path().join("keys.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        keygen::store_new_keys(&path, true, None).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(load_keypair(&path).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().expect("Should create temp dir");
        let Err(err) = load_keys(&temp_dir.path().join("absent.json")) else {
            panic!("Loading a missing key file should fail");
        };
        assert!(err.to_string().contains("keygen"));
    }

    #[test]
    fn test_load_corrupted_file() {
        let temp_dir = tempdir().expect("Should create temp dir");
        let path = temp_dir.path().join("keys.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(load_keys(&path).is_err());
    }

    #[test]
    fn test_load_tampered_public_key() {
        let temp_dir = tempdir().expect("Should create temp dir");
        let path = temp_dir.path().join("keys.json");

        let mut stored = StoredKeys::from_keypair(&KeyPair::generate()).unwrap();
        stored.public_key = KeyPair::generate().public().to_hex().unwrap();
        save_keys(&path, &stored).unwrap();

        assert!(load_keypair(&path).is_err());
    }

    // ==================== Payment Flow Integration Tests ====================

    /// Payer and payee each load their own key file and derive matching keys
    #[test]
    fn test_pay_and_receive_from_key_files() {
        let temp_dir = tempdir().expect("Should create temp dir");
        let alice_path = temp_dir.path().join("alice.json");
        let bob_path = temp_dir.path().join("bob.json");

        let alice_pub = keygen::store_new_keys(&alice_path, false, None)
            .unwrap()
            .public()
            .to_hex()
            .unwrap();
        let bob_pub = keygen::store_new_keys(&bob_path, false, None)
            .unwrap()
            .public()
            .to_hex()
            .unwrap();

        let invoice = InvoiceId::from("invoice-2024-0042");

        for encoding in [SecretEncoding::Compressed, SecretEncoding::XOnly] {
            let alice = load_keypair(&alice_path).unwrap();
            let payment_key = pay::derive_payment_key(&alice, &bob_pub, &invoice, encoding)
                .expect("Payer should derive key");

            let bob = load_keypair(&bob_path).unwrap();
            let expect = payment_key.to_hex().unwrap();
            let private = receive::derive_receiving_key(
                &bob,
                &alice_pub,
                &invoice,
                Some(&expect),
                encoding,
            )
            .expect("Payee should claim the payment");

            assert_eq!(private.public_point(), payment_key);
        }
    }

    #[test]
    fn test_receive_rejects_wrong_invoice() {
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();
        let alice_pub = alice.public().to_hex().unwrap();
        let bob_pub = bob.public().to_hex().unwrap();

        let paid_to = pay::derive_payment_key(
            &alice,
            &bob_pub,
            &InvoiceId::from("inv-1"),
            SecretEncoding::Compressed,
        )
        .unwrap()
        .to_hex()
        .unwrap();

        let result = receive::derive_receiving_key(
            &bob,
            &alice_pub,
            &InvoiceId::from("inv-2"),
            Some(&paid_to),
            SecretEncoding::Compressed,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_receive_without_expect_matches_pay() {
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();
        let invoice = InvoiceId::from_request_now("alice connection request to bob");

        let public = pay::derive_payment_key(
            &alice,
            &bob.public().to_hex().unwrap(),
            &invoice,
            SecretEncoding::Compressed,
        )
        .unwrap();
        let private = receive::derive_receiving_key(
            &bob,
            &alice.public().to_hex().unwrap(),
            &invoice,
            None,
            SecretEncoding::Compressed,
        )
        .unwrap();

        assert_eq!(private.public_point(), public);
    }

    #[test]
    fn test_pay_rejects_invalid_counterpart() {
        let alice = KeyPair::generate();
        let result = pay::derive_payment_key(
            &alice,
            "020000000000000000000000000000000000000000000000000000000000000005",
            &InvoiceId::from("inv"),
            SecretEncoding::Compressed,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_demo_accepts_hex_invoice() {
        let invoice = parse_invoice(&InvoiceId::from("demo-invoice").to_hex(), true).unwrap();
        assert_eq!(invoice.as_bytes(), b"demo-invoice");

        let report = demo::simulate(invoice, SecretEncoding::Compressed).unwrap();
        assert_eq!(report.invoice.as_bytes(), b"demo-invoice");
        assert!(report.keys_match);
    }

    #[test]
    fn test_demo_report() {
        for encoding in [SecretEncoding::Compressed, SecretEncoding::XOnly] {
            let report = demo::simulate(InvoiceId::from("demo-invoice"), encoding).unwrap();

            assert_eq!(report.payer_shared_secret, report.payee_shared_secret);
            assert_eq!(report.payer_shared_secret.len(), encoding.encoded_len() * 2);
            assert_eq!(report.spending_key.public_point(), report.payment_key);
            assert_ne!(report.payment_key, report.payee_public);
            assert!(report.keys_match);
        }
    }
}
