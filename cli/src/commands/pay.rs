//! Payer side: derive the one-time public key for an invoice

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use invoicekeys::{InvoiceId, InvoiceSession, KeyPair, Point, SecretEncoding};

use crate::config::{load_keypair, parse_public_key};

/// One-time public key `HMAC(a·B, invoice)·G + B` for the counterpart `B`
pub fn derive_payment_key(
    keys: &KeyPair,
    counterpart: &str,
    invoice: &InvoiceId,
    encoding: SecretEncoding,
) -> Result<Point> {
    let counterpart = parse_public_key(counterpart)?;
    let session = InvoiceSession::new(keys, counterpart)?.with_encoding(encoding);

    session
        .counterpart_public_key(invoice)
        .context("Failed to derive payment key")
}

pub fn run(path: &Path, to: &str, invoice: &InvoiceId, encoding: SecretEncoding) -> Result<()> {
    let keys = load_keypair(path)?;

    println!("{}", "Deriving payment key...".cyan());

    let payment_key = derive_payment_key(&keys, to, invoice, encoding)?;

    println!();
    println!("{}:", "Pay to".yellow());
    println!("  {}", payment_key.to_hex()?);
    println!();
    println!("{}", format!("Invoice:  {}", invoice.to_hex()).dimmed());
    println!("{}", format!("Encoding: {}", encoding).dimmed());
    println!();
    println!(
        "{}",
        "Only the holder of the counterpart's private key can spend from this key.".dimmed()
    );

    Ok(())
}
