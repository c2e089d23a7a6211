//! Payee side: derive (and optionally verify) the one-time private key

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use invoicekeys::{InvoiceId, InvoiceSession, KeyPair, SecretEncoding, SecretScalar};
use tracing::warn;

use crate::config::{load_keypair, parse_public_key};

/// Options for the receive command
pub struct ReceiveOptions {
    /// Counterpart's public key (hex)
    pub from: String,
    /// Invoice id
    pub invoice: InvoiceId,
    /// Public key the payer claims to have paid to
    pub expect: Option<String>,
    /// Print the derived private key
    pub show_secret: bool,
}

/// One-time private key `b + HMAC(b·A, invoice) mod N`
///
/// With `expect`, the key is only returned if it controls that public key.
pub fn derive_receiving_key(
    keys: &KeyPair,
    from: &str,
    invoice: &InvoiceId,
    expect: Option<&str>,
    encoding: SecretEncoding,
) -> Result<SecretScalar> {
    let counterpart = parse_public_key(from)?;
    let session = InvoiceSession::new(keys, counterpart)?.with_encoding(encoding);

    let Some(expected) = expect else {
        return session
            .own_private_key(invoice)
            .context("Failed to derive receiving key");
    };

    let expected = parse_public_key(expected)?;
    match session.claim(invoice, &expected)? {
        Some(key) => Ok(key),
        None => {
            warn!(invoice = %invoice, "expected key does not match derivation");
            bail!(
                "Key {} was not derived for this invoice and counterpart (encoding: {})",
                expected.to_hex()?,
                encoding
            );
        }
    }
}

pub fn run(path: &Path, options: ReceiveOptions, encoding: SecretEncoding) -> Result<()> {
    let keys = load_keypair(path)?;

    println!("{}", "Deriving receiving key...".cyan());

    let private = derive_receiving_key(
        &keys,
        &options.from,
        &options.invoice,
        options.expect.as_deref(),
        encoding,
    )?;

    println!();
    if options.expect.is_some() {
        println!("{}", "Payment key verified: you can spend from it.".green().bold());
        println!();
    }

    println!("{}:", "One-time public key".yellow());
    println!("  {}", private.public_point().to_hex()?);

    if options.show_secret {
        println!();
        println!("{}:", "One-time private key".red().bold());
        println!("  {}", private.to_hex());
        println!();
        println!("{}", "Keep this key secret. Anyone holding it can spend the payment.".red());
    } else {
        println!();
        println!("{}", "Use --show-secret to print the private key.".dimmed());
    }

    Ok(())
}
