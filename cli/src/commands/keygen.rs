//! Key generation and import

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use invoicekeys::{KeyPair, SecretScalar};
use tracing::info;
use zeroize::Zeroize;

use crate::config::{save_keys, StoredKeys};

/// Build the key pair to store: imported from hex, or fresh from the OS RNG
pub fn create_keypair(secret: Option<String>) -> Result<KeyPair> {
    match secret {
        Some(mut hex_secret) => {
            let parsed = SecretScalar::from_hex(&hex_secret);
            hex_secret.zeroize();
            let secret = parsed.context("Invalid private key")?;
            Ok(KeyPair::from_secret(secret))
        }
        None => Ok(KeyPair::generate()),
    }
}

/// Create the key pair and write it to `path`
///
/// Refuses to replace an existing key file unless `force` is set.
pub fn store_new_keys(path: &Path, force: bool, secret: Option<String>) -> Result<KeyPair> {
    if path.exists() && !force {
        bail!(
            "Keys already exist at {}. Use --force to overwrite.\n\
             Warning: keys derived from the old key pair can no longer be recovered!",
            path.display()
        );
    }

    let imported = secret.is_some();
    let keys = create_keypair(secret)?;
    save_keys(path, &StoredKeys::from_keypair(&keys)?)?;

    info!(imported, path = %path.display(), "stored long-term key pair");
    Ok(keys)
}

pub fn run(path: &Path, force: bool, secret: Option<String>) -> Result<()> {
    let imported = secret.is_some();

    println!("{}", "=== Key Generation ===".cyan().bold());
    println!();

    let keys = store_new_keys(path, force, secret)?;

    if imported {
        println!("{}", "Private key imported successfully!".green().bold());
    } else {
        println!("{}", "Keys generated successfully!".green().bold());
    }
    println!();
    println!("{}:", "Public Key (share this)".yellow());
    println!("  {}", keys.public().to_hex()?);
    println!();
    println!(
        "{}",
        format!("Keys saved to: {}", path.display()).dimmed()
    );

    Ok(())
}
