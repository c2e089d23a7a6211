//! Display the stored public key

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::config::load_keypair;

pub fn run(path: &Path) -> Result<()> {
    let keys = load_keypair(path)?;
    let compressed = keys.public_compressed()?;

    println!();
    println!("{}", "Your Public Key".yellow().bold());
    println!();
    println!("{}", hex::encode(compressed));
    println!();
    println!(
        "{}",
        "Share this key with counterparts so they can derive invoice keys for you.".dimmed()
    );

    Ok(())
}
