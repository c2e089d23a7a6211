//! invoicekeys CLI - one-time secp256k1 keys per invoice

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use invoicekeys::SecretEncoding;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;


#[cfg(test)]
mod integration_tests;

use commands::*;
use config::EncodingArg;

#[derive(Parser)]
#[command(name = "invoicekeys")]
#[command(version = "0.1.0")]
#[command(about = "Invoice-keyed one-time secp256k1 keys via ECDH and HMAC-SHA256")]
#[command(long_about = r#"
invoicekeys derives a fresh key pair for every invoice between two parties.

The payer computes a one-time public key for the payee from its own secret,
the payee's public key and the invoice id. The payee derives the matching
private key on its own. No interaction beyond the invoice id is needed.

Quick Start:
  1. invoicekeys keygen                             Generate your long-term keys
  2. invoicekeys address                            Share your public key
  3. invoicekeys pay --to <PUBKEY> --invoice <ID>   Payer: key to pay to
  4. invoicekeys receive --from <PUBKEY> --invoice <ID>
                                                    Payee: key to spend with
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the key file (default: ~/.invoicekeys/keys.json)
    #[arg(long, global = true)]
    keys_file: Option<PathBuf>,

    /// Shared-secret encoding used as the HMAC key
    #[arg(long, global = true, value_enum, default_value_t = EncodingArg::Compressed)]
    encoding: EncodingArg,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate (or import) the long-term key pair
    Keygen {
        /// Force overwrite existing keys
        #[arg(short, long)]
        force: bool,

        /// Import this private key (64 hex chars) instead of generating one
        #[arg(long)]
        secret: Option<String>,
    },

    /// Show your public key
    Address,

    /// Derive an invoice id from a request description and the current time
    InvoiceId {
        /// Request description, e.g. "alice@wallet connection request to bob@wallet"
        #[arg(short, long)]
        request: String,
    },

    /// Payer: derive the one-time public key to pay the counterpart
    Pay {
        /// Counterpart's public key (hex SEC1)
        #[arg(short, long)]
        to: String,

        /// Invoice id
        #[arg(short, long)]
        invoice: String,

        /// Treat the invoice id as hex bytes
        #[arg(long)]
        invoice_hex: bool,
    },

    /// Payee: derive the one-time private key for an invoice
    Receive {
        /// Counterpart's public key (hex SEC1)
        #[arg(short, long)]
        from: String,

        /// Invoice id
        #[arg(short, long)]
        invoice: String,

        /// Treat the invoice id as hex bytes
        #[arg(long)]
        invoice_hex: bool,

        /// Public key you were paid to; the derived key is only released if it matches
        #[arg(short, long)]
        expect: Option<String>,

        /// Print the derived private key
        #[arg(long)]
        show_secret: bool,
    },

    /// Run both sides with two fresh key pairs and compare the results
    Demo {
        /// Invoice id (default: derived from a sample request and the current time)
        #[arg(short, long)]
        invoice: Option<String>,

        /// Treat the invoice id as hex bytes
        #[arg(long, requires = "invoice")]
        invoice_hex: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let encoding = SecretEncoding::from(cli.encoding);

    match cli.command {
        Commands::Keygen { force, secret } => {
            let path = config::resolve_keys_file(cli.keys_file.as_deref())?;
            keygen::run(&path, force, secret)?;
        }
        Commands::Address => {
            let path = config::resolve_keys_file(cli.keys_file.as_deref())?;
            address::run(&path)?;
        }
        Commands::InvoiceId { request } => {
            invoice_id::run(&request)?;
        }
        Commands::Pay { to, invoice, invoice_hex } => {
            let path = config::resolve_keys_file(cli.keys_file.as_deref())?;
            let invoice = config::parse_invoice(&invoice, invoice_hex)?;
            pay::run(&path, &to, &invoice, encoding)?;
        }
        Commands::Receive { from, invoice, invoice_hex, expect, show_secret } => {
            let path = config::resolve_keys_file(cli.keys_file.as_deref())?;
            let invoice = config::parse_invoice(&invoice, invoice_hex)?;
            receive::run(
                &path,
                receive::ReceiveOptions {
                    from,
                    invoice,
                    expect,
                    show_secret,
                },
                encoding,
            )?;
        }
        Commands::Demo { invoice, invoice_hex } => {
            let invoice = invoice
                .map(|id| config::parse_invoice(&id, invoice_hex))
                .transpose()?;
            demo::run(invoice, encoding)?;
        }
    }

    Ok(())
}
