//! Walk through both sides of the derivation with two fresh key pairs

use anyhow::Result;
use colored::Colorize;
use invoicekeys::{
    keys_match, InvoiceId, InvoiceSession, KeyPair, Point, SecretEncoding, SecretScalar,
};

const SAMPLE_REQUEST: &str = "alice@wallet connection request to bob@wallet";

/// Everything the demo computes, for display and for tests
pub struct DemoReport {
    pub invoice: InvoiceId,
    pub payer_public: Point,
    pub payee_public: Point,
    pub payer_shared_secret: String,
    pub payee_shared_secret: String,
    pub payment_key: Point,
    pub spending_key: SecretScalar,
    pub keys_match: bool,
}

/// Payer (alice) derives a key for payee (bob), bob derives the private half
pub fn simulate(invoice: InvoiceId, encoding: SecretEncoding) -> Result<DemoReport> {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();

    let payer = InvoiceSession::new(&alice, *bob.public())?.with_encoding(encoding);
    let payee = InvoiceSession::new(&bob, *alice.public())?.with_encoding(encoding);

    let payment_key = payer.counterpart_public_key(&invoice)?;
    let spending_key = payee.own_private_key(&invoice)?;

    Ok(DemoReport {
        payer_public: *alice.public(),
        payee_public: *bob.public(),
        payer_shared_secret: payer.shared_secret()?.to_hex(),
        payee_shared_secret: payee.shared_secret()?.to_hex(),
        keys_match: keys_match(&payment_key, &spending_key),
        payment_key,
        spending_key,
        invoice,
    })
}

pub fn run(invoice: Option<InvoiceId>, encoding: SecretEncoding) -> Result<()> {
    let invoice = invoice.unwrap_or_else(|| InvoiceId::from_request_now(SAMPLE_REQUEST));

    let report = simulate(invoice, encoding)?;

    println!("{}", "=== Invoice Key Demo ===".cyan().bold());
    println!();
    println!("{}: {}", "Invoice".yellow(), report.invoice.to_hex());
    println!("{}: {}", "Encoding".yellow(), encoding);
    println!();
    println!("{}: {}", "Alice (payer) public key".yellow(), report.payer_public.to_hex()?);
    println!("{}: {}", "Bob (payee) public key  ".yellow(), report.payee_public.to_hex()?);
    println!();
    println!("Alice's shared secret: {}", report.payer_shared_secret);
    println!("Bob's shared secret:   {}", report.payee_shared_secret);
    if report.payer_shared_secret == report.payee_shared_secret {
        println!("{}", "Shared secrets are the same.".green());
    } else {
        println!("{}", "Shared secrets differ.".red());
    }
    println!();
    println!("{}: {}", "Payment key (alice)".yellow(), report.payment_key.to_hex()?);
    println!(
        "{}: {}",
        "Spending key pubkey (bob)".yellow(),
        report.spending_key.public_point().to_hex()?
    );
    println!();

    if report.keys_match {
        println!("{}", "Bob can spend what alice paid.".green().bold());
    } else {
        println!("{}", "Bob cannot spend what alice paid.".red().bold());
    }

    Ok(())
}
