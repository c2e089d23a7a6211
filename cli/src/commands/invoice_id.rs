//! Invoice id from a request description

use anyhow::{bail, Result};
use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use invoicekeys::InvoiceId;

pub fn run(request: &str) -> Result<()> {
    if request.trim().is_empty() {
        bail!("Request description must not be empty");
    }

    let at = Utc::now();
    let id = InvoiceId::from_request(request, at);

    println!("{}", id.to_hex());
    println!(
        "{}",
        format!(
            "SHA256(\"{} at {}\")",
            request,
            at.to_rfc3339_opts(SecondsFormat::Nanos, true)
        )
        .dimmed()
    );
    println!(
        "{}",
        "Pass it to pay/receive with --invoice-hex.".dimmed()
    );

    Ok(())
}
