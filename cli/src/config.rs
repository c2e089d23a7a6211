//! Configuration and key storage for the invoicekeys CLI

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use invoicekeys::{InvoiceId, KeyPair, Point, SecretEncoding, SecretScalar};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

/// Default directory for the key file
const KEYS_DIR: &str = ".invoicekeys";
const KEYS_FILE: &str = "keys.json";

/// Long-term key pair as stored on disk
#[derive(Serialize, Deserialize, Clone)]
pub struct StoredKeys {
    /// Private scalar (hex encoded, 32 bytes)
    pub secret_key: String,
    /// Compressed public key (hex encoded, 33 bytes)
    pub public_key: String,
    /// Creation timestamp
    pub created_at: String,
}

impl StoredKeys {
    pub fn from_keypair(keys: &KeyPair) -> Result<Self> {
        Ok(Self {
            secret_key: keys.secret().to_hex(),
            public_key: keys.public().to_hex()?,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Rebuild the key pair, checking the stored public key against the secret
    pub fn to_keypair(&self) -> Result<KeyPair> {
        let secret = SecretScalar::from_hex(&self.secret_key)
            .context("Key file holds an invalid secret key")?;
        let keys = KeyPair::from_secret(secret);

        let stored_public = Point::from_hex(&self.public_key)
            .context("Key file holds an invalid public key")?;
        if stored_public != *keys.public() {
            bail!("Key file is inconsistent: public key does not match the secret key");
        }

        Ok(keys)
    }
}

impl std::fmt::Debug for StoredKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredKeys")
            .field("public_key", &self.public_key)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl Drop for StoredKeys {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

/// Shared-secret encoding as chosen on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// 33-byte compressed point
    #[default]
    Compressed,
    /// 32-byte x-coordinate
    XOnly,
}

impl From<EncodingArg> for SecretEncoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Compressed => SecretEncoding::Compressed,
            EncodingArg::XOnly => SecretEncoding::XOnly,
        }
    }
}

/// Get the default key file path
pub fn default_keys_file() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(KEYS_DIR).join(KEYS_FILE))
}

/// Use the `--keys-file` override if given, the default location otherwise
pub fn resolve_keys_file(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => default_keys_file(),
    }
}

/// Save keys to disk
pub fn save_keys(path: &Path, keys: &StoredKeys) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).context("Failed to create key directory")?;
    }

    let mut json = serde_json::to_string_pretty(keys)?;
    write_private_file(path, json.as_bytes()).context("Failed to write key file")?;
    json.zeroize();
    debug!(path = %path.display(), "saved key file");
    Ok(())
}

/// Write `contents` to a file only the owner can read
///
/// On Unix a new file is created with mode 0600, and an existing file is
/// truncated and reset to 0600 before any secret bytes are written.
fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()
}

/// Load keys from disk
pub fn load_keys(path: &Path) -> Result<StoredKeys> {
    if !path.exists() {
        bail!(
            "No keys found at {}. Run 'invoicekeys keygen' first.",
            path.display()
        );
    }

    let mut json = fs::read_to_string(path).context("Failed to read key file")?;
    let parsed = serde_json::from_str(&json).context("Failed to parse key file");
    json.zeroize();

    debug!(path = %path.display(), "loaded key file");
    parsed
}

/// Load and validate the stored key pair
pub fn load_keypair(path: &Path) -> Result<KeyPair> {
    load_keys(path)?.to_keypair()
}

/// Parse a hex SEC1 public key given on the command line
pub fn parse_public_key(input: &str) -> Result<Point> {
    Point::from_hex(input).with_context(|| format!("Invalid public key '{}'", input))
}

/// Parse an invoice id: raw UTF-8 text, or hex bytes with `--invoice-hex`
pub fn parse_invoice(input: &str, is_hex: bool) -> Result<InvoiceId> {
    if is_hex {
        InvoiceId::from_hex(input).context("Invoice id is not valid hex")
    } else {
        Ok(InvoiceId::from(input))
    }
}
