use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::domain::Customer;

/// Load the full customer sequence from a snapshot file.
///
/// A missing file is a fresh start and yields an empty roster. Any other
/// failure (unreadable file, undecodable bytes) is an error; the caller's
/// in-memory state is never touched, so a bad snapshot can't half-populate
/// a store.
pub fn load(path: &Path) -> Result<Vec<Customer>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no snapshot found, starting with an empty roster");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read snapshot {}", path.display()));
        }
    };

    let (customers, consumed): (Vec<Customer>, usize) =
        bincode::serde::decode_from_slice(&bytes, bincode::config::standard())
            .with_context(|| format!("snapshot {} is corrupt or unreadable", path.display()))?;
    debug!(bytes = consumed, customers = customers.len(), "snapshot decoded");
    Ok(customers)
}

/// Write the full customer sequence to the snapshot file, replacing any
/// previous contents.
pub fn save(path: &Path, customers: &[Customer]) -> Result<()> {
    let bytes = bincode::serde::encode_to_vec(customers, bincode::config::standard())
        .context("failed to encode snapshot")?;
    fs::write(path, &bytes)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    info!(path = %path.display(), customers = customers.len(), "snapshot saved");
    Ok(())
}
