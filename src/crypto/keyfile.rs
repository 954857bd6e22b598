//! Key file handling: generate once, use forever.
//!
//! The key file holds nothing but the raw key bytes.  It is written
//! exactly once, the first time a store is initialized for a given key
//! path, and never overwritten afterwards.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use super::keys::Key;
use crate::errors::{PassVaultError, Result};

/// Load the key at `path`, or generate and persist a new one if the file
/// does not exist.
///
/// An existing file is returned unchanged with no length check; a bad key
/// shows up later as an authentication failure when the vault is opened.
pub fn obtain_key(path: &Path) -> Result<Key> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), len = bytes.len(), "loaded key file");
            Ok(Key::from_bytes(bytes))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => generate_keyfile(path),
        Err(e) => Err(key_access(path, format!("failed to read key file: {e}"))),
    }
}

/// Generate a new random key and write it to `path`.
///
/// Fails if a file already exists at `path`, so an existing key can never
/// be clobbered.  On Unix the file is created owner read/write only.
pub fn generate_keyfile(path: &Path) -> Result<Key> {
    let key = Key::generate();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| key_access(path, format!("cannot create key directory: {e}")))?;
        }
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|e| key_access(path, format!("failed to create key file: {e}")))?;

    let written = file.write_all(key.as_bytes()).and_then(|()| file.sync_all());
    if let Err(e) = written {
        drop(file);
        // A half-written key file would be picked up as the key next time.
        let _ = fs::remove_file(path);
        return Err(key_access(path, format!("failed to write key file: {e}")));
    }

    info!(path = %path.display(), "generated new vault key");
    Ok(key)
}

fn key_access(path: &Path, reason: String) -> PassVaultError {
    PassVaultError::KeyAccess {
        path: path.to_path_buf(),
        reason,
    }
}
