//! On-disk representation of a sealed vault.
//!
//! A data file contains exactly one sealed blob and nothing else:
//!
//! ```text
//! [nonce: 12 bytes][AES-256-GCM ciphertext of the vault JSON][tag: 16 bytes]
//! ```
//!
//! The plaintext is the canonical serialization of a `Vault`: a flat JSON
//! object mapping account names to secrets, keys in ascending order.
//!
//! Writes go through a temp file in the same directory followed by a
//! rename, so a crash mid-save leaves either the old blob or the new one.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use super::secrets::Vault;
use crate::errors::{LoadFailure, PassVaultError, Result};

// ---------------------------------------------------------------------------
// Canonical encoding
// ---------------------------------------------------------------------------

/// Serialize `vault` into its canonical plaintext bytes.
///
/// The buffer is wiped when dropped.
pub fn encode(vault: &Vault) -> Result<Zeroizing<Vec<u8>>> {
    serde_json::to_vec(vault)
        .map(Zeroizing::new)
        .map_err(|e| PassVaultError::VaultSave(format!("serialization error: {e}")))
}

/// Parse decrypted plaintext back into a `Vault`.
///
/// The error only carries the position of the problem, never a fragment
/// of the plaintext.
pub fn decode(plaintext: &[u8]) -> std::result::Result<Vault, LoadFailure> {
    serde_json::from_slice(plaintext).map_err(|e| {
        LoadFailure::Malformed(format!(
            "expected an object of account names to secrets ({:?} error at line {}, column {})",
            e.classify(),
            e.line(),
            e.column()
        ))
    })
}

// ---------------------------------------------------------------------------
// Blob I/O
// ---------------------------------------------------------------------------

/// Read the raw blob at `path`.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn read_blob(path: &Path) -> std::result::Result<Option<Vec<u8>>, LoadFailure> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LoadFailure::Unreadable(e.to_string())),
    }
}

/// Write `blob` to `path` **atomically**.
///
/// 1. Write to a temp file in the same directory.
/// 2. `fsync` the temp file.
/// 3. Rename the temp file over the target path.
/// 4. `fsync` the parent directory (Unix only).
///
/// The temp file is removed again on every error path.
pub fn write_blob(path: &Path, blob: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut temp = TempFile::new(temp_path(path)?);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(temp.path())?;
    file.write_all(blob)?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp.path(), path)?;
    temp.disarm();

    fsync_dir(parent)
}

/// Temp file path next to the target: `.<name>.<pid>.tmp`.
fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })?;
    let temp_name = format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    );
    Ok(path.with_file_name(temp_name))
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Removes the temp file on drop unless it has been renamed into place.
struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
