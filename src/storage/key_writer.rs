//! Key file writing utilities

use crate::domain::{DomainResult, KeyRole};
use crate::storage::cardano_format::CardanoKeyFile;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Write keys and wallet files
pub struct KeyWriter;

impl KeyWriter {
    /// Write a key as cardano-cli style .skey and .vkey files
    /// Returns paths to the created files: (skey_path, vkey_path)
    pub fn write_cardano_key_pair(
        role: KeyRole,
        seed: &[u8],
        vkey: &[u8; 32],
        output_dir: &Path,
    ) -> DomainResult<(PathBuf, PathBuf)> {
        // Ensure output directory exists
        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir)?;
        }

        let skey_path = output_dir.join(format!("{}.skey", role.default_filename()));
        Self::write_signing_key(role, seed, &skey_path)?;

        let vkey_path = output_dir.join(format!("{}.vkey", role.default_filename()));
        CardanoKeyFile::verification_key(role, vkey)?.write_to_file(&vkey_path)?;

        Ok((skey_path, vkey_path))
    }

    /// Write just the signing key (.skey), readable by the owner only
    pub fn write_signing_key(role: KeyRole, seed: &[u8], path: &Path) -> DomainResult<PathBuf> {
        CardanoKeyFile::signing_key(role, seed)?.write_to_file(path)?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600); // rw-------
            std::fs::set_permissions(path, perms)?;
        }

        Ok(path.to_path_buf())
    }

    /// Write any serializable value as pretty JSON
    pub fn write_json<T: Serialize>(value: &T, path: &Path) -> DomainResult<PathBuf> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(path.to_path_buf())
    }
}
