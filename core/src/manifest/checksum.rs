use super::model::ExportManifest;
use crate::canonical;
use crate::error::CoreResult;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// SHA-256 over the file's bytes, hex-encoded. Deterministic for the same
/// bytes, sensitive to any single-byte change.
pub fn calculate_file_checksum(path: &Path) -> CoreResult<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// The self-sealing manifest checksum: canonical JSON of the manifest with
/// `manifest_checksum` blanked, hashed. Recomputing over the same asset list
/// always yields the same value.
pub fn compute_manifest_checksum(manifest: &ExportManifest) -> CoreResult<String> {
    let mut unsealed = manifest.clone();
    unsealed.manifest_checksum = String::new();
    let bytes = canonical::to_canonical_bytes(&unsealed)?;
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    Ok(hex::encode(hasher.finalize()))
}
