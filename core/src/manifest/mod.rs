pub mod checksum;
pub mod health;
pub mod model;

use crate::contract::tier::{
    calculate_embed_tier, missing_core_fields, missing_evidence_fields,
};
use crate::contract::MetadataContract;
use crate::error::CoreResult;
use crate::validator::validate_metadata_contract;
use crate::writer::now_rfc3339_utc;
use checksum::{calculate_file_checksum, compute_manifest_checksum};
use health::{health_score, health_status};
use model::{
    ChangedAsset, ExportManifest, ManifestAsset, ManifestDiff, TierCounts, MANIFEST_VERSION,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One asset entering a manifest: the file on disk plus the contract that
/// was (or will be) embedded into it.
#[derive(Debug, Clone)]
pub struct ManifestInput {
    pub file_path: PathBuf,
    pub contract: MetadataContract,
}

#[derive(Debug, Clone)]
pub struct ExportMeta {
    /// Minted as a fresh ULID when absent.
    pub export_id: Option<String>,
    pub business_name: String,
}

/// Outcome of loading a persisted manifest. A seal mismatch is reported as
/// data, never thrown; the caller decides whether to trust or regenerate.
#[derive(Debug, Clone)]
pub struct ManifestReadResult {
    pub manifest: ExportManifest,
    pub integrity_ok: bool,
    pub warning: Option<String>,
}

/// Builds the checksum-sealed manifest for a batch of exported assets.
/// Per-asset checksum and health computation is independent; ordering
/// follows the input slice.
pub fn generate_manifest(
    inputs: &[ManifestInput],
    meta: &ExportMeta,
) -> CoreResult<ExportManifest> {
    let mut assets: Vec<ManifestAsset> = Vec::with_capacity(inputs.len());
    let mut tier_counts = TierCounts::default();

    for input in inputs {
        let sha256 = calculate_file_checksum(&input.file_path)?;
        let tier = calculate_embed_tier(&input.contract);
        tier_counts.record(tier);

        let ext = input.contract.extension.as_ref();
        let mut missing_fields: Vec<String> = missing_core_fields(&input.contract.core)
            .iter()
            .map(|s| s.to_string())
            .collect();
        missing_fields.extend(missing_evidence_fields(ext).iter().map(|s| s.to_string()));

        let validation = validate_metadata_contract(&input.contract);
        let warnings: Vec<String> = validation
            .warnings
            .iter()
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        let file_name = input
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input.file_path.to_string_lossy().to_string());
        let asset_id = ext
            .and_then(|e| e.asset_id.clone())
            .unwrap_or_default();

        assets.push(ManifestAsset {
            file_name,
            asset_id,
            sha256,
            embed_tier: tier,
            health_score: health_score(&input.contract),
            health_status: health_status(tier),
            missing_fields,
            warnings,
            contract: input.contract.clone(),
        });
    }

    let mut manifest = ExportManifest {
        manifest_version: MANIFEST_VERSION.to_string(),
        export_id: meta
            .export_id
            .clone()
            .unwrap_or_else(|| ulid::Ulid::new().to_string()),
        generated_at: now_rfc3339_utc(),
        business_name: meta.business_name.clone(),
        total_assets: assets.len() as u32,
        tier_counts,
        assets,
        manifest_checksum: String::new(),
    };
    manifest.manifest_checksum = compute_manifest_checksum(&manifest)?;
    Ok(manifest)
}

/// Persists the manifest as pretty-printed JSON. Callers serialize manifest
/// writes relative to content finalization; this is a single atomic-enough
/// `fs::write` of the already-sealed record.
pub fn write_manifest(path: &Path, manifest: &ExportManifest) -> CoreResult<()> {
    let mut body = serde_json::to_string_pretty(manifest)?;
    body.push('\n');
    std::fs::write(path, body)?;
    Ok(())
}

/// Loads a manifest and re-verifies its seal. Returns `Ok(None)` when the
/// file does not exist.
pub fn read_manifest(path: &Path) -> CoreResult<Option<ManifestReadResult>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path)?;
    let manifest: ExportManifest = serde_json::from_slice(&bytes)?;
    let recomputed = compute_manifest_checksum(&manifest)?;
    let integrity_ok = recomputed == manifest.manifest_checksum;
    let warning = if integrity_ok {
        None
    } else {
        Some(format!(
            "manifest checksum mismatch: stored {} recomputed {}; content may have been tampered with or corrupted",
            manifest.manifest_checksum, recomputed
        ))
    };
    Ok(Some(ManifestReadResult {
        manifest,
        integrity_ok,
        warning,
    }))
}

/// Diffs two export generations by asset id: entries that appeared,
/// disappeared, or whose file checksum changed since the older manifest.
pub fn compare_manifests(old: &ExportManifest, new: &ExportManifest) -> ManifestDiff {
    let old_by_id: BTreeMap<&str, &ManifestAsset> = old
        .assets
        .iter()
        .map(|a| (a.asset_id.as_str(), a))
        .collect();
    let new_by_id: BTreeMap<&str, &ManifestAsset> = new
        .assets
        .iter()
        .map(|a| (a.asset_id.as_str(), a))
        .collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();
    let mut unchanged = Vec::new();
    for (id, new_asset) in &new_by_id {
        match old_by_id.get(id) {
            None => added.push(id.to_string()),
            Some(old_asset) if old_asset.sha256 != new_asset.sha256 => {
                changed.push(ChangedAsset {
                    asset_id: id.to_string(),
                    old_sha256: old_asset.sha256.clone(),
                    new_sha256: new_asset.sha256.clone(),
                });
            }
            Some(_) => unchanged.push(id.to_string()),
        }
    }
    let removed: Vec<String> = old_by_id
        .keys()
        .filter(|id| !new_by_id.contains_key(**id))
        .map(|id| id.to_string())
        .collect();

    ManifestDiff {
        added,
        removed,
        changed,
        unchanged,
    }
}

/// Deterministic forensic companion to the manifest: one row per asset,
/// sorted by asset id.
pub fn render_asset_hashes_csv(manifest: &ExportManifest) -> CoreResult<String> {
    let mut rows: Vec<&ManifestAsset> = manifest.assets.iter().collect();
    rows.sort_by(|a, b| (&a.asset_id, &a.file_name).cmp(&(&b.asset_id, &b.file_name)));

    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([
        "asset_id",
        "file_name",
        "sha256",
        "embed_tier",
        "health_score",
    ])?;
    for r in rows {
        let tier = r.embed_tier.to_string();
        let score = r.health_score.to_string();
        wtr.write_record([
            r.asset_id.as_str(),
            r.file_name.as_str(),
            r.sha256.as_str(),
            tier.as_str(),
            score.as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}
