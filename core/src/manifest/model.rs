use crate::contract::{EmbedTier, MetadataContract};
use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: &str = "1.0.0";

/// Embed health of one asset, derived from its tier.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    EVIDENCE_EMBEDDED,
    PARTIALLY_EMBEDDED,
    NOT_EMBEDDED,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestAsset {
    pub file_name: String,
    pub asset_id: String,
    pub sha256: String,
    pub embed_tier: EmbedTier,
    /// 0-100.
    pub health_score: u32,
    pub health_status: HealthStatus,
    pub missing_fields: Vec<String>,
    pub warnings: Vec<String>,
    /// Full copy of what was embedded, for re-embed recovery after a
    /// platform strips the file's tags.
    pub contract: MetadataContract,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TierCounts {
    pub incomplete: u32,
    pub basic: u32,
    pub evidence: u32,
    pub authority: u32,
}

impl TierCounts {
    pub fn record(&mut self, tier: EmbedTier) {
        match tier {
            EmbedTier::INCOMPLETE => self.incomplete += 1,
            EmbedTier::BASIC => self.basic += 1,
            EmbedTier::EVIDENCE => self.evidence += 1,
            EmbedTier::AUTHORITY => self.authority += 1,
        }
    }
}

/// Tamper-evident record of one export generation. `manifest_checksum` is a
/// hash of the manifest's own canonical JSON with that field blanked: a
/// pure function of content, recomputable by any reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportManifest {
    pub manifest_version: String,
    pub export_id: String,
    pub generated_at: String,
    pub business_name: String,
    pub total_assets: u32,
    pub tier_counts: TierCounts,
    pub assets: Vec<ManifestAsset>,
    pub manifest_checksum: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangedAsset {
    pub asset_id: String,
    pub old_sha256: String,
    pub new_sha256: String,
}

/// Diff of two export generations, keyed by asset id. A changed checksum
/// means a platform re-encoded or stripped a previously exported file and
/// it should be re-embedded from the manifest's stored contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<ChangedAsset>,
    pub unchanged: Vec<String>,
}
