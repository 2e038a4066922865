pub mod session;

use crate::contract::tier::{calculate_embed_tier, EmbedTier};
use crate::contract::MetadataContract;
use crate::error::{CoreError, CoreResult};
use crate::mapper::envelope::{SidecarEnvelope, ENVELOPE_TAG};
use crate::mapper::{build_tag_set, logical_values};
use crate::validator::validate_metadata_contract;
use serde::{Deserialize, Serialize};
use session::SessionHandle;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Read-back whitelist: logical field -> alternate tag names. Readers
/// disagree on canonical naming, so each field is accepted under any of
/// its known aliases.
pub const VERIFY_FIELDS: &[(&str, &[&str])] = &[
    (
        "objectName",
        &["IPTC:ObjectName", "XMP-dc:Title", "ObjectName", "Title"],
    ),
    (
        "captionAbstract",
        &[
            "IPTC:Caption-Abstract",
            "XMP-dc:Description",
            "Caption-Abstract",
            "Description",
            "ImageDescription",
        ],
    ),
    (
        "byLine",
        &["IPTC:By-line", "XMP-dc:Creator", "By-line", "Creator", "Artist"],
    ),
    ("credit", &["IPTC:Credit", "XMP-photoshop:Credit", "Credit"]),
    (
        "copyrightNotice",
        &[
            "IPTC:CopyrightNotice",
            "XMP-dc:Rights",
            "CopyrightNotice",
            "Rights",
            "Copyright",
        ],
    ),
    (
        "keywords",
        &["IPTC:Keywords", "XMP-dc:Subject", "Keywords", "Subject"],
    ),
    ("businessName", &["XMP-provseal:BusinessName", "BusinessName"]),
    (
        "assetId",
        &["XMP-provseal:AssetId", "XMP-dc:Identifier", "AssetId", "Identifier"],
    ),
];

#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub skip_validation: bool,
    pub verify: bool,
    /// Stage to a distinct output path instead of writing in place.
    pub output_path: Option<PathBuf>,
    /// Side-channel facts to merge into the file's existing envelope.
    pub envelope: Option<SidecarEnvelope>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            skip_validation: false,
            verify: true,
            output_path: None,
            envelope: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub source_path: PathBuf,
    pub contract: MetadataContract,
    pub options: WriteOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteLogEntry {
    pub ts_utc: String,
    pub step: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub checked: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponse {
    pub success: bool,
    pub output_path: PathBuf,
    pub fields_written: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationReport>,
    pub tier: EmbedTier,
    pub logs: Vec<WriteLogEntry>,
}

pub(crate) fn now_rfc3339_utc() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::new())
}

struct LogTrail {
    entries: Vec<WriteLogEntry>,
}

impl LogTrail {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, step: &str, message: impl Into<String>) {
        self.entries.push(WriteLogEntry {
            ts_utc: now_rfc3339_utc(),
            step: step.to_string(),
            message: message.into(),
        });
    }
}

/// The authoritative embed path for one asset:
/// validate -> stage -> map -> physical write -> read-back verify -> tier.
///
/// Validation failure aborts with the full [`ValidationResult`]; a failed
/// tool write aborts with [`CoreError::WriteAborted`], carrying the mapped
/// fields and the log trail. Read-back misses are warnings only; a successful
/// physical write is sufficient for success.
pub fn write_authoritative_metadata(
    handle: &mut SessionHandle,
    req: &WriteRequest,
) -> CoreResult<WriteResponse> {
    let mut trail = LogTrail::new();

    // 1) Validate.
    if req.options.skip_validation {
        trail.push("validate", "skipped by request");
    } else {
        let result = validate_metadata_contract(&req.contract);
        trail.push(
            "validate",
            format!(
                "{} error(s), {} warning(s)",
                result.errors.len(),
                result.warnings.len()
            ),
        );
        if !result.valid {
            return Err(CoreError::ValidationFailed(result));
        }
    }

    // 2) Stage output.
    let output_path = match req.options.output_path.as_ref() {
        Some(dest) if dest != &req.source_path => {
            std::fs::copy(&req.source_path, dest)?;
            trail.push("stage", format!("copied source to {}", dest.display()));
            dest.clone()
        }
        _ => {
            trail.push("stage", "writing in place");
            req.source_path.clone()
        }
    };

    // 3) Map.
    let mut tags = build_tag_set(&req.contract);
    let fields_written: Vec<String> = logical_values(&req.contract)
        .into_iter()
        .map(|(field, _)| field)
        .collect();
    trail.push(
        "map",
        format!(
            "{} logical fields -> {} physical tags",
            fields_written.len(),
            tags.len()
        ),
    );

    if let Some(facts) = req.options.envelope.as_ref() {
        let merged = merge_envelope(handle, &output_path, facts, &mut trail)?;
        tags.insert(ENVELOPE_TAG.to_string(), merged.to_tag_value()?);
    }

    // 4) Physical write, overwriting stale tags. A tool failure here aborts
    // with the mapped-field list and the trail so far, not a bare error.
    if let Err(e) = handle.write_tags(&output_path, &tags, true) {
        trail.push("write", format!("tool write failed: {}", e));
        let (code, message) = match e {
            CoreError::TagToolFailed { code, message } => (code, message),
            other => ("WRITE_FAILED".to_string(), other.to_string()),
        };
        return Err(CoreError::WriteAborted {
            code,
            message,
            fields_mapped: fields_written,
            logs: trail.entries,
        });
    }
    trail.push("write", format!("{} tags written", tags.len()));

    // 5) Read-back verify.
    let verification = if req.options.verify {
        let read_back = handle.read_tags(&output_path)?;
        let mut checked = Vec::new();
        let mut missing = Vec::new();
        for (field, alternates) in VERIFY_FIELDS {
            checked.push(field.to_string());
            let found = alternates.iter().any(|alt| {
                read_back
                    .get(*alt)
                    .map_or(false, |value| !value.trim().is_empty())
            });
            if !found {
                missing.push(field.to_string());
                trail.push(
                    "verify",
                    format!("{} not found under any known tag name", field),
                );
            }
        }
        if missing.is_empty() {
            trail.push("verify", "all required fields confirmed");
        }
        Some(VerificationReport { checked, missing })
    } else {
        trail.push("verify", "skipped by request");
        None
    };

    // 6) Tier classification.
    let tier = calculate_embed_tier(&req.contract);
    trail.push("tier", tier.to_string());

    Ok(WriteResponse {
        success: true,
        output_path,
        fields_written,
        verification,
        tier,
        logs: trail.entries,
    })
}

// Read the file's existing envelope (if any), fold the new facts in, and
// hand back the merged record for re-serialization into the same tag.
fn merge_envelope(
    handle: &mut SessionHandle,
    path: &Path,
    facts: &SidecarEnvelope,
    trail: &mut LogTrail,
) -> CoreResult<SidecarEnvelope> {
    let existing = match handle.read_tags(path) {
        Ok(tags) => tags.get(ENVELOPE_TAG).cloned(),
        Err(e) => {
            trail.push("envelope", format!("pre-read failed, starting fresh: {}", e));
            None
        }
    };
    let mut merged = match existing.as_deref() {
        Some(raw) => match SidecarEnvelope::parse_from_tag(raw) {
            Ok(Some(env)) => {
                trail.push("envelope", "merged into existing envelope");
                env
            }
            Ok(None) => {
                trail.push("envelope", "tag held unrelated text, starting fresh");
                SidecarEnvelope::new()
            }
            Err(e) => {
                trail.push("envelope", format!("unreadable envelope, starting fresh: {}", e));
                SidecarEnvelope::new()
            }
        },
        None => SidecarEnvelope::new(),
    };
    merged.merge(facts);
    Ok(merged)
}
