use super::constraints::MIN_KEYWORDS;
use super::model::{has_value, IptcCore, MetadataContract, XmpExtension};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field-completeness classification. Derived, never stored as a transition;
/// callers recompute it from the contract every time.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum EmbedTier {
    INCOMPLETE,
    BASIC,
    EVIDENCE,
    AUTHORITY,
}

impl fmt::Display for EmbedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EmbedTier::INCOMPLETE => "INCOMPLETE",
            EmbedTier::BASIC => "BASIC",
            EmbedTier::EVIDENCE => "EVIDENCE",
            EmbedTier::AUTHORITY => "AUTHORITY",
        };
        f.write_str(s)
    }
}

/// Required core fields, in manifest (camelCase) naming.
pub fn missing_core_fields(core: &IptcCore) -> Vec<&'static str> {
    let mut missing = Vec::new();
    let checks: [(&str, &Option<String>); 8] = [
        ("objectName", &core.object_name),
        ("captionAbstract", &core.caption_abstract),
        ("byLine", &core.by_line),
        ("credit", &core.credit),
        ("copyrightNotice", &core.copyright_notice),
        ("city", &core.city),
        ("country", &core.country),
        ("rightsUsageTerms", &core.rights_usage_terms),
    ];
    for (name, value) in checks {
        if !has_value(value) {
            missing.push(name);
        }
    }
    if core.keywords.len() < MIN_KEYWORDS {
        missing.push("keywords");
    }
    missing
}

/// Required proof-first evidence fields. An absent extension record counts
/// as all four missing.
pub fn missing_evidence_fields(extension: Option<&XmpExtension>) -> Vec<&'static str> {
    let Some(ext) = extension else {
        return vec!["businessName", "jobType", "serviceCategory", "assetId"];
    };
    let mut missing = Vec::new();
    if !has_value(&ext.business_name) {
        missing.push("businessName");
    }
    if ext.job_type.is_none() {
        missing.push("jobType");
    }
    if !has_value(&ext.service_category) {
        missing.push("serviceCategory");
    }
    if !has_value(&ext.asset_id) {
        missing.push("assetId");
    }
    missing
}

/// Recommended-but-optional fields whose absence suppresses tier advancement
/// and costs health points, without blocking export.
pub fn missing_recommended_fields(extension: Option<&XmpExtension>) -> Vec<&'static str> {
    let Some(ext) = extension else {
        return vec![
            "contextLine",
            "outcomeProof",
            "targetPage",
            "pageRole",
            "checksum",
            "manifestRef",
        ];
    };
    let mut missing = Vec::new();
    if !has_value(&ext.context_line) {
        missing.push("contextLine");
    }
    if !has_value(&ext.outcome_proof) {
        missing.push("outcomeProof");
    }
    if !has_value(&ext.target_page) {
        missing.push("targetPage");
    }
    if ext.page_role.is_none() {
        missing.push("pageRole");
    }
    if !has_value(&ext.checksum) {
        missing.push("checksum");
    }
    if !has_value(&ext.manifest_ref) {
        missing.push("manifestRef");
    }
    missing
}

/// Monotonic completeness ladder: adding fields never lowers the tier.
///
/// BASIC requires every required core field plus at least `MIN_KEYWORDS`
/// keywords; EVIDENCE adds the four required evidence fields; AUTHORITY adds
/// (targetPage AND pageRole) AND (contextLine OR outcomeProof).
pub fn calculate_embed_tier(contract: &MetadataContract) -> EmbedTier {
    if !missing_core_fields(&contract.core).is_empty() {
        return EmbedTier::INCOMPLETE;
    }
    let ext = contract.extension.as_ref();
    if !missing_evidence_fields(ext).is_empty() {
        return EmbedTier::BASIC;
    }
    // Evidence fields proved present, so ext is Some here.
    let Some(ext) = ext else {
        return EmbedTier::BASIC;
    };
    let placed = has_value(&ext.target_page) && ext.page_role.is_some();
    let contextualized = has_value(&ext.context_line) || has_value(&ext.outcome_proof);
    if placed && contextualized {
        EmbedTier::AUTHORITY
    } else {
        EmbedTier::EVIDENCE
    }
}
