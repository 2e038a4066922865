pub mod envelope;

use crate::contract::constraints::sanitize_keywords;
use crate::contract::model::{has_value, AiGenerated};
use crate::contract::MetadataContract;
use std::collections::BTreeMap;

/// Fixed, versioned tooling attribution appended (never prepended) to the
/// user-supplied credit line.
pub const TOOL_ATTRIBUTION: &str = "ProvSeal Embed Engine 1.0";

/// Delimiter between the user credit and the tooling attribution.
pub const CREDIT_DELIMITER: &str = " | ";

/// Explicit logical-field -> physical-tag mapping across legacy IIM, Dublin
/// Core, rights, vendor extension, and basic EXIF description namespaces.
///
/// Each logical field lands in several physical tags because downstream
/// readers disagree on which namespace they honor. The redundancy is a
/// compatibility requirement, kept as a table so it stays auditable.
pub const FIELD_TARGETS: &[(&str, &[&str])] = &[
    ("objectName", &["IPTC:ObjectName", "XMP-dc:Title", "EXIF:XPTitle"]),
    (
        "captionAbstract",
        &[
            "IPTC:Caption-Abstract",
            "XMP-dc:Description",
            "EXIF:ImageDescription",
            "XMP-tiff:ImageDescription",
        ],
    ),
    ("byLine", &["IPTC:By-line", "XMP-dc:Creator", "EXIF:Artist"]),
    ("credit", &["IPTC:Credit", "XMP-photoshop:Credit"]),
    (
        "copyrightNotice",
        &["IPTC:CopyrightNotice", "XMP-dc:Rights", "EXIF:Copyright"],
    ),
    ("source", &["IPTC:Source", "XMP-photoshop:Source"]),
    ("keywords", &["IPTC:Keywords", "XMP-dc:Subject"]),
    ("city", &["IPTC:City", "XMP-photoshop:City"]),
    (
        "country",
        &["IPTC:Country-PrimaryLocationName", "XMP-photoshop:Country"],
    ),
    ("rightsUsageTerms", &["XMP-xmpRights:UsageTerms"]),
    (
        "businessName",
        &["XMP-provseal:BusinessName", "XMP-iptcExt:OrganisationInImageName"],
    ),
    ("jobType", &["XMP-provseal:JobType"]),
    ("serviceCategory", &["XMP-provseal:ServiceCategory"]),
    ("contextLine", &["XMP-provseal:ContextLine"]),
    ("outcomeProof", &["XMP-provseal:OutcomeProof"]),
    ("geoFocus", &["XMP-provseal:GeoFocus", "XMP-iptcCore:Location"]),
    ("assetId", &["XMP-provseal:AssetId", "XMP-dc:Identifier"]),
    ("exportId", &["XMP-provseal:ExportId"]),
    ("manifestRef", &["XMP-provseal:ManifestRef"]),
    ("checksum", &["XMP-provseal:Checksum"]),
    ("targetPage", &["XMP-provseal:TargetPage"]),
    ("pageRole", &["XMP-provseal:PageRole"]),
    ("clusterId", &["XMP-provseal:ClusterId"]),
    ("sceneType", &["XMP-provseal:SceneType", "XMP-iptcCore:IntellectualGenre"]),
    ("subjects", &["XMP-provseal:Subjects"]),
    ("emotionalTone", &["XMP-provseal:EmotionalTone"]),
    ("safetyValidated", &["XMP-provseal:SafetyValidated"]),
    ("confidence", &["XMP-provseal:VisionConfidence"]),
    ("governanceStatus", &["XMP-provseal:GovernanceStatus"]),
    ("governancePolicy", &["XMP-provseal:GovernancePolicy"]),
    ("governanceAiGenerated", &["XMP-provseal:AiGenerated"]),
    ("governanceAiConfidence", &["XMP-provseal:AiConfidence"]),
    ("governanceCheckedAt", &["XMP-provseal:GovernanceCheckedAt"]),
    ("governanceDecisionRef", &["XMP-provseal:GovernanceDecisionRef"]),
];

fn targets_for(field: &str) -> &'static [&'static str] {
    for (name, targets) in FIELD_TARGETS {
        if *name == field {
            return targets;
        }
    }
    &[]
}

/// User credit with the tooling attribution appended once. The user's credit
/// is never overwritten, only appended to.
pub fn credit_with_attribution(user_credit: &str) -> String {
    let user_credit = user_credit.trim();
    if user_credit.is_empty() {
        return TOOL_ATTRIBUTION.to_string();
    }
    if user_credit.contains(TOOL_ATTRIBUTION) {
        return user_credit.to_string();
    }
    format!("{}{}{}", user_credit, CREDIT_DELIMITER, TOOL_ATTRIBUTION)
}

/// The logical field/value pairs a contract resolves to, in table order.
/// Keywords are sanitized here; this is the set that physically lands in
/// the file, not the raw candidate list.
pub fn logical_values(contract: &MetadataContract) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    let mut push = |field: &str, value: String| {
        if !value.is_empty() {
            out.push((field.to_string(), value));
        }
    };

    let core = &contract.core;
    push_opt(&mut push, "objectName", &core.object_name);
    push_opt(&mut push, "captionAbstract", &core.caption_abstract);
    push_opt(&mut push, "byLine", &core.by_line);
    if let Some(credit) = core.credit.as_deref() {
        push("credit", credit_with_attribution(credit));
    } else {
        push("credit", credit_with_attribution(""));
    }
    push_opt(&mut push, "copyrightNotice", &core.copyright_notice);
    push_opt(&mut push, "source", &core.source);
    let keywords = sanitize_keywords(&core.keywords);
    if !keywords.is_empty() {
        push("keywords", keywords.join(", "));
    }
    push_opt(&mut push, "city", &core.city);
    push_opt(&mut push, "country", &core.country);
    push_opt(&mut push, "rightsUsageTerms", &core.rights_usage_terms);

    if let Some(ext) = contract.extension.as_ref() {
        push_opt(&mut push, "businessName", &ext.business_name);
        if let Some(job_type) = ext.job_type {
            push("jobType", job_type.as_str().to_string());
        }
        push_opt(&mut push, "serviceCategory", &ext.service_category);
        push_opt(&mut push, "contextLine", &ext.context_line);
        push_opt(&mut push, "outcomeProof", &ext.outcome_proof);
        push_opt(&mut push, "geoFocus", &ext.geo_focus);
        push_opt(&mut push, "assetId", &ext.asset_id);
        push_opt(&mut push, "exportId", &ext.export_id);
        push_opt(&mut push, "manifestRef", &ext.manifest_ref);
        push_opt(&mut push, "checksum", &ext.checksum);
        push_opt(&mut push, "targetPage", &ext.target_page);
        if let Some(page_role) = ext.page_role {
            push("pageRole", page_role.as_str().to_string());
        }
        push_opt(&mut push, "clusterId", &ext.cluster_id);
        push_opt(&mut push, "sceneType", &ext.scene_type);
        if !ext.subjects.is_empty() {
            push("subjects", ext.subjects.join(", "));
        }
        push_opt(&mut push, "emotionalTone", &ext.emotional_tone);
        push("safetyValidated", ext.safety_validated.to_string());
        if let Some(conf) = ext.confidence {
            push("confidence", conf.to_string());
        }
        if let Some(gov) = ext.governance.as_ref() {
            push(
                "governanceStatus",
                gov.status.as_str().to_string(),
            );
            push(
                "governancePolicy",
                gov.policy.as_str().to_string(),
            );
            let ai = match gov.ai_generated {
                AiGenerated::True => "true",
                AiGenerated::False => "false",
                AiGenerated::Unknown => "unknown",
            };
            push("governanceAiGenerated", ai.to_string());
            if let Some(conf) = gov.ai_confidence {
                push("governanceAiConfidence", format!("{:.2}", conf));
            }
            push_opt(&mut push, "governanceCheckedAt", &gov.checked_at);
            push_opt(&mut push, "governanceDecisionRef", &gov.decision_ref);
        }
    }

    out
}

fn push_opt<F: FnMut(&str, String)>(push: &mut F, field: &str, value: &Option<String>) {
    if has_value(value) {
        push(field, value.as_deref().unwrap_or_default().trim().to_string());
    }
}

/// Expands a contract into the flat physical tag set, one entry per target
/// tag key. Deterministic and side-effect-free: same contract, same map.
pub fn build_tag_set(contract: &MetadataContract) -> BTreeMap<String, String> {
    let mut tags: BTreeMap<String, String> = BTreeMap::new();
    for (field, value) in logical_values(contract) {
        for target in targets_for(&field) {
            tags.insert(target.to_string(), value.clone());
        }
    }
    tags
}
