use crate::contract::constraints::{
    is_sentence_like, is_spam_term, MAX_CAPTION_CHARS, MAX_KEYWORDS, MAX_KEYWORD_CHARS,
    MAX_TITLE_CHARS, MIN_CAPTION_CHARS, MIN_KEYWORDS,
};
use crate::contract::model::has_value;
use crate::contract::{GovernanceAttestation, MetadataContract, XmpExtension};
use crate::error::{CoreError, CoreResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Vision confidence below this is flagged (warning only, never blocking).
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 70;

/// Hard-coded compliance rule, not business-configurable: scene/subject
/// signals matching these require `safetyValidated = true` before any write.
const SENSITIVE_SUBJECT_TERMS: &[&str] = &[
    "newborn", "baby", "babies", "infant", "toddler", "child", "children", "minor", "minors",
    "kid", "kids",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

/// Errors block the write; warnings advise. All rules run on every call so
/// a caller can present the complete remediation list at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationWarning>,
}

struct Collector {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationWarning>,
}

impl Collector {
    fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn error(&mut self, field: &str, rule: &str, message: String) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            rule: rule.to_string(),
            message,
        });
    }

    fn warn(&mut self, field: &str, message: String) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message,
        });
    }

    fn finish(self) -> ValidationResult {
        ValidationResult {
            valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

fn sensitive_subject_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternation = SENSITIVE_SUBJECT_TERMS.join("|");
        Regex::new(&format!(r"(?i)\b({})\b", alternation)).unwrap()
    })
}

fn uuid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .unwrap()
    })
}

/// Runs every rule against a candidate contract and collects all violations.
/// Never short-circuits on first failure.
pub fn validate_metadata_contract(contract: &MetadataContract) -> ValidationResult {
    let mut c = Collector::new();

    check_required_core(contract, &mut c);
    check_keywords(contract, &mut c);
    check_safety_gate(contract, &mut c);

    match contract.extension.as_ref() {
        Some(ext) => {
            check_evidence_fields(ext, &mut c);
            check_confidence(ext, &mut c);
            check_recommended_fields(ext, &mut c);
            if let Some(gov) = ext.governance.as_ref() {
                check_governance(gov, &mut c);
            }
        }
        None => {
            c.error(
                "extension",
                "required",
                "extension record is required; caption-only embeds are not accepted".to_string(),
            );
        }
    }

    c.finish()
}

fn check_required_core(contract: &MetadataContract, c: &mut Collector) {
    let core = &contract.core;

    match core.object_name.as_deref() {
        Some(title) if !title.trim().is_empty() => {
            let chars = title.chars().count();
            if chars > MAX_TITLE_CHARS {
                c.error(
                    "objectName",
                    "max_length",
                    format!("title too long: {} > {} chars", chars, MAX_TITLE_CHARS),
                );
            }
        }
        _ => c.error("objectName", "required", "objectName is required".to_string()),
    }

    match core.caption_abstract.as_deref() {
        Some(caption) if !caption.trim().is_empty() => {
            let chars = caption.chars().count();
            if chars < MIN_CAPTION_CHARS {
                c.error(
                    "captionAbstract",
                    "min_length",
                    format!(
                        "caption too short: {} < {} chars",
                        chars, MIN_CAPTION_CHARS
                    ),
                );
            } else if chars > MAX_CAPTION_CHARS {
                c.warn(
                    "captionAbstract",
                    format!(
                        "caption exceeds {} chars ({}); downstream readers may truncate",
                        MAX_CAPTION_CHARS, chars
                    ),
                );
            }
        }
        _ => c.error(
            "captionAbstract",
            "required",
            "captionAbstract is required".to_string(),
        ),
    }

    let required_scalars: [(&str, &Option<String>); 6] = [
        ("byLine", &core.by_line),
        ("credit", &core.credit),
        ("copyrightNotice", &core.copyright_notice),
        ("city", &core.city),
        ("country", &core.country),
        ("rightsUsageTerms", &core.rights_usage_terms),
    ];
    for (field, value) in required_scalars {
        if !has_value(value) {
            c.error(field, "required", format!("{} is required", field));
        }
    }
}

// Pre-sanitization signal: sanitization removes the offending items before
// the actual write, so everything beyond the minimum count is advisory.
fn check_keywords(contract: &MetadataContract, c: &mut Collector) {
    let keywords = &contract.core.keywords;

    if keywords.len() < MIN_KEYWORDS {
        c.error(
            "keywords",
            "min_count",
            format!("too few keywords: {} < {}", keywords.len(), MIN_KEYWORDS),
        );
    }
    if keywords.len() > MAX_KEYWORDS {
        c.warn(
            "keywords",
            format!(
                "{} keywords exceed the maximum of {}; extras will be dropped",
                keywords.len(),
                MAX_KEYWORDS
            ),
        );
    }

    let mut seen: BTreeSet<String> = BTreeSet::new();
    for kw in keywords {
        let trimmed = kw.trim();
        if trimmed.chars().count() > MAX_KEYWORD_CHARS {
            c.warn(
                "keywords",
                format!("keyword \"{}\" exceeds {} chars", trimmed, MAX_KEYWORD_CHARS),
            );
        }
        if is_sentence_like(trimmed) {
            c.warn(
                "keywords",
                format!("keyword \"{}\" reads as a sentence fragment", trimmed),
            );
        }
        if is_spam_term(trimmed) {
            c.warn(
                "keywords",
                format!("keyword \"{}\" matches the spam blocklist", trimmed),
            );
        }
        if !seen.insert(trimmed.to_lowercase()) {
            c.warn("keywords", format!("duplicate keyword \"{}\"", trimmed));
        }
    }
}

fn check_safety_gate(contract: &MetadataContract, c: &mut Collector) {
    let Some(ext) = contract.extension.as_ref() else {
        return;
    };
    let mut signals: Vec<&str> = Vec::new();
    if let Some(scene) = ext.scene_type.as_deref() {
        signals.push(scene);
    }
    for s in &ext.subjects {
        signals.push(s.as_str());
    }
    let joined = signals.join(" ");
    if sensitive_subject_re().is_match(&joined) && !ext.safety_validated {
        c.error(
            "safetyValidated",
            "safety_gate",
            "sensitive subject category detected (minors/newborns) without safetyValidated=true"
                .to_string(),
        );
    }
}

fn check_evidence_fields(ext: &XmpExtension, c: &mut Collector) {
    if !has_value(&ext.business_name) {
        c.error(
            "businessName",
            "required",
            "businessName is required on the extension record".to_string(),
        );
    }
    if ext.job_type.is_none() {
        c.error(
            "jobType",
            "required",
            "jobType is required on the extension record".to_string(),
        );
    }
    if !has_value(&ext.service_category) {
        c.error(
            "serviceCategory",
            "required",
            "serviceCategory is required on the extension record".to_string(),
        );
    }
    match ext.asset_id.as_deref() {
        Some(id) if !id.trim().is_empty() => {
            if !uuid_re().is_match(id.trim()) {
                c.error(
                    "assetId",
                    "format",
                    format!("assetId \"{}\" is not a UUID", id.trim()),
                );
            }
        }
        _ => c.error(
            "assetId",
            "required",
            "assetId is required on the extension record".to_string(),
        ),
    }
}

fn check_confidence(ext: &XmpExtension, c: &mut Collector) {
    if let Some(conf) = ext.confidence {
        if conf > 100 {
            c.warn(
                "confidence",
                format!("confidence {} is out of the 0-100 range", conf),
            );
        } else if conf < LOW_CONFIDENCE_THRESHOLD {
            c.warn(
                "confidence",
                format!(
                    "low vision confidence: {} < {}",
                    conf, LOW_CONFIDENCE_THRESHOLD
                ),
            );
        }
    }
}

fn check_recommended_fields(ext: &XmpExtension, c: &mut Collector) {
    if !has_value(&ext.context_line) && !has_value(&ext.outcome_proof) {
        c.warn(
            "contextLine",
            "neither contextLine nor outcomeProof set; AUTHORITY tier is unreachable".to_string(),
        );
    }
    if !has_value(&ext.target_page) {
        c.warn("targetPage", "targetPage not set".to_string());
    }
    if ext.page_role.is_none() {
        c.warn("pageRole", "pageRole not set".to_string());
    }
    if !has_value(&ext.checksum) {
        c.warn("checksum", "no file checksum recorded on the contract".to_string());
    }
    if !has_value(&ext.manifest_ref) {
        c.warn("manifestRef", "no manifest reference recorded".to_string());
    }
}

fn check_governance(gov: &GovernanceAttestation, c: &mut Collector) {
    if let Some(conf) = gov.ai_confidence {
        if !(0.0..=1.0).contains(&conf) {
            c.warn(
                "governance.aiConfidence",
                format!("aiConfidence {} is out of the 0.00-1.00 range", conf),
            );
        }
    }
    if let Some(ts) = gov.checked_at.as_deref() {
        if OffsetDateTime::parse(ts, &Rfc3339).is_err() {
            c.warn(
                "governance.checkedAt",
                format!("checkedAt \"{}\" is not an RFC 3339 timestamp", ts),
            );
        }
    }
}

/// Hard-failure form: aborts the write path when any blocking error exists.
pub fn assert_valid_metadata(contract: &MetadataContract) -> CoreResult<()> {
    let result = validate_metadata_contract(contract);
    if result.valid {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed(result))
    }
}

/// Non-throwing boolean form.
pub fn is_export_ready(contract: &MetadataContract) -> bool {
    validate_metadata_contract(contract).valid
}

/// Human-readable pass/fail report with itemized errors and warnings.
pub fn validation_report(contract: &MetadataContract) -> String {
    let result = validate_metadata_contract(contract);
    let mut out = String::new();
    out.push_str(if result.valid {
        "VALIDATION: PASS\n"
    } else {
        "VALIDATION: FAIL\n"
    });
    out.push_str(&format!(
        "errors: {}  warnings: {}\n",
        result.errors.len(),
        result.warnings.len()
    ));
    for e in &result.errors {
        out.push_str(&format!("  ERROR [{}] {}: {}\n", e.rule, e.field, e.message));
    }
    for w in &result.warnings {
        out.push_str(&format!("  WARN  {}: {}\n", w.field, w.message));
    }
    out
}
