use super::model::HealthStatus;
use crate::contract::constraints::{
    MAX_CAPTION_CHARS, MAX_KEYWORDS, MIN_CAPTION_CHARS, MIN_KEYWORDS,
};
use crate::contract::model::GovernanceStatus;
use crate::contract::tier::{
    missing_core_fields, missing_evidence_fields, missing_recommended_fields,
};
use crate::contract::{EmbedTier, MetadataContract};

pub const DEDUCT_MISSING_CORE: i32 = 8;
pub const DEDUCT_MISSING_EVIDENCE: i32 = 6;
pub const DEDUCT_OUT_OF_RANGE: i32 = 5;
pub const DEDUCT_MISSING_RECOMMENDED: i32 = 1;
pub const DEDUCT_GOVERNANCE_BLOCKED: i32 = 2;

/// Weighted completeness score: start at 100, deduct per defect, clamp at 0.
pub fn health_score(contract: &MetadataContract) -> u32 {
    let mut score: i32 = 100;
    let ext = contract.extension.as_ref();

    score -= DEDUCT_MISSING_CORE * missing_core_fields(&contract.core).len() as i32;
    score -= DEDUCT_MISSING_EVIDENCE * missing_evidence_fields(ext).len() as i32;
    score -= DEDUCT_MISSING_RECOMMENDED * missing_recommended_fields(ext).len() as i32;

    let kw = contract.core.keywords.len();
    if kw < MIN_KEYWORDS || kw > MAX_KEYWORDS {
        score -= DEDUCT_OUT_OF_RANGE;
    }
    if let Some(caption) = contract.core.caption_abstract.as_deref() {
        let chars = caption.chars().count();
        if chars < MIN_CAPTION_CHARS || chars > MAX_CAPTION_CHARS {
            score -= DEDUCT_OUT_OF_RANGE;
        }
    }
    if let Some(gov) = ext.and_then(|e| e.governance.as_ref()) {
        if gov.status == GovernanceStatus::Blocked {
            score -= DEDUCT_GOVERNANCE_BLOCKED;
        }
    }

    score.clamp(0, 100) as u32
}

pub fn health_status(tier: EmbedTier) -> HealthStatus {
    match tier {
        EmbedTier::AUTHORITY | EmbedTier::EVIDENCE => HealthStatus::EVIDENCE_EMBEDDED,
        EmbedTier::BASIC => HealthStatus::PARTIALLY_EMBEDDED,
        EmbedTier::INCOMPLETE => HealthStatus::NOT_EMBEDDED,
    }
}
