use super::constraints::format_title;
use super::model::{
    GovernanceAttestation, IptcCore, JobType, MetadataContract, PageRole, XmpExtension,
};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Candidate metadata as produced by the upstream vision/LLM pipeline.
/// String-typed enums are parsed (and rejected) at this boundary; past it,
/// everything is a closed sum type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedMetadataInput {
    pub session_type: String,
    pub subject: String,
    pub caption: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_type: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default)]
    pub safety_validated: bool,
}

/// Business and rights context supplied alongside the synthesized values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    pub business_name: String,
    pub creator: String,
    pub credit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// When absent, a default `© {year} {business}. All rights reserved.`
    /// notice is generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright_notice: Option<String>,
    pub city: String,
    pub country: String,
    pub rights_usage_terms: String,
    pub job_type: String,
    pub service_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_proof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance: Option<GovernanceAttestation>,
}

/// Fresh RFC 4122 v4 asset id, formatted from 128 random bits with the
/// version and variant bits forced.
pub fn new_asset_id() -> String {
    let mut b: [u8; 16] = rand::random();
    b[6] = (b[6] & 0x0f) | 0x40;
    b[8] = (b[8] & 0x3f) | 0x80;
    let h = hex::encode(b);
    format!(
        "{}-{}-{}-{}-{}",
        &h[0..8],
        &h[8..12],
        &h[12..16],
        &h[16..20],
        &h[20..32]
    )
}

pub fn default_copyright_notice(business_name: &str) -> String {
    let year = time::OffsetDateTime::now_utc().year();
    format!("© {} {}. All rights reserved.", year, business_name)
}

/// Adapts synthesized values plus business context into a candidate
/// [`MetadataContract`]: formats the title, fills the default copyright
/// string, and mints a fresh asset id. Unknown enum strings are rejected
/// here rather than carried forward as free text.
pub fn into_contract(
    input: &SynthesizedMetadataInput,
    ctx: &BusinessContext,
) -> CoreResult<MetadataContract> {
    let job_type = JobType::from_str(&ctx.job_type).map_err(CoreError::InvalidInput)?;
    let page_role = match &ctx.page_role {
        Some(raw) => Some(PageRole::from_str(raw).map_err(CoreError::InvalidInput)?),
        None => None,
    };

    let copyright_notice = ctx
        .copyright_notice
        .clone()
        .unwrap_or_else(|| default_copyright_notice(&ctx.business_name));

    let core = IptcCore {
        object_name: Some(format_title(
            &ctx.business_name,
            &input.session_type,
            &input.subject,
        )),
        caption_abstract: Some(input.caption.clone()),
        by_line: Some(ctx.creator.clone()),
        credit: Some(ctx.credit.clone()),
        copyright_notice: Some(copyright_notice),
        source: ctx.source.clone(),
        keywords: input.keywords.clone(),
        city: Some(ctx.city.clone()),
        country: Some(ctx.country.clone()),
        rights_usage_terms: Some(ctx.rights_usage_terms.clone()),
    };

    let extension = XmpExtension {
        scene_type: input.scene_type.clone(),
        subjects: input.subjects.clone(),
        emotional_tone: input.emotional_tone.clone(),
        safety_validated: input.safety_validated,
        confidence: input.confidence,
        business_name: Some(ctx.business_name.clone()),
        job_type: Some(job_type),
        service_category: Some(ctx.service_category.clone()),
        context_line: ctx.context_line.clone(),
        outcome_proof: ctx.outcome_proof.clone(),
        geo_focus: ctx.geo_focus.clone(),
        asset_id: Some(new_asset_id()),
        export_id: None,
        manifest_ref: None,
        checksum: None,
        target_page: ctx.target_page.clone(),
        page_role,
        cluster_id: ctx.cluster_id.clone(),
        governance: ctx.governance.clone(),
    };

    Ok(MetadataContract {
        core,
        extension: Some(extension),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_asset_ids_are_v4_shaped() {
        let id = new_asset_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.as_bytes()[14], b'4');
        assert!(matches!(
            id.as_bytes()[19],
            b'8' | b'9' | b'a' | b'b'
        ));
    }

    fn input() -> SynthesizedMetadataInput {
        SynthesizedMetadataInput {
            session_type: "Wedding".to_string(),
            subject: "Golden Hour".to_string(),
            caption: "caption".to_string(),
            keywords: vec!["wedding".to_string()],
            scene_type: None,
            subjects: vec![],
            emotional_tone: None,
            confidence: Some(90),
            safety_validated: false,
        }
    }

    fn ctx() -> BusinessContext {
        BusinessContext {
            business_name: "Lumen Studio".to_string(),
            creator: "A. Photographer".to_string(),
            credit: "Lumen Studio".to_string(),
            source: None,
            copyright_notice: None,
            city: "Portland".to_string(),
            country: "USA".to_string(),
            rights_usage_terms: "Editorial use".to_string(),
            job_type: "case-study".to_string(),
            service_category: "Wedding".to_string(),
            context_line: None,
            outcome_proof: None,
            geo_focus: None,
            target_page: None,
            page_role: Some("trust".to_string()),
            cluster_id: None,
            governance: None,
        }
    }

    #[test]
    fn contract_gets_formatted_title_default_copyright_and_fresh_id() {
        let contract = into_contract(&input(), &ctx()).unwrap();
        assert_eq!(
            contract.core.object_name.as_deref(),
            Some("Lumen Studio – Wedding – Golden Hour")
        );
        let notice = contract.core.copyright_notice.unwrap();
        assert!(notice.starts_with("© "));
        assert!(notice.contains("Lumen Studio"));
        let ext = contract.extension.unwrap();
        assert_eq!(ext.job_type, Some(JobType::CaseStudy));
        assert_eq!(ext.page_role, Some(PageRole::Trust));
        assert_eq!(ext.asset_id.unwrap().len(), 36);
    }

    #[test]
    fn unknown_enum_strings_are_rejected() {
        let mut bad = ctx();
        bad.job_type = "headshots".to_string();
        match into_contract(&input(), &bad) {
            Err(CoreError::InvalidInput(msg)) => assert!(msg.contains("headshots")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|_| ())),
        }
    }
}
