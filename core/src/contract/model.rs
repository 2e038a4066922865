use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The full embedding contract for one asset: legacy descriptive/rights core
/// plus the proof-first extension record. Candidate contracts arrive partial;
/// required-ness is enforced by the validator, not the type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataContract {
    pub core: IptcCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<XmpExtension>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IptcCore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_abstract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright_notice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rights_usage_terms: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct XmpExtension {
    // Secondary AI-classification signals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_type: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<String>,
    #[serde(default)]
    pub safety_validated: bool,
    /// Vision pipeline confidence, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,

    // Proof-first evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_proof: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_focus: Option<String>,

    // Continuity and linkage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,

    // IA structure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_role: Option<PageRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance: Option<GovernanceAttestation>,
}

/// Upstream AI-content policy decision, carried through for portability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceAttestation {
    pub ai_generated: AiGenerated,
    /// 0.00-1.00.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_confidence: Option<f64>,
    pub status: GovernanceStatus,
    pub policy: GovernancePolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// RFC 3339 timestamp of the upstream decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AiGenerated {
    True,
    False,
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    ServiceProof,
    CaseStudy,
    Portfolio,
    Testimonial,
    BeforeAfter,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::ServiceProof => "service-proof",
            JobType::CaseStudy => "case-study",
            JobType::Portfolio => "portfolio",
            JobType::Testimonial => "testimonial",
            JobType::BeforeAfter => "before-after",
        }
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "service-proof" => Ok(JobType::ServiceProof),
            "case-study" => Ok(JobType::CaseStudy),
            "portfolio" => Ok(JobType::Portfolio),
            "testimonial" => Ok(JobType::Testimonial),
            "before-after" => Ok(JobType::BeforeAfter),
            other => Err(format!("unknown job type: {}", other)),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageRole {
    Money,
    Trust,
    Support,
    Authority,
}

impl PageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageRole::Money => "money",
            PageRole::Trust => "trust",
            PageRole::Support => "support",
            PageRole::Authority => "authority",
        }
    }
}

impl FromStr for PageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "money" => Ok(PageRole::Money),
            "trust" => Ok(PageRole::Trust),
            "support" => Ok(PageRole::Support),
            "authority" => Ok(PageRole::Authority),
            other => Err(format!("unknown page role: {}", other)),
        }
    }
}

impl fmt::Display for PageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GovernanceStatus {
    Approved,
    Blocked,
    Warning,
    Pending,
}

impl GovernanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GovernanceStatus::Approved => "approved",
            GovernanceStatus::Blocked => "blocked",
            GovernanceStatus::Warning => "warning",
            GovernanceStatus::Pending => "pending",
        }
    }
}

impl FromStr for GovernanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(GovernanceStatus::Approved),
            "blocked" => Ok(GovernanceStatus::Blocked),
            "warning" => Ok(GovernanceStatus::Warning),
            "pending" => Ok(GovernanceStatus::Pending),
            other => Err(format!("unknown governance status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GovernancePolicy {
    DenyAiProof,
    Conditional,
    Allow,
}

impl GovernancePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GovernancePolicy::DenyAiProof => "deny_ai_proof",
            GovernancePolicy::Conditional => "conditional",
            GovernancePolicy::Allow => "allow",
        }
    }
}

impl FromStr for GovernancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deny_ai_proof" => Ok(GovernancePolicy::DenyAiProof),
            "conditional" => Ok(GovernancePolicy::Conditional),
            "allow" => Ok(GovernancePolicy::Allow),
            other => Err(format!("unknown governance policy: {}", other)),
        }
    }
}

pub(crate) fn has_value(field: &Option<String>) -> bool {
    field.as_deref().map_or(false, |s| !s.trim().is_empty())
}
