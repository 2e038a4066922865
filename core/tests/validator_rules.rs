use provseal_core::contract::model::{
    AiGenerated, GovernanceAttestation, GovernancePolicy, GovernanceStatus, IptcCore, JobType,
    MetadataContract, PageRole, XmpExtension,
};
use provseal_core::error::CoreError;
use provseal_core::validator::{
    assert_valid_metadata, is_export_ready, validate_metadata_contract, validation_report,
};

fn caption() -> String {
    "Documentary coverage of the ceremony and reception at the lakeside venue, \
     including the first look, vow exchange, and golden-hour portraits of the \
     couple. Shot on assignment for the studio's wedding service records."
        .to_string()
}

fn keywords() -> Vec<String> {
    ["wedding", "sunset", "bride", "groom", "lakeside"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn full_core() -> IptcCore {
    IptcCore {
        object_name: Some("Lumen Studio – Wedding – Golden Hour".to_string()),
        caption_abstract: Some(caption()),
        by_line: Some("A. Photographer".to_string()),
        credit: Some("Lumen Studio".to_string()),
        copyright_notice: Some("© 2026 Lumen Studio. All rights reserved.".to_string()),
        source: Some("Lumen Studio".to_string()),
        keywords: keywords(),
        city: Some("Portland".to_string()),
        country: Some("USA".to_string()),
        rights_usage_terms: Some("Editorial and portfolio use only.".to_string()),
    }
}

fn full_extension() -> XmpExtension {
    XmpExtension {
        scene_type: Some("outdoor ceremony".to_string()),
        subjects: vec!["couple".to_string()],
        emotional_tone: Some("joyful".to_string()),
        safety_validated: false,
        confidence: Some(92),
        business_name: Some("Lumen Studio".to_string()),
        job_type: Some(JobType::CaseStudy),
        service_category: Some("Wedding".to_string()),
        context_line: Some("Full-day coverage, June 2026".to_string()),
        outcome_proof: None,
        geo_focus: Some("Portland, OR".to_string()),
        asset_id: Some("3f2a1b4c-9d8e-4f01-8a2b-1c3d4e5f6a7b".to_string()),
        export_id: None,
        manifest_ref: Some("manifest.json".to_string()),
        checksum: Some("abc123".to_string()),
        target_page: Some("/weddings".to_string()),
        page_role: Some(PageRole::Trust),
        cluster_id: None,
        governance: None,
    }
}

fn full_contract() -> MetadataContract {
    MetadataContract {
        core: full_core(),
        extension: Some(full_extension()),
    }
}

fn has_error(contract: &MetadataContract, field: &str) -> bool {
    validate_metadata_contract(contract)
        .errors
        .iter()
        .any(|e| e.field == field)
}

fn has_warning(contract: &MetadataContract, field: &str) -> bool {
    validate_metadata_contract(contract)
        .warnings
        .iter()
        .any(|w| w.field == field)
}

#[test]
fn full_contract_passes() {
    let result = validate_metadata_contract(&full_contract());
    assert!(result.valid, "unexpected errors: {:?}", result.errors);
    assert!(is_export_ready(&full_contract()));
    assert_valid_metadata(&full_contract()).unwrap();
}

#[test]
fn each_missing_core_field_yields_matching_error() {
    let cases: Vec<(&str, Box<dyn Fn(&mut IptcCore)>)> = vec![
        ("objectName", Box::new(|c| c.object_name = None)),
        ("captionAbstract", Box::new(|c| c.caption_abstract = None)),
        ("byLine", Box::new(|c| c.by_line = None)),
        ("credit", Box::new(|c| c.credit = None)),
        ("copyrightNotice", Box::new(|c| c.copyright_notice = None)),
        ("city", Box::new(|c| c.city = None)),
        ("country", Box::new(|c| c.country = None)),
        ("rightsUsageTerms", Box::new(|c| c.rights_usage_terms = None)),
    ];
    for (field, strip) in cases {
        let mut contract = full_contract();
        strip(&mut contract.core);
        let result = validate_metadata_contract(&contract);
        assert!(!result.valid, "{} should block", field);
        assert!(
            result.errors.iter().any(|e| e.field == field),
            "no error referencing {}: {:?}",
            field,
            result.errors
        );
    }
}

#[test]
fn too_few_keywords_is_a_blocking_error() {
    // Scenario A.
    let mut contract = full_contract();
    contract.core.keywords = vec![
        "wedding".to_string(),
        "sunset".to_string(),
        "bride".to_string(),
    ];
    let result = validate_metadata_contract(&contract);
    assert!(!result.valid);
    let err = result
        .errors
        .iter()
        .find(|e| e.field == "keywords")
        .expect("keywords error");
    assert_eq!(err.rule, "min_count");
    assert!(err.message.contains("too few keywords"));
}

#[test]
fn overlong_title_is_a_blocking_error() {
    // Scenario B.
    let mut contract = full_contract();
    contract.core.object_name = Some("x".repeat(70));
    let result = validate_metadata_contract(&contract);
    assert!(!result.valid);
    let err = result
        .errors
        .iter()
        .find(|e| e.field == "objectName")
        .expect("objectName error");
    assert!(err.message.contains("title too long"));
}

#[test]
fn short_caption_blocks_long_caption_warns() {
    let mut contract = full_contract();
    contract.core.caption_abstract = Some("too short".to_string());
    assert!(has_error(&contract, "captionAbstract"));

    let mut contract = full_contract();
    contract.core.caption_abstract = Some("x".repeat(1300));
    assert!(!has_error(&contract, "captionAbstract"));
    assert!(has_warning(&contract, "captionAbstract"));
}

#[test]
fn all_violations_are_collected_not_short_circuited() {
    let contract = MetadataContract {
        core: IptcCore::default(),
        extension: None,
    };
    let result = validate_metadata_contract(&contract);
    // Every required core field, the keyword minimum, and the missing
    // extension record all surface in a single pass.
    assert!(result.errors.len() >= 10, "got {:?}", result.errors);
}

#[test]
fn missing_extension_record_blocks() {
    let contract = MetadataContract {
        core: full_core(),
        extension: None,
    };
    assert!(has_error(&contract, "extension"));
}

#[test]
fn missing_evidence_fields_block() {
    let mut contract = full_contract();
    {
        let ext = contract.extension.as_mut().unwrap();
        ext.business_name = None;
        ext.job_type = None;
        ext.service_category = None;
        ext.asset_id = None;
    }
    for field in ["businessName", "jobType", "serviceCategory", "assetId"] {
        assert!(has_error(&contract, field), "missing {} error", field);
    }
}

#[test]
fn malformed_asset_id_blocks() {
    let mut contract = full_contract();
    contract.extension.as_mut().unwrap().asset_id = Some("not-a-uuid".to_string());
    let result = validate_metadata_contract(&contract);
    let err = result
        .errors
        .iter()
        .find(|e| e.field == "assetId")
        .expect("assetId error");
    assert_eq!(err.rule, "format");
}

#[test]
fn sensitive_subjects_without_safety_flag_block() {
    let mut contract = full_contract();
    {
        let ext = contract.extension.as_mut().unwrap();
        ext.subjects = vec!["newborn".to_string(), "parents".to_string()];
        ext.safety_validated = false;
    }
    let result = validate_metadata_contract(&contract);
    let err = result
        .errors
        .iter()
        .find(|e| e.field == "safetyValidated")
        .expect("safety gate error");
    assert_eq!(err.rule, "safety_gate");

    contract.extension.as_mut().unwrap().safety_validated = true;
    assert!(validate_metadata_contract(&contract).valid);
}

#[test]
fn safety_gate_matches_scene_type_too() {
    let mut contract = full_contract();
    contract.extension.as_mut().unwrap().scene_type =
        Some("child portrait session".to_string());
    assert!(has_error(&contract, "safetyValidated"));
}

#[test]
fn low_confidence_warns_but_never_blocks() {
    let mut contract = full_contract();
    contract.extension.as_mut().unwrap().confidence = Some(40);
    let result = validate_metadata_contract(&contract);
    assert!(result.valid);
    assert!(result.warnings.iter().any(|w| w.field == "confidence"));
}

#[test]
fn spam_and_duplicate_keywords_warn_pre_sanitization() {
    let mut contract = full_contract();
    contract.core.keywords = vec![
        "wedding".to_string(),
        "wedding".to_string(),
        "cheap".to_string(),
        "bride".to_string(),
        "groom".to_string(),
    ];
    let result = validate_metadata_contract(&contract);
    assert!(result.valid, "warnings must not block: {:?}", result.errors);
    assert!(result.warnings.iter().any(|w| w.message.contains("spam")));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message.contains("duplicate")));
}

#[test]
fn missing_recommended_fields_warn() {
    let mut contract = full_contract();
    {
        let ext = contract.extension.as_mut().unwrap();
        ext.target_page = None;
        ext.page_role = None;
        ext.manifest_ref = None;
        ext.checksum = None;
    }
    let result = validate_metadata_contract(&contract);
    assert!(result.valid);
    for field in ["targetPage", "pageRole", "manifestRef", "checksum"] {
        assert!(
            result.warnings.iter().any(|w| w.field == field),
            "expected warning for {}",
            field
        );
    }
}

#[test]
fn governance_bounds_warn() {
    let mut contract = full_contract();
    contract.extension.as_mut().unwrap().governance = Some(GovernanceAttestation {
        ai_generated: AiGenerated::Unknown,
        ai_confidence: Some(1.7),
        status: GovernanceStatus::Pending,
        policy: GovernancePolicy::Conditional,
        reason: None,
        checked_at: Some("yesterday".to_string()),
        decision_ref: None,
    });
    let result = validate_metadata_contract(&contract);
    assert!(result.valid);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.field == "governance.aiConfidence"));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.field == "governance.checkedAt"));
}

#[test]
fn assert_valid_metadata_carries_the_result() {
    let mut contract = full_contract();
    contract.core.city = None;
    match assert_valid_metadata(&contract) {
        Err(CoreError::ValidationFailed(result)) => {
            assert!(result.errors.iter().any(|e| e.field == "city"));
        }
        other => panic!("expected ValidationFailed, got {:?}", other.err()),
    }
}

#[test]
fn report_itemizes_errors_and_warnings() {
    let mut contract = full_contract();
    contract.core.country = None;
    contract.extension.as_mut().unwrap().confidence = Some(10);
    let report = validation_report(&contract);
    assert!(report.starts_with("VALIDATION: FAIL"));
    assert!(report.contains("ERROR [required] country"));
    assert!(report.contains("WARN  confidence"));

    assert!(validation_report(&full_contract()).starts_with("VALIDATION: PASS"));
}
