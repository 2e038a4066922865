use provseal_core::contract::model::{IptcCore, JobType, MetadataContract, XmpExtension};
use provseal_core::mapper::{
    build_tag_set, credit_with_attribution, logical_values, CREDIT_DELIMITER, FIELD_TARGETS,
    TOOL_ATTRIBUTION,
};

fn contract() -> MetadataContract {
    MetadataContract {
        core: IptcCore {
            object_name: Some("Lumen Studio – Wedding – Golden Hour".to_string()),
            caption_abstract: Some("Golden-hour portraits at the lakeside venue.".to_string()),
            by_line: Some("A. Photographer".to_string()),
            credit: Some("Lumen Studio".to_string()),
            copyright_notice: Some("© 2026 Lumen Studio".to_string()),
            source: Some("Lumen Studio".to_string()),
            keywords: vec!["wedding", "sunset", "bride", "groom", "lakeside"]
                .into_iter()
                .map(String::from)
                .collect(),
            city: Some("Portland".to_string()),
            country: Some("USA".to_string()),
            rights_usage_terms: Some("Editorial use only".to_string()),
        },
        extension: Some(XmpExtension {
            business_name: Some("Lumen Studio".to_string()),
            job_type: Some(JobType::ServiceProof),
            service_category: Some("Wedding".to_string()),
            asset_id: Some("3f2a1b4c-9d8e-4f01-8a2b-1c3d4e5f6a7b".to_string()),
            ..XmpExtension::default()
        }),
    }
}

#[test]
fn logical_fields_expand_to_every_target_namespace() {
    let tags = build_tag_set(&contract());
    // Title redundancy across legacy IIM, Dublin Core, and EXIF.
    for key in ["IPTC:ObjectName", "XMP-dc:Title", "EXIF:XPTitle"] {
        assert_eq!(
            tags.get(key).map(String::as_str),
            Some("Lumen Studio – Wedding – Golden Hour"),
            "missing {}",
            key
        );
    }
    for key in ["IPTC:CopyrightNotice", "XMP-dc:Rights", "EXIF:Copyright"] {
        assert!(tags.contains_key(key), "missing {}", key);
    }
    assert_eq!(
        tags.get("XMP-provseal:AssetId").map(String::as_str),
        Some("3f2a1b4c-9d8e-4f01-8a2b-1c3d4e5f6a7b")
    );
    assert_eq!(
        tags.get("XMP-dc:Identifier"),
        tags.get("XMP-provseal:AssetId")
    );
}

#[test]
fn mapping_table_has_no_duplicate_target_collisions() {
    // Two logical fields must never claim the same physical tag.
    let mut seen = std::collections::BTreeSet::new();
    for (field, targets) in FIELD_TARGETS {
        for target in *targets {
            assert!(seen.insert(*target), "{} reclaims tag {}", field, target);
        }
    }
}

#[test]
fn keywords_are_sanitized_before_mapping() {
    let mut c = contract();
    c.core.keywords.push("the golden hour".to_string());
    c.core.keywords.push("cheap".to_string());
    let tags = build_tag_set(&c);
    let joined = tags.get("IPTC:Keywords").unwrap();
    assert!(joined.contains("golden hour"));
    assert!(!joined.contains("the golden hour"));
    assert!(!joined.contains("cheap"));
}

#[test]
fn credit_appends_attribution_without_overwriting() {
    let credited = credit_with_attribution("Lumen Studio");
    assert_eq!(
        credited,
        format!("Lumen Studio{}{}", CREDIT_DELIMITER, TOOL_ATTRIBUTION)
    );
    assert!(credited.starts_with("Lumen Studio"));

    // Re-applying never stacks a second attribution.
    assert_eq!(credit_with_attribution(&credited), credited);

    assert_eq!(credit_with_attribution(""), TOOL_ATTRIBUTION);
}

#[test]
fn credit_lands_in_both_credit_namespaces() {
    let tags = build_tag_set(&contract());
    let expected = credit_with_attribution("Lumen Studio");
    assert_eq!(tags.get("IPTC:Credit"), Some(&expected));
    assert_eq!(tags.get("XMP-photoshop:Credit"), Some(&expected));
}

#[test]
fn tag_set_is_deterministic() {
    let a = build_tag_set(&contract());
    let b = build_tag_set(&contract());
    assert_eq!(a, b);
}

#[test]
fn absent_fields_produce_no_tags() {
    let c = MetadataContract {
        core: IptcCore {
            object_name: Some("Title".to_string()),
            ..IptcCore::default()
        },
        extension: None,
    };
    let tags = build_tag_set(&c);
    assert!(tags.contains_key("IPTC:ObjectName"));
    assert!(!tags.contains_key("IPTC:City"));
    assert!(!tags.contains_key("XMP-provseal:BusinessName"));
}

#[test]
fn fields_written_reflect_logical_values() {
    let fields: Vec<String> = logical_values(&contract())
        .into_iter()
        .map(|(f, _)| f)
        .collect();
    assert!(fields.contains(&"objectName".to_string()));
    assert!(fields.contains(&"businessName".to_string()));
    assert!(!fields.contains(&"contextLine".to_string()));
}
