use crate::canonical;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Free-text tag that carries the side-channel envelope. Facts with no
/// dedicated tag slot (audit trail, entity links, event anchors, narrative
/// intent) ride here as one marked JSON payload.
pub const ENVELOPE_TAG: &str = "IPTC:SpecialInstructions";

/// Marker prefix so the payload can be recognized and round-tripped.
pub const ENVELOPE_MARKER: &str = "PROVSEAL-ENV1:";

/// Hard budget for the serialized payload. The target is a fixed-width text
/// tag; unbounded accretion across merges would eventually corrupt it.
pub const MAX_ENVELOPE_BYTES: usize = 4096;

pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditNote {
    pub ts_utc: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntityLink {
    pub relation: String,
    pub asset_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventAnchor {
    pub event: String,
    pub sequence: u32,
}

/// Versioned side-channel envelope. Merged incrementally: read the existing
/// payload, fold in new facts, re-serialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SidecarEnvelope {
    pub envelope_version: u32,
    #[serde(default)]
    pub audit_trail: Vec<AuditNote>,
    #[serde(default)]
    pub entity_links: Vec<EntityLink>,
    #[serde(default)]
    pub event_anchors: Vec<EventAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative_intent: Option<String>,
}

impl Default for SidecarEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl SidecarEnvelope {
    pub fn new() -> Self {
        Self {
            envelope_version: ENVELOPE_VERSION,
            audit_trail: Vec::new(),
            entity_links: Vec::new(),
            event_anchors: Vec::new(),
            narrative_intent: None,
        }
    }

    /// Folds `other` into `self`. Audit notes append in order; links and
    /// anchors deduplicate; the newer narrative intent wins.
    pub fn merge(&mut self, other: &SidecarEnvelope) {
        self.envelope_version = self.envelope_version.max(other.envelope_version);
        self.audit_trail.extend(other.audit_trail.iter().cloned());
        for link in &other.entity_links {
            if !self.entity_links.contains(link) {
                self.entity_links.push(link.clone());
            }
        }
        for anchor in &other.event_anchors {
            if !self.event_anchors.contains(anchor) {
                self.event_anchors.push(anchor.clone());
            }
        }
        if other.narrative_intent.is_some() {
            self.narrative_intent = other.narrative_intent.clone();
        }
    }

    /// Marker-prefixed canonical JSON. Errors when the payload would blow
    /// the tag's size budget instead of silently truncating facts.
    pub fn to_tag_value(&self) -> CoreResult<String> {
        let bytes = canonical::to_canonical_bytes(self)?;
        let value = format!("{}{}", ENVELOPE_MARKER, String::from_utf8_lossy(&bytes));
        if value.len() > MAX_ENVELOPE_BYTES {
            return Err(CoreError::EnvelopeOverflow {
                limit: MAX_ENVELOPE_BYTES,
                actual: value.len(),
            });
        }
        Ok(value)
    }

    /// Recovers an envelope from a raw tag value. `Ok(None)` when the tag
    /// holds unrelated text; `Err` when the marker is present but the JSON
    /// behind it does not parse.
    pub fn parse_from_tag(raw: &str) -> CoreResult<Option<SidecarEnvelope>> {
        let trimmed = raw.trim();
        let Some(payload) = trimmed.strip_prefix(ENVELOPE_MARKER) else {
            return Ok(None);
        };
        let envelope: SidecarEnvelope = serde_json::from_str(payload).map_err(|e| {
            CoreError::InvalidInput(format!("malformed sidecar envelope: {}", e))
        })?;
        Ok(Some(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_tag_value() {
        let mut env = SidecarEnvelope::new();
        env.audit_trail.push(AuditNote {
            ts_utc: "2026-08-01T00:00:00Z".to_string(),
            note: "embedded".to_string(),
        });
        env.narrative_intent = Some("hero image".to_string());
        let tag = env.to_tag_value().unwrap();
        let back = SidecarEnvelope::parse_from_tag(&tag).unwrap().unwrap();
        assert_eq!(env, back);
    }

    #[test]
    fn merge_dedupes_links_and_keeps_audit_order() {
        let mut a = SidecarEnvelope::new();
        a.entity_links.push(EntityLink {
            relation: "series".to_string(),
            asset_id: "x".to_string(),
        });
        let mut b = SidecarEnvelope::new();
        b.entity_links.push(EntityLink {
            relation: "series".to_string(),
            asset_id: "x".to_string(),
        });
        b.audit_trail.push(AuditNote {
            ts_utc: "2026-08-02T00:00:00Z".to_string(),
            note: "re-embedded".to_string(),
        });
        a.merge(&b);
        assert_eq!(a.entity_links.len(), 1);
        assert_eq!(a.audit_trail.len(), 1);
    }

    #[test]
    fn oversized_payload_is_rejected_not_truncated() {
        let mut env = SidecarEnvelope::new();
        env.narrative_intent = Some("x".repeat(MAX_ENVELOPE_BYTES));
        match env.to_tag_value() {
            Err(CoreError::EnvelopeOverflow { limit, actual }) => {
                assert_eq!(limit, MAX_ENVELOPE_BYTES);
                assert!(actual > limit);
            }
            other => panic!("expected overflow, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn unrelated_tag_text_is_not_an_envelope() {
        assert!(SidecarEnvelope::parse_from_tag("handle with care")
            .unwrap()
            .is_none());
    }
}
