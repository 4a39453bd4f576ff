//! Relationship canonicalization and dedup.
//!
//! A physical relationship is discoverable twice: as a reference field on the
//! owning object and as a declared child relationship on the referenced one.
//! Candidates collapse on the sorted (from, to, field) key. When both
//! directions were seen, the owning side's declaration wins for kind and
//! required, regardless of which arrived first; the child-relationship view
//! of restricted_delete is a weaker signal than the field's own metadata.

use std::collections::HashMap;

use super::{RelationOrigin, Relationship};

pub(super) fn resolve(candidates: Vec<Relationship>) -> Vec<Relationship> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut resolved: Vec<Relationship> = Vec::new();

    for candidate in candidates {
        let key = candidate.canonical_key();
        match index.get(&key) {
            None => {
                index.insert(key, resolved.len());
                resolved.push(candidate);
            }
            Some(&slot) => {
                let kept = &resolved[slot];
                if kept.origin == RelationOrigin::Reverse
                    && candidate.origin == RelationOrigin::Forward
                {
                    if kept.kind != candidate.kind || kept.required != candidate.required {
                        log::debug!(
                            "Relationship {} -> {} via {}: sides disagree, keeping owning side",
                            candidate.from,
                            candidate.to,
                            candidate.field
                        );
                    }
                    resolved[slot] = candidate;
                }
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erd::RelationshipKind;

    fn rel(from: &str, to: &str, field: &str, origin: RelationOrigin) -> Relationship {
        Relationship {
            from: from.to_string(),
            to: to.to_string(),
            field: field.to_string(),
            field_label: field.to_string(),
            relationship_name: Some("Rels".to_string()),
            kind: RelationshipKind::Lookup,
            required: false,
            origin,
        }
    }

    #[test]
    fn test_both_directions_collapse() {
        let candidates = vec![
            rel("Contact", "Account", "AccountId", RelationOrigin::Forward),
            rel("Contact", "Account", "AccountId", RelationOrigin::Reverse),
        ];
        assert_eq!(resolve(candidates).len(), 1);
    }

    #[test]
    fn test_distinct_fields_kept() {
        let candidates = vec![
            rel("Quote", "Contact", "BillToContactId", RelationOrigin::Forward),
            rel("Quote", "Contact", "ShipToContactId", RelationOrigin::Forward),
        ];
        assert_eq!(resolve(candidates).len(), 2);
    }

    #[test]
    fn test_owning_side_wins_regardless_of_order() {
        let forward = Relationship {
            kind: RelationshipKind::MasterDetail,
            required: true,
            ..rel("Line__c", "Order__c", "OrderId", RelationOrigin::Forward)
        };
        let reverse = rel("Line__c", "Order__c", "OrderId", RelationOrigin::Reverse);

        let out = resolve(vec![reverse.clone(), forward.clone()]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, RelationshipKind::MasterDetail);
        assert!(out[0].required);

        // forward first: reverse never overrides it
        let out = resolve(vec![forward, reverse]);
        assert_eq!(out[0].kind, RelationshipKind::MasterDetail);
        assert!(out[0].required);
    }

    #[test]
    fn test_first_wins_within_same_origin() {
        let first = rel("A", "B", "BId", RelationOrigin::Reverse);
        let second = Relationship {
            required: true,
            ..rel("A", "B", "BId", RelationOrigin::Reverse)
        };
        let out = resolve(vec![first, second]);
        assert_eq!(out.len(), 1);
        assert!(!out[0].required);
    }

    #[test]
    fn test_output_preserves_discovery_order() {
        let candidates = vec![
            rel("B", "A", "AId", RelationOrigin::Forward),
            rel("C", "A", "AId", RelationOrigin::Forward),
            rel("B", "A", "AId", RelationOrigin::Reverse),
        ];
        let out = resolve(candidates);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].from, "B");
        assert_eq!(out[1].from, "C");
    }
}
