//! Breadth-first schema traversal with depth and size bounds.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{
    exclude, fields, ErdOptions, RelationOrigin, Relationship, RelationshipKind, RenderObject,
    TraversalMode,
};
use crate::schema::SchemaProvider;

/// FIFO work queue of discovered-but-unprocessed objects.
///
/// The queue gives level-order pops; the depth map doubles as the membership
/// check. First discovery wins: inserting a name already queued is a no-op,
/// so an object keeps its minimum discovery depth.
struct Frontier {
    queue: VecDeque<String>,
    depths: HashMap<String, u32>,
}

impl Frontier {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            depths: HashMap::new(),
        }
    }

    fn insert(&mut self, name: String, depth: u32) {
        if self.depths.contains_key(&name) {
            return;
        }
        self.depths.insert(name.clone(), depth);
        self.queue.push_back(name);
    }

    fn contains(&self, name: &str) -> bool {
        self.depths.contains_key(name)
    }

    fn pop(&mut self) -> Option<(String, u32)> {
        let name = self.queue.pop_front()?;
        let depth = self.depths.remove(&name)?;
        Some((name, depth))
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Raw traversal result, before relationship resolution.
pub(super) struct TraversalOutcome {
    /// Successfully processed objects, in discovery order.
    pub objects: Vec<RenderObject>,
    /// Relationship candidates; may contain both directions of the same
    /// physical relationship.
    pub candidates: Vec<Relationship>,
    pub truncated: bool,
    /// Frontier entries abandoned when the object ceiling hit.
    pub unprocessed: usize,
}

/// Walk the schema graph breadth-first from `roots`.
///
/// Cannot fail: describe errors exclude the one object and traversal
/// continues. Exactly one describe call is outstanding at a time.
pub(super) async fn traverse(
    provider: &dyn SchemaProvider,
    roots: &[String],
    options: &ErdOptions,
) -> TraversalOutcome {
    let mut frontier = Frontier::new();
    for root in roots {
        frontier.insert(root.clone(), 0);
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut objects: Vec<RenderObject> = Vec::new();
    let mut candidates: Vec<Relationship> = Vec::new();
    let mut truncated = false;

    while !frontier.is_empty() {
        if let Some(max) = options.max_objects {
            if visited.len() >= max {
                // Remaining frontier entries are abandoned, not processed.
                truncated = true;
                break;
            }
        }

        let Some((name, depth)) = frontier.pop() else {
            break;
        };

        if visited.contains(&name) {
            continue;
        }

        if exclude::is_excluded(&name) {
            log::debug!("Skipping system object {}", name);
            continue;
        }

        let describe = match provider.describe(&name).await {
            Ok(d) => d,
            Err(e) => {
                // Non-fatal: drop this object, keep walking the rest.
                log::warn!("Failed to describe {}: {}", name, e);
                continue;
            }
        };

        visited.insert(name.clone());

        let expand = match options.mode {
            TraversalMode::RootsOnly => false,
            TraversalMode::Expand => depth < options.max_depth,
        };

        // Forward direction: reference fields on this object.
        for field in &describe.fields {
            if !field.is_reference() {
                continue;
            }
            for target in &field.reference_to {
                if target == &name || exclude::is_excluded(target) {
                    continue;
                }
                if options.mode == TraversalMode::RootsOnly && !roots.contains(target) {
                    continue;
                }

                candidates.push(Relationship {
                    from: name.clone(),
                    to: target.clone(),
                    field: field.name.clone(),
                    field_label: field.label.clone(),
                    relationship_name: field.relationship_name.clone(),
                    kind: if field.cascade_delete {
                        RelationshipKind::MasterDetail
                    } else {
                        RelationshipKind::Lookup
                    },
                    required: !field.nillable,
                    origin: RelationOrigin::Forward,
                });

                if expand && !visited.contains(target) && !frontier.contains(target) {
                    frontier.insert(target.clone(), depth + 1);
                }
            }
        }

        // Reverse direction: declared child relationships. Recording these
        // here means a relationship exists even when the child itself is
        // never processed.
        for child_rel in &describe.child_relationships {
            // Entries without a child object, FK field or relationship name
            // are malformed or synthetic; skip them silently.
            let (Some(child), Some(fk_field), Some(rel_name)) = (
                child_rel.child_s_object.as_ref(),
                child_rel.field.as_ref(),
                child_rel.relationship_name.as_ref(),
            ) else {
                continue;
            };

            if exclude::is_excluded(child) {
                continue;
            }
            if options.mode == TraversalMode::RootsOnly && !roots.contains(child) {
                continue;
            }

            candidates.push(Relationship {
                from: child.clone(),
                to: name.clone(),
                field: fk_field.clone(),
                field_label: fk_field.clone(),
                relationship_name: Some(rel_name.clone()),
                kind: if child_rel.cascade_delete {
                    RelationshipKind::MasterDetail
                } else {
                    RelationshipKind::Lookup
                },
                required: !child_rel.restricted_delete,
                origin: RelationOrigin::Reverse,
            });

            if expand && !visited.contains(child) && !frontier.contains(child) {
                frontier.insert(child.clone(), depth + 1);
            }
        }

        objects.push(RenderObject {
            name: describe.name.clone(),
            label: describe.label.clone(),
            custom: describe.custom,
            fields: fields::extract_key_fields(&describe),
        });
    }

    TraversalOutcome {
        objects,
        candidates,
        truncated,
        unprocessed: frontier.len(),
    }
}
