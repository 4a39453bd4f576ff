//! ERD generation: bounded BFS over the schema graph plus Mermaid output.
//!
//! Seeds a frontier with the requested root objects, walks reference fields
//! and child relationships breadth-first under depth/size limits, collapses
//! relationships discovered from both directions, and serializes the result
//! as a Mermaid `erDiagram`.

mod exclude;
mod fields;
mod mermaid;
mod resolve;
mod traversal;

pub use exclude::is_excluded;

use serde::Serialize;

use crate::schema::{FieldType, SchemaProvider};

// Above these, browser-side Mermaid rendering tends to fall over.
const WARN_OBJECTS: usize = 40;
const WARN_RELATIONSHIPS: usize = 150;

/// How far the traversal expands beyond the roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    /// Follow relationships up to the configured depth.
    #[default]
    Expand,
    /// Show only the supplied roots and the relationships among them.
    RootsOnly,
}

/// Entity rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Entities with their key fields.
    #[default]
    Full,
    /// Bare entity names, no fields.
    Compact,
}

/// Knobs for one ERD generation run.
#[derive(Debug, Clone)]
pub struct ErdOptions {
    /// How many relationship hops from the roots (0 = roots only, but see
    /// [`TraversalMode::RootsOnly`] for suppressing expansion entirely).
    pub max_depth: u32,
    /// Ceiling on processed objects; None = unbounded. Callers wanting
    /// bounded latency must set this or a finite depth.
    pub max_objects: Option<usize>,
    /// Display truncation only; does not affect which fields are extracted.
    pub max_fields_per_object: usize,
    pub display: DisplayMode,
    pub mode: TraversalMode,
}

impl Default for ErdOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_objects: None,
            max_fields_per_object: 8,
            display: DisplayMode::Full,
            mode: TraversalMode::Expand,
        }
    }
}

/// Which direction a relationship candidate was discovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationOrigin {
    /// Seen on the owning side, as a reference field.
    Forward,
    /// Seen on the referenced side, as a declared child relationship.
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    /// Optional, non-cascading reference.
    Lookup,
    /// Cascade-deleting reference (tighter coupling).
    MasterDetail,
}

/// One schema relationship: `from` owns the foreign key, `to` is referenced.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    /// Foreign-key field name on `from`.
    pub field: String,
    pub field_label: String,
    pub relationship_name: Option<String>,
    pub kind: RelationshipKind,
    pub required: bool,
    pub origin: RelationOrigin,
}

impl Relationship {
    /// Order-independent identity for dedup: the same physical relationship
    /// is discoverable from both sides.
    pub fn canonical_key(&self) -> String {
        let mut parts = [self.from.as_str(), self.to.as_str(), self.field.as_str()];
        parts.sort_unstable();
        parts.join("|")
    }
}

/// Display role of an extracted key field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFieldTag {
    Primary,
    Name,
    ForeignKey,
}

/// One field selected for display in an entity block.
#[derive(Debug, Clone)]
pub struct KeyField {
    pub name: String,
    pub field_type: FieldType,
    pub tag: KeyFieldTag,
    /// First target object for foreign keys.
    pub reference_to: Option<String>,
    pub required: bool,
}

/// A visited object reduced to what the serializer needs.
#[derive(Debug, Clone)]
pub struct RenderObject {
    pub name: String,
    pub label: String,
    pub custom: bool,
    pub fields: Vec<KeyField>,
}

/// Result of one ERD generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErdOutput {
    pub mermaid_code: String,
    /// Object names in discovery order.
    pub objects_included: Vec<String>,
    /// Count after dedup, before endpoint filtering.
    pub relationship_count: usize,
    /// True when the object ceiling stopped the traversal early.
    pub truncated: bool,
    /// Advisory only: the diagram may be too large for browser rendering.
    pub may_exceed_render_limit: bool,
    /// Processed objects plus frontier entries abandoned at the ceiling.
    pub total_objects_found: usize,
}

/// Generate an ERD reachable from `roots`.
///
/// Traversal cannot fail outright: per-object describe failures are logged
/// and absorbed, and an empty root list yields an empty diagram. The provider
/// is invoked serially, once per distinct object name.
pub async fn generate_erd(
    provider: &dyn SchemaProvider,
    roots: &[String],
    options: &ErdOptions,
) -> ErdOutput {
    let outcome = traversal::traverse(provider, roots, options).await;

    let may_exceed_render_limit =
        outcome.objects.len() > WARN_OBJECTS || outcome.candidates.len() > WARN_RELATIONSHIPS;

    let total_objects_found = outcome.objects.len() + outcome.unprocessed;
    let relationships = resolve::resolve(outcome.candidates);

    let mermaid_code = mermaid::render(
        &outcome.objects,
        &relationships,
        options.display,
        options.max_fields_per_object,
    );

    log::info!(
        "ERD: {} objects, {} relationships, truncated={}",
        outcome.objects.len(),
        relationships.len(),
        outcome.truncated
    );

    ErdOutput {
        mermaid_code,
        objects_included: outcome.objects.iter().map(|o| o.name.clone()).collect(),
        relationship_count: relationships.len(),
        truncated: outcome.truncated,
        may_exceed_render_limit,
        total_objects_found,
    }
}
