//! Mermaid `erDiagram` serialization.

use std::collections::HashSet;
use std::fmt::Write;

use super::{DisplayMode, KeyFieldTag, Relationship, RelationshipKind, RenderObject};
use crate::schema::FieldType;

/// Serialize rendered objects and resolved relationships to Mermaid text.
///
/// Relationships are emitted only when both endpoints made it into the
/// rendered set; this is where a relationship recorded against an object
/// whose own describe later failed, or one truncated away, gets dropped.
pub(super) fn render(
    objects: &[RenderObject],
    relationships: &[Relationship],
    display: DisplayMode,
    max_fields_per_object: usize,
) -> String {
    let mut code = String::from("erDiagram\n");

    for obj in objects {
        let safe_name = sanitize_name(&obj.name);
        match display {
            DisplayMode::Compact => {
                let _ = writeln!(code, "    {}", safe_name);
            }
            DisplayMode::Full => {
                let _ = writeln!(code, "    {} {{", safe_name);
                for field in obj.fields.iter().take(max_fields_per_object) {
                    let mut attributes: Vec<&str> = Vec::new();
                    if field.tag == KeyFieldTag::Primary {
                        attributes.push("PK");
                    }
                    if field.tag == KeyFieldTag::ForeignKey {
                        attributes.push("FK");
                    }
                    if field.required {
                        attributes.push("required");
                    }
                    let attr_str = if attributes.is_empty() {
                        String::new()
                    } else {
                        format!(" \"{}\"", attributes.join(", "))
                    };
                    let _ = writeln!(
                        code,
                        "        {} {}{}",
                        map_field_type(field.field_type),
                        sanitize_name(&field.name),
                        attr_str
                    );
                }
                code.push_str("    }\n");
            }
        }
    }

    code.push('\n');

    let rendered: HashSet<&str> = objects.iter().map(|o| o.name.as_str()).collect();
    // Sanitization can collapse two distinct raw names onto one token; dedup
    // again on the sanitized key so no line repeats.
    let mut emitted: HashSet<String> = HashSet::new();

    for rel in relationships {
        if !rendered.contains(rel.from.as_str()) || !rendered.contains(rel.to.as_str()) {
            continue;
        }

        let from_name = sanitize_name(&rel.from);
        let to_name = sanitize_name(&rel.to);

        let line_key = format!("{}-{}-{}", from_name, to_name, rel.field);
        if !emitted.insert(line_key) {
            continue;
        }

        // ||--o{ reads "exactly one to zero or more"
        let referenced_side = if rel.required { "||" } else { "|o" };
        let owning_side = if rel.kind == RelationshipKind::MasterDetail {
            "|{"
        } else {
            "o{"
        };

        let label = match rel.relationship_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => rel
                .field
                .strip_suffix("Id")
                .unwrap_or(&rel.field)
                .to_string(),
        };

        let _ = writeln!(
            code,
            "    {} {}--{} {} : \"{}\"",
            to_name, referenced_side, owning_side, from_name, label
        );
    }

    code
}

/// Rewrite a raw API name to the Mermaid-safe token alphabet.
///
/// The `__c` custom suffix becomes `_c` instead of vanishing, so a custom
/// object does not collide with a same-named standard one.
pub(super) fn sanitize_name(name: &str) -> String {
    let name = match name.strip_suffix("__c") {
        Some(base) => format!("{}_c", base),
        None => name.to_string(),
    };
    name.replace("__", "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Fixed mapping from describe field types to generic display tokens.
fn map_field_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Boolean => "boolean",
        FieldType::Int => "int",
        FieldType::Double => "double",
        FieldType::Currency => "currency",
        FieldType::Percent => "percent",
        FieldType::Date => "date",
        FieldType::Datetime => "datetime",
        FieldType::Time => "time",
        FieldType::Base64 => "blob",
        FieldType::Address => "address",
        FieldType::Location => "location",
        // id, reference, all text-likes and anything unknown
        _ => "string",
    }
}
