//! Key-field extraction: reduce a full field list to what an entity block
//! shows (identifier, display name, foreign keys).

use super::{exclude, KeyField, KeyFieldTag};
use crate::schema::{FieldType, SObjectDescribe};

/// Single scan over the full field list; each field is selected under the
/// first rule it matches (Id, then name field, then foreign key) or omitted.
/// Relationship discovery scans the full list separately and is unaffected.
pub(super) fn extract_key_fields(describe: &SObjectDescribe) -> Vec<KeyField> {
    let mut key_fields = Vec::new();

    for field in &describe.fields {
        if field.name == "Id" {
            key_fields.push(KeyField {
                name: field.name.clone(),
                field_type: FieldType::Id,
                tag: KeyFieldTag::Primary,
                reference_to: None,
                required: false,
            });
            continue;
        }

        if field.name_field {
            key_fields.push(KeyField {
                name: field.name.clone(),
                field_type: field.field_type,
                tag: KeyFieldTag::Name,
                reference_to: None,
                required: false,
            });
            continue;
        }

        if field.is_reference() {
            let target = &field.reference_to[0];
            if !exclude::is_excluded(target) {
                key_fields.push(KeyField {
                    name: field.name.clone(),
                    field_type: FieldType::Reference,
                    tag: KeyFieldTag::ForeignKey,
                    reference_to: Some(target.clone()),
                    required: !field.nillable,
                });
            }
        }
    }

    key_fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescribe;

    fn field(name: &str, field_type: FieldType) -> FieldDescribe {
        FieldDescribe {
            name: name.to_string(),
            label: name.to_string(),
            field_type,
            nillable: true,
            name_field: false,
            reference_to: Vec::new(),
            relationship_name: None,
            cascade_delete: false,
        }
    }

    fn describe(fields: Vec<FieldDescribe>) -> SObjectDescribe {
        SObjectDescribe {
            name: "Account".to_string(),
            label: "Account".to_string(),
            custom: false,
            fields,
            child_relationships: Vec::new(),
        }
    }

    #[test]
    fn test_selects_id_name_and_foreign_keys() {
        let describe = describe(vec![
            field("Id", FieldType::Id),
            FieldDescribe {
                name_field: true,
                ..field("Name", FieldType::String)
            },
            FieldDescribe {
                reference_to: vec!["Contact".to_string()],
                nillable: false,
                ..field("PrimaryContactId", FieldType::Reference)
            },
            field("Industry", FieldType::Picklist),
            field("AnnualRevenue", FieldType::Currency),
        ]);

        let key_fields = extract_key_fields(&describe);
        assert_eq!(key_fields.len(), 3);
        assert_eq!(key_fields[0].tag, KeyFieldTag::Primary);
        assert_eq!(key_fields[1].tag, KeyFieldTag::Name);
        assert_eq!(key_fields[2].tag, KeyFieldTag::ForeignKey);
        assert_eq!(key_fields[2].reference_to.as_deref(), Some("Contact"));
        assert!(key_fields[2].required);
    }

    #[test]
    fn test_excluded_target_omitted() {
        let describe = describe(vec![FieldDescribe {
            reference_to: vec!["RecordType".to_string()],
            ..field("RecordTypeId", FieldType::Reference)
        }]);
        assert!(extract_key_fields(&describe).is_empty());
    }

    #[test]
    fn test_order_follows_source_field_list() {
        let describe = describe(vec![
            FieldDescribe {
                reference_to: vec!["Contact".to_string()],
                ..field("ContactId", FieldType::Reference)
            },
            field("Id", FieldType::Id),
        ]);
        let key_fields = extract_key_fields(&describe);
        assert_eq!(key_fields[0].name, "ContactId");
        assert_eq!(key_fields[1].name, "Id");
    }

    #[test]
    fn test_reference_without_target_omitted() {
        // reference-typed but no declared targets: unusable as a FK
        let describe = describe(vec![field("DanglingId", FieldType::Reference)]);
        assert!(extract_key_fields(&describe).is_empty());
    }
}
