//! Salesforce object metadata model and schema providers.
//!
//! Mirrors the shape of the REST `describe` payload (camelCase on the wire)
//! and exposes the [`SchemaProvider`] capability trait so the live REST
//! backend, a captured fixture, and test doubles are interchangeable.

pub mod fixture;
pub mod provider;
pub mod rest;

pub use fixture::FixtureProvider;
pub use provider::SchemaProvider;
pub use rest::{GlobalObject, RestSchemaProvider};

use serde::{Deserialize, Serialize};

/// Full description of one SObject, fetched on demand per traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectDescribe {
    /// API name, e.g. `Account` or `Invoice__c`.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// True for custom objects (`__c` suffix).
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub fields: Vec<FieldDescribe>,
    #[serde(default)]
    pub child_relationships: Vec<ChildRelationship>,
}

/// One field of an SObject describe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescribe {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// False means the field is required on insert.
    #[serde(default = "default_true")]
    pub nillable: bool,
    /// True for the object's display-name field.
    #[serde(default)]
    pub name_field: bool,
    /// Target object(s) when `field_type` is `Reference` (polymorphic
    /// lookups list more than one).
    #[serde(default)]
    pub reference_to: Vec<String>,
    #[serde(default)]
    pub relationship_name: Option<String>,
    /// True for master-detail references.
    #[serde(default)]
    pub cascade_delete: bool,
}

/// Reverse view of a reference field, surfaced by the parent's describe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRelationship {
    /// All members are optional on the wire; entries missing the child
    /// object or relationship name are skipped during traversal.
    #[serde(rename = "childSObject", default)]
    pub child_s_object: Option<String>,
    /// Foreign-key field name on the child.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub relationship_name: Option<String>,
    #[serde(default)]
    pub cascade_delete: bool,
    #[serde(default)]
    pub restricted_delete: bool,
}

/// Salesforce field type domain as reported by describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Id,
    Reference,
    String,
    Textarea,
    Url,
    Email,
    Phone,
    Picklist,
    Multipicklist,
    Combobox,
    Boolean,
    Int,
    Double,
    Currency,
    Percent,
    Date,
    Datetime,
    Time,
    Base64,
    Address,
    Location,
    Encryptedstring,
    /// Anything this version does not know about (new API types appear
    /// between releases); rendered with the generic text token.
    #[serde(other)]
    Other,
}

impl FieldDescribe {
    /// True when this field is a usable foreign key: reference-typed with at
    /// least one declared target.
    pub fn is_reference(&self) -> bool {
        self.field_type == FieldType::Reference && !self.reference_to.is_empty()
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_describe_payload() {
        let json = r#"{
            "name": "Contact",
            "label": "Contact",
            "custom": false,
            "fields": [
                {"name": "Id", "label": "Contact ID", "type": "id", "nillable": false},
                {"name": "AccountId", "label": "Account ID", "type": "reference",
                 "nillable": true, "referenceTo": ["Account"],
                 "relationshipName": "Account", "cascadeDelete": false},
                {"name": "LastName", "label": "Last Name", "type": "string",
                 "nillable": false, "nameField": true}
            ],
            "childRelationships": [
                {"childSObject": "Case", "field": "ContactId",
                 "relationshipName": "Cases", "cascadeDelete": false,
                 "restrictedDelete": false}
            ]
        }"#;
        let describe: SObjectDescribe = serde_json::from_str(json).unwrap();
        assert_eq!(describe.name, "Contact");
        assert_eq!(describe.fields.len(), 3);
        assert!(describe.fields[1].is_reference());
        assert_eq!(describe.fields[1].reference_to, vec!["Account"]);
        assert!(describe.fields[2].name_field);
        assert_eq!(
            describe.child_relationships[0].child_s_object.as_deref(),
            Some("Case")
        );
    }

    #[test]
    fn test_unknown_field_type_decodes_as_other() {
        let json = r#"{"name": "Custom__c", "label": "x", "type": "anyType"}"#;
        let field: FieldDescribe = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Other);
        // defaults for the rest
        assert!(field.nillable);
        assert!(!field.is_reference());
    }

    #[test]
    fn test_malformed_child_relationship_decodes() {
        let json = r#"{"cascadeDelete": true}"#;
        let rel: ChildRelationship = serde_json::from_str(json).unwrap();
        assert!(rel.child_s_object.is_none());
        assert!(rel.cascade_delete);
    }
}
