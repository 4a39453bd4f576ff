//! Exclusion policy for housekeeping and audit objects.
//!
//! Kept as a data-driven rule table evaluated first-match-wins so new
//! exclusions stay additive. An excluded object never appears in the diagram,
//! neither as a node nor as a relationship endpoint.

/// One exclusion rule over an object API name.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
    Suffix(&'static str),
}

impl Matcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Exact(pat) => name == *pat,
            Matcher::Prefix(pat) => name.starts_with(pat),
            Matcher::Suffix(pat) => name.ends_with(pat),
        }
    }
}

/// System objects that clutter diagrams: change tracking, feeds, sharing,
/// setup metadata, content, approvals and the rest of the audit tail.
const SKIP_RULES: &[Matcher] = &[
    Matcher::Suffix("History"),
    Matcher::Suffix("Feed"),
    Matcher::Suffix("Share"),
    Matcher::Suffix("Tag"),
    Matcher::Suffix("ChangeEvent"),
    Matcher::Suffix("__mdt"), // Custom metadata
    Matcher::Suffix("__e"),   // Platform events
    Matcher::Suffix("__x"),   // External objects
    Matcher::Prefix("ContentDocument"),
    Matcher::Prefix("ContentVersion"),
    Matcher::Prefix("FeedItem"),
    Matcher::Prefix("FeedComment"),
    Matcher::Exact("RecordType"),
    Matcher::Exact("BusinessHours"),
    Matcher::Exact("Organization"),
    Matcher::Exact("Profile"),
    Matcher::Exact("UserRole"),
    Matcher::Exact("Group"),
    Matcher::Exact("GroupMember"),
    Matcher::Prefix("PermissionSet"),
    Matcher::Exact("SetupAuditTrail"),
    Matcher::Exact("LoginHistory"),
    Matcher::Exact("ApexClass"),
    Matcher::Exact("ApexTrigger"),
    Matcher::Exact("ApexPage"),
    Matcher::Exact("ApexComponent"),
    Matcher::Exact("StaticResource"),
    Matcher::Exact("Document"),
    Matcher::Exact("Folder"),
    Matcher::Exact("EmailTemplate"),
    Matcher::Exact("Attachment"),
    Matcher::Exact("Note"),
    Matcher::Exact("CombinedAttachment"),
    Matcher::Exact("NoteAndAttachment"),
    Matcher::Prefix("ProcessInstance"),
    Matcher::Exact("UserRecordAccess"),
    Matcher::Exact("EntitySubscription"),
    Matcher::Exact("TopicAssignment"),
    Matcher::Prefix("CollaborationGroup"),
    // Owner/CreatedBy/LastModifiedBy lookups point here from nearly every
    // object; including User makes it a hub that swallows the diagram.
    Matcher::Exact("User"),
    Matcher::Exact("Idea"),
    Matcher::Exact("Vote"),
    Matcher::Exact("IdeaComment"),
];

/// True when the object should be kept out of the diagram entirely.
pub fn is_excluded(object_name: &str) -> bool {
    SKIP_RULES.iter().any(|rule| rule.matches(object_name))
}
