//! Schema provider capability trait.

use async_trait::async_trait;

use super::SObjectDescribe;
use crate::Result;

/// Single-operation capability over the metadata backend.
///
/// The traversal engine invokes `describe` serially, at most once per
/// distinct object name per traversal, and treats any error as "exclude this
/// object" rather than failing the traversal.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Fetch the full description of one object by API name.
    async fn describe(&self, object_name: &str) -> Result<SObjectDescribe>;
}
