//! Offline schema provider backed by captured describe JSON.
//!
//! Two layouts are accepted: a single JSON file mapping object name to its
//! describe payload, or a directory of `<ObjectName>.json` files. Useful for
//! generating diagrams from a saved metadata dump and as a test double.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

use super::{SObjectDescribe, SchemaProvider};
use crate::error::{OrgvizError, Result};

/// In-memory provider loaded from fixture files.
pub struct FixtureProvider {
    objects: HashMap<String, SObjectDescribe>,
}

impl FixtureProvider {
    /// Load fixtures from a file or directory path.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_file(path)
        }
    }

    /// Build a provider from already-parsed describes (test doubles).
    pub fn from_describes(describes: Vec<SObjectDescribe>) -> Self {
        let objects = describes
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        Self { objects }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let objects: HashMap<String, SObjectDescribe> = serde_json::from_str(&content)?;
        log::info!(
            "Loaded {} object describes from {}",
            objects.len(),
            path.display()
        );
        Ok(Self { objects })
    }

    fn load_dir(path: &Path) -> Result<Self> {
        let mut objects = HashMap::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();
            if file_path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = std::fs::read_to_string(&file_path)?;
            let describe: SObjectDescribe = serde_json::from_str(&content).map_err(|e| {
                OrgvizError::Provider(format!("bad fixture {}: {}", file_path.display(), e))
            })?;
            objects.insert(describe.name.clone(), describe);
        }
        log::info!(
            "Loaded {} object describes from {}",
            objects.len(),
            path.display()
        );
        Ok(Self { objects })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl SchemaProvider for FixtureProvider {
    async fn describe(&self, object_name: &str) -> Result<SObjectDescribe> {
        self.objects
            .get(object_name)
            .cloned()
            .ok_or_else(|| OrgvizError::ObjectNotFound(object_name.to_string()))
    }
}
