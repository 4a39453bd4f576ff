//! Live schema provider over the Salesforce REST API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use super::{SObjectDescribe, SchemaProvider};
use crate::error::{OrgvizError, Result};

/// One entry from the global describe listing, trimmed to what the CLI
/// needs for root selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalObject {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub queryable: bool,
}

#[derive(Deserialize)]
struct GlobalDescribeResponse {
    sobjects: Vec<GlobalObject>,
}

/// Schema provider backed by `GET /services/data/vXX.X/sobjects/{name}/describe`.
///
/// Obtaining the access token is the caller's problem (device flow, CLI
/// session, whatever); this client only attaches it as a bearer credential.
pub struct RestSchemaProvider {
    client: Client,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl RestSchemaProvider {
    /// Create a provider against one org.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// normal operation)
    pub fn new(instance_url: String, access_token: String, api_version: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            instance_url: instance_url.trim_end_matches('/').to_string(),
            access_token,
            api_version,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    /// List all objects in the org, sorted by label.
    /// Used by the CLI `list` command for picking ERD roots.
    pub async fn describe_global(&self) -> Result<Vec<GlobalObject>> {
        let url = self.endpoint("sobjects");
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OrgvizError::Provider(format!(
                "global describe failed with {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let mut parsed: GlobalDescribeResponse = response.json().await?;
        parsed
            .sobjects
            .sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
        Ok(parsed.sobjects)
    }
}

#[async_trait]
impl SchemaProvider for RestSchemaProvider {
    async fn describe(&self, object_name: &str) -> Result<SObjectDescribe> {
        let url = self.endpoint(&format!("sobjects/{}/describe", object_name));
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(OrgvizError::ObjectNotFound(object_name.to_string())),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(OrgvizError::Provider(format!(
                    "describe {} failed with {}: {}",
                    object_name,
                    status,
                    body.chars().take(200).collect::<String>()
                )))
            }
            _ => Ok(response.json().await?),
        }
    }
}
