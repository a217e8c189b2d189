pub mod error;
pub mod models;

pub use error::{ApiError, Result};
pub use models::{Resource, ResourceEntity, ResourceList, ResourceMetadata};

use crate::resolver::NameLookup;
use async_trait::async_trait;

/// Authenticated client for the Cloud Controller REST API.
///
/// The access token is sent verbatim as the `Authorization` header value; the
/// cf CLI stores it with its `bearer ` prefix already attached.
pub struct ApiClient {
    http: reqwest::Client,
    api_endpoint: String,
    access_token: String,
}

impl ApiClient {
    pub fn new(api_endpoint: &str, access_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Fetch the service instances provisioned in a space. Single bounded
    /// page; no pagination beyond `results-per-page=99`.
    pub async fn list_service_instances(&self, space_guid: &str) -> Result<Vec<Resource>> {
        let path = format!(
            "/v2/service_instances?q=space_guid:{}&results-per-page=99",
            space_guid
        );
        let list: ResourceList = self.get_json(&path).await?;
        tracing::debug!(
            "Fetched {} service instance resources",
            list.resources.len()
        );
        Ok(list.resources)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_endpoint, path);
        tracing::debug!("Making request to {}", url);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.access_token)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::debug!("ERROR response from {} [{}]", url, status);
            return Err(ApiError::Status {
                path: path.to_string(),
                status,
            });
        }
        tracing::debug!("OK response from {}", url);

        response.json().await.map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl NameLookup for ApiClient {
    /// Resolve one catalog resource to its display name. Label wins over
    /// name; a body without an entity section is an error; neither label nor
    /// name present resolves to the empty string.
    async fn display_name(&self, path: &str) -> Result<String> {
        let resource: Resource = self.get_json(path).await?;
        resource.display_name().ok_or_else(|| ApiError::EntityNotFound {
            path: path.to_string(),
        })
    }
}
