//! Cloud Controller v2 wire types. Every entity field is optional on the
//! wire; required-field filtering happens when instance records are built.

use serde::Deserialize;

/// Paginated listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub metadata: Option<ResourceMetadata>,
    #[serde(default)]
    pub entity: Option<ResourceEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceMetadata {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceEntity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub service_guid: Option<String>,
    #[serde(default)]
    pub service_plan_guid: Option<String>,
}

impl Resource {
    /// Display name precedence for a catalog resource: a service carries a
    /// `label`, a plan carries a `name`; neither present means empty.
    pub fn display_name(&self) -> Option<String> {
        let entity = self.entity.as_ref()?;
        Some(
            entity
                .label
                .clone()
                .or_else(|| entity.name.clone())
                .unwrap_or_default(),
        )
    }
}
