//! Concurrent resolution of service and plan GUIDs to catalog names.
//!
//! The walk over the raw resources is sequential, so reserving a placeholder
//! map entry before spawning is enough to guarantee at most one lookup per
//! unique GUID. The spawned tasks never touch the maps; each returns its
//! `(kind, guid, result)` to the coordinator, which owns both maps and drains
//! the `JoinSet` until every lookup has finished, success or failure.

use crate::api::{self, Resource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Source of display names for catalog resources. Implemented by `ApiClient`;
/// tests substitute an in-memory map.
#[async_trait]
pub trait NameLookup: Send + Sync {
    async fn display_name(&self, path: &str) -> api::Result<String>;
}

/// GUID → resolved name, one map per catalog dimension. A GUID whose lookup
/// failed keeps its reserved empty name.
#[derive(Debug, Default)]
pub struct ResolvedNames {
    pub services: HashMap<String, String>,
    pub plans: HashMap<String, String>,
}

impl ResolvedNames {
    pub fn service(&self, guid: &str) -> &str {
        self.services.get(guid).map(String::as_str).unwrap_or("")
    }

    pub fn plan(&self, guid: &str) -> &str {
        self.plans.get(guid).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Service,
    Plan,
}

impl Kind {
    fn path(self, guid: &str) -> String {
        match self {
            Kind::Service => format!("/v2/services/{guid}"),
            Kind::Plan => format!("/v2/service_plans/{guid}"),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Kind::Service => "service",
            Kind::Plan => "service plan",
        }
    }
}

/// Resolve every unique service and plan GUID referenced by `resources`.
///
/// Dispatches exactly one lookup per unique GUID, runs all lookups
/// concurrently, and returns only once every dispatched lookup has completed.
/// Individual failures are logged and leave the name empty; they never abort
/// the join.
pub async fn resolve(lookup: Arc<dyn NameLookup>, resources: &[Resource]) -> ResolvedNames {
    let mut names = ResolvedNames::default();
    let mut tasks: JoinSet<(Kind, String, api::Result<String>)> = JoinSet::new();

    for resource in resources {
        let Some(entity) = &resource.entity else {
            continue;
        };
        tracing::debug!("Processing resource {:?}", entity.name);

        if let Some(guid) = &entity.service_guid {
            spawn_unique(&mut tasks, &mut names.services, Kind::Service, guid, &lookup);
        } else {
            tracing::debug!("No service GUID in {:?}", entity.name);
        }

        if let Some(guid) = &entity.service_plan_guid {
            spawn_unique(&mut tasks, &mut names.plans, Kind::Plan, guid, &lookup);
        } else {
            tracing::debug!("No service plan GUID in {:?}", entity.name);
        }
    }

    tracing::debug!("Waiting for {} lookups to finish", tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((kind, guid, Ok(name))) => {
                let map = match kind {
                    Kind::Service => &mut names.services,
                    Kind::Plan => &mut names.plans,
                };
                map.insert(guid, name);
            }
            Ok((kind, guid, Err(err))) => {
                tracing::warn!("Failed to get {} metadata for {}: {err}", kind.label(), guid);
            }
            Err(err) => {
                tracing::error!("Lookup task failed: {err}");
            }
        }
    }

    names
}

/// Reserve the GUID's map entry and spawn its lookup, unless a previous
/// resource already did. Must run on the single dispatching walk.
fn spawn_unique(
    tasks: &mut JoinSet<(Kind, String, api::Result<String>)>,
    map: &mut HashMap<String, String>,
    kind: Kind,
    guid: &str,
    lookup: &Arc<dyn NameLookup>,
) {
    if map.contains_key(guid) {
        return;
    }
    map.insert(guid.to_string(), String::new());

    let lookup = Arc::clone(lookup);
    let guid = guid.to_string();
    tasks.spawn(async move {
        tracing::debug!("Getting metadata for {} with GUID {}", kind.label(), guid);
        let result = lookup.display_name(&kind.path(&guid)).await;
        tracing::debug!("Received metadata for {} with GUID {}", kind.label(), guid);
        (kind, guid, result)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory lookup that records every requested path and can be told to
    /// fail or stall for specific paths.
    #[derive(Default)]
    struct MockLookup {
        names: HashMap<String, String>,
        failures: HashSet<String>,
        slow: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockLookup {
        fn with_names(pairs: &[(&str, &str)]) -> Self {
            Self {
                names: pairs
                    .iter()
                    .map(|(path, name)| (path.to_string(), name.to_string()))
                    .collect(),
                ..Default::default()
            }
        }

        fn failing(mut self, path: &str) -> Self {
            self.failures.insert(path.to_string());
            self
        }

        fn stalling(mut self, path: &str) -> Self {
            self.slow.insert(path.to_string());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NameLookup for MockLookup {
        async fn display_name(&self, path: &str) -> api::Result<String> {
            self.calls.lock().unwrap().push(path.to_string());
            if self.slow.contains(path) {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            if self.failures.contains(path) {
                return Err(ApiError::EntityNotFound {
                    path: path.to_string(),
                });
            }
            Ok(self.names.get(path).cloned().unwrap_or_default())
        }
    }

    fn resource(name: Option<&str>, service: Option<&str>, plan: Option<&str>) -> Resource {
        let entity = serde_json::json!({
            "name": name,
            "service_guid": service,
            "service_plan_guid": plan,
        });
        serde_json::from_value(serde_json::json!({ "entity": entity })).unwrap()
    }

    #[tokio::test]
    async fn test_one_lookup_per_unique_guid() {
        let lookup = Arc::new(MockLookup::with_names(&[
            ("/v2/services/svc-a", "mysql"),
            ("/v2/services/svc-b", "redis"),
            ("/v2/service_plans/plan-x", "small"),
        ]));
        let resources = vec![
            resource(Some("db1"), Some("svc-a"), Some("plan-x")),
            resource(Some("db2"), Some("svc-a"), Some("plan-x")),
            resource(Some("db3"), Some("svc-a"), Some("plan-x")),
            resource(Some("cache1"), Some("svc-b"), Some("plan-x")),
        ];

        let names = resolve(lookup.clone(), &resources).await;

        // 2 unique service GUIDs + 1 unique plan GUID = exactly 3 dispatches.
        let mut calls = lookup.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "/v2/service_plans/plan-x",
                "/v2/services/svc-a",
                "/v2/services/svc-b",
            ]
        );
        assert_eq!(names.service("svc-a"), "mysql");
        assert_eq!(names.service("svc-b"), "redis");
        assert_eq!(names.plan("plan-x"), "small");
    }

    #[tokio::test]
    async fn test_join_waits_for_slow_lookups() {
        let lookup = Arc::new(
            MockLookup::with_names(&[
                ("/v2/services/svc-a", "mysql"),
                ("/v2/service_plans/plan-x", "small"),
            ])
            .stalling("/v2/service_plans/plan-x"),
        );
        let resources = vec![resource(Some("db1"), Some("svc-a"), Some("plan-x"))];

        let names = resolve(lookup, &resources).await;

        // The slow plan lookup must have landed before resolve returned.
        assert_eq!(names.plan("plan-x"), "small");
        assert_eq!(names.service("svc-a"), "mysql");
    }

    #[tokio::test]
    async fn test_failed_lookup_leaves_name_empty() {
        let lookup = Arc::new(
            MockLookup::with_names(&[
                ("/v2/services/svc-b", "redis"),
                ("/v2/service_plans/plan-x", "small"),
                ("/v2/service_plans/plan-y", "free"),
            ])
            .failing("/v2/services/svc-a"),
        );
        let resources = vec![
            resource(Some("db1"), Some("svc-a"), Some("plan-x")),
            resource(Some("cache1"), Some("svc-b"), Some("plan-y")),
        ];

        let names = resolve(lookup, &resources).await;

        assert_eq!(names.service("svc-a"), "");
        assert_eq!(names.service("svc-b"), "redis");
        assert_eq!(names.plan("plan-x"), "small");
        assert_eq!(names.plan("plan-y"), "free");
    }

    #[tokio::test]
    async fn test_entries_without_guids_dispatch_nothing() {
        let lookup = Arc::new(MockLookup::with_names(&[("/v2/services/svc-a", "mysql")]));
        let resources = vec![
            resource(Some("half"), Some("svc-a"), None),
            resource(Some("bare"), None, None),
            serde_json::from_value(serde_json::json!({ "metadata": {} })).unwrap(),
        ];

        let names = resolve(lookup.clone(), &resources).await;

        // The present service GUID is still resolved; nothing else is.
        assert_eq!(lookup.calls(), vec!["/v2/services/svc-a"]);
        assert_eq!(names.service("svc-a"), "mysql");
        assert!(names.plans.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_guid_reads_as_empty() {
        let names = ResolvedNames::default();
        assert_eq!(names.service("nope"), "");
        assert_eq!(names.plan("nope"), "");
    }
}
