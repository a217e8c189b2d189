use crate::api::Resource;
use crate::resolver::ResolvedNames;
use std::cmp::Ordering;

/// One output row: an instance with its resolved catalog names. A name left
/// empty means the corresponding lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub name: String,
    pub service: String,
    pub plan: String,
}

impl ServiceInstance {
    /// Join resolved names into the raw listing. Entries missing any of
    /// name, service GUID, or plan GUID are dropped, not errors.
    pub fn from_resources(resources: &[Resource], names: &ResolvedNames) -> Vec<Self> {
        resources
            .iter()
            .filter_map(|resource| {
                let entity = resource.entity.as_ref()?;
                let name = entity.name.as_ref()?;
                let service_guid = entity.service_guid.as_ref()?;
                let plan_guid = entity.service_plan_guid.as_ref()?;
                Some(Self {
                    name: name.clone(),
                    service: names.service(service_guid).to_string(),
                    plan: names.plan(plan_guid).to_string(),
                })
            })
            .collect()
    }
}

impl Ord for ServiceInstance {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.service, &self.plan, &self.name).cmp(&(&other.service, &other.plan, &other.name))
    }
}

impl PartialOrd for ServiceInstance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
