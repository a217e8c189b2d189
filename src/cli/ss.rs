use crate::api::ApiClient;
use crate::cli::format;
use crate::config::Session;
use crate::models::ServiceInstance;
use crate::resolver;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// List the service instances in the targeted space, with service and plan
/// GUIDs resolved to catalog names.
pub async fn execute(cf_home: Option<&Path>) -> Result<()> {
    tracing::debug!("Executing command ss");

    let session = Session::load(cf_home)?;
    let client = ApiClient::new(&session.api_endpoint, &session.access_token);

    tracing::debug!("Getting service instances");
    let resources = client
        .list_service_instances(&session.space_guid)
        .await
        .context("Failed to fetch services")?;

    let client: Arc<dyn resolver::NameLookup> = Arc::new(client);
    let names = resolver::resolve(client, &resources).await;

    let mut instances = ServiceInstance::from_resources(&resources, &names);

    println!("OK\n");
    print!("{}", format::render_table(&mut instances));

    Ok(())
}
