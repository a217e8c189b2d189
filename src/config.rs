use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Session context for one invocation: everything the command needs from the
/// operator's authenticated `cf` session.
#[derive(Debug, Clone)]
pub struct Session {
    pub api_endpoint: String,
    pub access_token: String,
    pub space_guid: String,
    pub space_name: String,
}

/// On-disk shape of the cf CLI's `config.json`. Only the fields consumed here
/// are modeled; everything else in the file is ignored.
#[derive(Debug, Deserialize)]
struct CfConfigFile {
    #[serde(rename = "Target", default)]
    target: String,
    #[serde(rename = "AccessToken", default)]
    access_token: String,
    #[serde(rename = "SpaceFields", default)]
    space: SpaceFields,
}

#[derive(Debug, Default, Deserialize)]
struct SpaceFields {
    #[serde(rename = "GUID", default)]
    guid: String,
    #[serde(rename = "Name", default)]
    name: String,
}

impl Session {
    /// Load the session from `<cf_home>/.cf/config.json`, falling back to the
    /// home directory when no override is given.
    pub fn load(cf_home: Option<&Path>) -> Result<Self> {
        let config_path = Self::config_path(cf_home)?;
        tracing::debug!("Loading CF config from {}", config_path.display());

        let contents = fs::read_to_string(&config_path).context(format!(
            "Failed to read CF config file: {}",
            config_path.display()
        ))?;
        let file: CfConfigFile = serde_json::from_str(&contents).context(format!(
            "Failed to parse CF config file: {}",
            config_path.display()
        ))?;

        if file.space.guid.is_empty() {
            bail!("Failed to get current space: no space targeted (run 'cf target -s SPACE')");
        }
        if file.access_token.is_empty() {
            bail!("Failed to get access token: not logged in (run 'cf login')");
        }
        if file.target.is_empty() {
            bail!("Failed to get API endpoint: no API endpoint set (run 'cf api URL')");
        }

        tracing::debug!("Current space is '{}' ({})", file.space.name, file.space.guid);

        Ok(Self {
            api_endpoint: file.target,
            access_token: file.access_token,
            space_guid: file.space.guid,
            space_name: file.space.name,
        })
    }

    fn config_path(cf_home: Option<&Path>) -> Result<PathBuf> {
        let base = match cf_home {
            Some(dir) => dir.to_path_buf(),
            None => dirs::home_dir().context("Failed to determine home directory")?,
        };
        Ok(base.join(".cf").join("config.json"))
    }
}
