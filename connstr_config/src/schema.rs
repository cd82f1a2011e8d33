use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::Context;
use connstr_core::{ConnectionString, SegmentExtractor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEVICE_PROFILE: &str = "device";
pub const SERVICE_PROFILE: &str = "service";

const CONFIG_DIR: &str = "connstr";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_profiles")]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles: Self::default_profiles(),
        }
    }
}

/// A named set of segments to extract, some of which must be present.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Profile {
    pub segments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Profile {
    pub fn new<S: Into<String>>(
        segments: impl IntoIterator<Item = S>,
        required: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    /// Segments followed by any required name the segment list omits.
    fn requested(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        for name in &self.required {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    }

    pub fn extractor(&self) -> connstr_core::Result<SegmentExtractor> {
        SegmentExtractor::new(self.requested())
    }

    /// Extracts this profile's segments from `text` and checks the required ones.
    pub fn parse<T: Display>(&self, text: T) -> connstr_core::Result<ConnectionString> {
        self.extractor()?
            .extract_required(text, self.required.as_slice())
    }
}

impl Config {
    fn default_profiles() -> BTreeMap<String, Profile> {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            DEVICE_PROFILE.to_string(),
            Profile::new(
                [
                    "HostName",
                    "DeviceId",
                    "SharedAccessKey",
                    "SharedAccessKeyName",
                    "ModuleId",
                    "GatewayHostName",
                ],
                ["HostName", "DeviceId"],
            ),
        );
        profiles.insert(
            SERVICE_PROFILE.to_string(),
            Profile::new(
                ["HostName", "SharedAccessKeyName", "SharedAccessKey"],
                ["HostName", "SharedAccessKeyName", "SharedAccessKey"],
            ),
        );
        profiles
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR);

        Ok(config_dir.join(CONFIG_FILE))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::default_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Create it with Config::create_config().",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(
            path = %path.display(),
            profiles = config.profiles.len(),
            "Loaded connection string config"
        );
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn profile(&self, name: &str) -> anyhow::Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown connection string profile: {name}"))
    }

    /// Default configuration rendered as pretty JSON.
    pub fn template() -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&Self::default())?)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::default_path()?;
        Self::create_config_at(&config_path)?;
        Ok(config_path)
    }

    pub fn create_config_at(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, Self::template()?)?;

        info!(path = %config_path.display(), "Created config file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn missing_profiles_fall_back_to_defaults() {
        let config = Config::from_json("{}").expect("empty object is a valid config");
        assert_eq!(config, Config::default());
        assert!(config.profiles.contains_key(DEVICE_PROFILE));
        assert!(config.profiles.contains_key(SERVICE_PROFILE));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn required_defaults_to_empty() {
        let config = Config::from_json(r#"{"profiles":{"p":{"segments":["a"]}}}"#)
            .expect("profile without required list is valid");
        let profile = config.profile("p").expect("profile p exists");
        assert!(profile.required.is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn required_names_are_always_extracted() {
        let profile = Profile::new(["a"], ["b"]);
        assert_eq!(profile.requested(), vec!["a", "b"]);

        let found = profile.parse("a=1;b=2").expect("both segments present");
        assert_eq!(found.get("b"), Some("2"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn unknown_profile_is_an_error() {
        let err = Config::default()
            .profile("gateway")
            .expect_err("no gateway profile by default");
        assert!(err.to_string().contains("gateway"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_round_trips() {
        let template = Config::template().expect("default config serializes");
        let parsed = Config::from_json(&template).expect("template parses");
        assert_eq!(parsed, Config::default());
    }
}
