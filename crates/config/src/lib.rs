use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ghrest_api::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable consulted for every profile after the profile-specific one.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Profiles stored in `~/.ghrest/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Load configuration from the provided path or the default config file.
    /// A missing file yields an empty configuration.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Unable to read config file at {}", path.display()))?;

        serde_yaml::from_str(&raw)
            .with_context(|| format!("Malformed YAML in config file {}", path.display()))
    }

    /// Persist the configuration to disk, creating parent directories if needed.
    pub fn save<P: AsRef<Path>>(&self, path: Option<P>) -> Result<()> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let serialized = serde_yaml::to_string(self)?;
        fs::write(&path, serialized)
            .with_context(|| format!("Unable to write config file {}", path.display()))?;

        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Returns the requested profile, else the default one, else the first one.
    pub fn resolve_profile<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Option<(&'a str, &'a Profile)> {
        if let Some(name) = requested {
            self.profiles.get(name).map(|profile| (name, profile))
        } else if let Some(default_name) = self.default_profile.as_deref() {
            self.profiles
                .get(default_name)
                .map(|profile| (default_name, profile))
        } else {
            self.profiles
                .iter()
                .next()
                .map(|(name, profile)| (name.as_str(), profile))
        }
    }

    /// Inserts or replaces a profile, making it the default when asked to
    /// or when it is the only one.
    pub fn upsert_profile(&mut self, name: impl Into<String>, profile: Profile, make_default: bool) {
        let name = name.into();
        self.profiles.insert(name.clone(), profile);
        if make_default || self.default_profile.is_none() {
            self.default_profile = Some(name);
        }
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".ghrest");
        path.push("config.yaml");
        path
    }
}

/// Partially configured client settings. Absent fields fall back to the
/// client defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Profile {
    pub fn client_config(&self, token: impl Into<String>) -> ClientConfig {
        let mut config = ClientConfig::new(token);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(version) = &self.api_version {
            config = config.with_version(version.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        config
    }

    /// Looks up the token: `GHREST_TOKEN_<PROFILE>`, then `GITHUB_TOKEN`, then the
    /// stored token. Blank values are skipped.
    pub fn resolve_token(&self, profile_name: &str) -> Option<String> {
        self.resolve_token_with(profile_name, |key| std::env::var(key).ok())
    }

    fn resolve_token_with<F>(&self, profile_name: &str, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile_env = profile_token_env(profile_name);
        lookup(&profile_env)
            .filter(|t| !t.trim().is_empty())
            .or_else(|| lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()))
            .or_else(|| self.token.clone().filter(|t| !t.trim().is_empty()))
    }
}

/// Name of the profile-specific token variable, e.g. `GHREST_TOKEN_WORK`.
pub fn profile_token_env(profile_name: &str) -> String {
    let suffix: String = profile_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("GHREST_TOKEN_{suffix}")
}
