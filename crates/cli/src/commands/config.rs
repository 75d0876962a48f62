use std::path::Path;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use ghrest_config::{Config, Profile};
use ghrest_output::OutputRenderer;
use serde::Serialize;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Add or update a profile
    Set(SetArgs),
    /// Show one profile (token redacted)
    Show {
        /// Profile to show (defaults to the default profile)
        #[arg(long)]
        name: Option<String>,
    },
    /// List configured profiles
    List,
}

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Profile name to create or update
    #[arg(long)]
    pub name: String,
    /// API base URL (e.g. https://ghe.example.com/api/v3)
    #[arg(long)]
    pub base_url: Option<String>,
    /// Personal access token stored in the config file
    #[arg(long)]
    pub token: Option<String>,
    /// Value of the X-GitHub-Api-Version header
    #[arg(long)]
    pub api_version: Option<String>,
    #[arg(long)]
    pub user_agent: Option<String>,
    /// Mark this profile as the default one
    #[arg(long)]
    pub default: bool,
}

#[derive(Serialize)]
struct ProfileRow<'a> {
    name: &'a str,
    default: bool,
    base_url: &'a str,
    api_version: &'a str,
    user_agent: &'a str,
    token: &'static str,
}

impl<'a> ProfileRow<'a> {
    fn new(name: &'a str, profile: &'a Profile, default: bool) -> Self {
        Self {
            name,
            default,
            base_url: profile
                .base_url
                .as_deref()
                .unwrap_or(ghrest_api::DEFAULT_BASE_URL),
            api_version: profile
                .api_version
                .as_deref()
                .unwrap_or(ghrest_api::DEFAULT_API_VERSION),
            user_agent: profile
                .user_agent
                .as_deref()
                .unwrap_or(ghrest_api::DEFAULT_USER_AGENT),
            token: if profile.token.is_some() {
                "stored"
            } else {
                "-"
            },
        }
    }
}

pub fn handle(
    command: ConfigCommand,
    config: &mut Config,
    config_path: Option<&Path>,
    renderer: &OutputRenderer,
) -> Result<()> {
    match command {
        ConfigCommand::Set(args) => set_profile(args, config, config_path),
        ConfigCommand::Show { name } => {
            let (name, profile) = config
                .resolve_profile(name.as_deref())
                .ok_or_else(|| anyhow!("No matching profile configured."))?;
            let is_default = config.default_profile.as_deref() == Some(name);
            renderer.render(&ProfileRow::new(name, profile, is_default))
        }
        ConfigCommand::List => {
            let rows: Vec<ProfileRow<'_>> = config
                .profiles
                .iter()
                .map(|(name, profile)| {
                    let is_default = config.default_profile.as_deref() == Some(name.as_str());
                    ProfileRow::new(name, profile, is_default)
                })
                .collect();

            if rows.is_empty() {
                tracing::info!("No profiles configured");
                return Ok(());
            }

            renderer.render(&rows)
        }
    }
}

fn set_profile(args: SetArgs, config: &mut Config, config_path: Option<&Path>) -> Result<()> {
    let mut profile = config.profile(&args.name).cloned().unwrap_or_default();

    if let Some(base_url) = args.base_url {
        profile.base_url = Some(base_url);
    }
    if let Some(token) = args.token {
        profile.token = Some(token);
    }
    if let Some(version) = args.api_version {
        profile.api_version = Some(version);
    }
    if let Some(user_agent) = args.user_agent {
        profile.user_agent = Some(user_agent);
    }

    config.upsert_profile(args.name.clone(), profile, args.default);
    config.save(config_path)?;

    tracing::info!(profile = args.name.as_str(), "Profile saved");
    println!("✓ Profile '{}' saved", args.name);
    Ok(())
}
