mod commands;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use ghrest_api::GitHubClient;
use ghrest_config::{profile_token_env, Config, Profile, TOKEN_ENV};
use ghrest_output::{OutputFormat, OutputRenderer};
use tracing_subscriber::{fmt, EnvFilter};

use commands::api_error;

#[derive(Parser, Debug)]
#[command(name = "ghrest", version, about = "Thin GitHub REST API client", long_about = None)]
struct Cli {
    /// Profile to use from config file
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// Path to config file (defaults to ~/.ghrest/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for response payloads
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    /// Print the status line and response headers before the payload
    #[arg(short, long, global = true)]
    include: bool,

    /// Enable verbose logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: GhrestCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum GhrestCommand {
    #[command(flatten)]
    Api(commands::github::GitHubCommand),
    /// Call an arbitrary JSON API; fails on any non-2xx status
    Fetch(commands::fetch::FetchArgs),
    /// Manage connection profiles
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let renderer = OutputRenderer::new(cli.output);

    match cli.command {
        GhrestCommand::Api(command) => {
            let config = Config::load(cli.config.as_ref())?;
            let client = build_client(&config, cli.profile.as_deref())?;
            let response = commands::github::execute(command, &client).await?;
            renderer.render_response(&response, cli.include)?;
        }
        GhrestCommand::Fetch(args) => {
            let value = commands::fetch::execute(args).await?;
            renderer.render(&value)?;
        }
        GhrestCommand::Config(command) => {
            let mut config = Config::load(cli.config.as_ref())?;
            commands::config::handle(command, &mut config, cli.config.as_deref(), &renderer)?;
        }
    }

    Ok(())
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug {
        "warn,ghrest=debug,ghrest_api=debug,ghrest_config=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logger: {err}"))
}

/// Builds a client from the resolved profile. With no profiles configured an
/// empty profile named `default` is used, so `GITHUB_TOKEN` alone is enough.
fn build_client(config: &Config, requested: Option<&str>) -> Result<GitHubClient> {
    let fallback = Profile::default();
    let (name, profile) = match config.resolve_profile(requested) {
        Some(found) => found,
        None => match requested {
            Some(name) => return Err(anyhow!("Profile '{name}' is not configured.")),
            None => ("default", &fallback),
        },
    };

    let token = profile.resolve_token(name).ok_or_else(|| {
        anyhow!(
            "No token found for profile '{name}'. Set {} or {TOKEN_ENV}, or run `ghrest config set --name {name} --token <TOKEN>`",
            profile_token_env(name)
        )
    })?;

    GitHubClient::new(profile.client_config(token)).map_err(api_error)
}
