use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::shell::terminal::validate_field;
use crate::shell::NavKey;
use crate::views::FieldKind;

/// Release Console - terminal client for the release management platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the release management API
    #[arg(short = 'u', long, env = "RELEASE_API_URL", default_value = "http://127.0.0.1:8000")]
    pub api_url: String,

    /// Path to the SQLite file holding the saved login
    #[arg(short = 'd', long, env = "RELEASE_CONSOLE_DB")]
    pub db_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the interactive console (default)
    Shell,

    /// Log in and save the access token
    Login {
        /// Username (prompted when omitted)
        #[arg(long)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "RELEASE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the saved access token
    Logout,

    /// Print a single screen
    Show {
        #[arg(value_enum)]
        view: NavKey,
    },

    /// Change the email on your profile
    SetEmail {
        #[arg(value_parser = parse_email)]
        email: String,
    },

    /// Create a release stage
    AddStage {
        #[arg(long, value_parser = parse_required)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// First day of the stage (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start_date: String,
        /// Last day of the stage (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end_date: String,
        #[arg(long, default_value = "")]
        responsible_person: String,
    },
}

// Command-line values go through the same checks as the interactive forms

fn parse_required(input: &str) -> std::result::Result<String, String> {
    validate_field(FieldKind::Text, true, input).map(|_| input.to_string())
}

fn parse_email(input: &str) -> std::result::Result<String, String> {
    validate_field(FieldKind::Email, true, input).map(|_| input.to_string())
}

fn parse_date(input: &str) -> std::result::Result<String, String> {
    validate_field(FieldKind::Date, true, input).map(|_| input.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// API paths for each resource
///
/// Deployments disagree on where login lives (`/token` vs `/auth/login`),
/// so every path is configurable.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    pub login: String,
    pub profile: String,
    pub release_stages: String,
    pub users: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/auth/login".to_string(),
            profile: "/profile/".to_string(),
            release_stages: "/release_stages/".to_string(),
            users: "/users/".to_string(),
        }
    }
}

impl Endpoints {
    /// Read endpoint overrides from the environment
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            login: env_or("LOGIN_ENDPOINT", defaults.login),
            profile: env_or("PROFILE_ENDPOINT", defaults.profile),
            release_stages: env_or("RELEASE_STAGES_ENDPOINT", defaults.release_stages),
            users: env_or("USERS_ENDPOINT", defaults.users),
        }
    }

    fn all(&self) -> [(&'static str, &str); 4] {
        [
            ("LOGIN_ENDPOINT", &self.login),
            ("PROFILE_ENDPOINT", &self.profile),
            ("RELEASE_STAGES_ENDPOINT", &self.release_stages),
            ("USERS_ENDPOINT", &self.users),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    // API
    pub api_base_url: String,
    pub endpoints: Endpoints,

    // HTTP client
    pub http_connect_timeout: Option<u64>,

    // Credential storage
    pub credential_db_file: PathBuf,

    // Logging
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from all sources with priority: CLI > ENV > defaults
    ///
    /// Returns the subcommand alongside so `main` can dispatch on it.
    pub fn load() -> Result<(Self, Command)> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let args = CliArgs::parse();
        let command = args.command.clone().unwrap_or(Command::Shell);
        Ok((Self::from_args(args)?, command))
    }

    fn from_args(args: CliArgs) -> Result<Self> {
        let credential_db_file = match args.db_file {
            Some(path) => expand_tilde(&path),
            None => default_db_path()
                .context("Could not determine a data directory; set RELEASE_CONSOLE_DB")?,
        };

        Ok(Config {
            api_base_url: args.api_url.trim_end_matches('/').to_string(),
            endpoints: Endpoints::from_env(),

            http_connect_timeout: std::env::var("HTTP_CONNECT_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok()),

            credential_db_file,

            log_level: args.log_level,
            log_format: args.log_format,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_base_url)
            .with_context(|| format!("RELEASE_API_URL is not a valid URL: {}", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "RELEASE_API_URL must use http or https: {}",
                self.api_base_url
            );
        }

        for (name, path) in self.endpoints.all() {
            if !path.starts_with('/') {
                anyhow::bail!("{} must start with '/': {}", name, path);
            }
        }

        Ok(())
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

/// Default location of the credential database
fn default_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("release-console").join("credentials.sqlite3"))
}

/// Expand tilde (~) in file paths to user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
