use crate::{config::Config, errors::AppError, types::LogLevel};
use anyhow::{Error, Result};
use clap::{CommandFactory, Parser};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;
use twelf::{Layer, config};

const ENV_PREFIX: &str = "PROVIDERS_API_";

static SHOULD_SKIP_SERIALIZING_FIELDS: AtomicBool = AtomicBool::new(false);

fn should_skip_serializing_fields<T>(_: &T) -> bool {
    SHOULD_SKIP_SERIALIZING_FIELDS.load(Ordering::SeqCst)
}

#[derive(Parser, Debug, Serialize, Clone)]
#[command(author,
          name = "providers-api",
          bin_name = "providers-api",
          version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_REVISION"), ")"),
          about,
          long_about = None)]
#[config]
pub struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    pub server_address: IpAddr,

    #[arg(long, default_value = "3000")]
    pub server_port: u16,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    #[arg(long, help = "Write the effective configuration to the config file")]
    #[serde(skip_serializing_if = "should_skip_serializing_fields")]
    #[serde(default)]
    pub(crate) init: bool,

    #[arg(long, help = "Path to an existing configuration file")]
    #[serde(skip_serializing_if = "should_skip_serializing_fields")]
    pub(crate) config: Option<PathBuf>,

    /// Disable the Prometheus `/metrics` route
    #[arg(long)]
    pub no_metrics: bool,

    /// Base URL of the upstream providers API
    #[arg(long = "data-source")]
    pub data_source: Option<String>,

    #[arg(long = "data-source-timeout-sec", default_value = "30")]
    pub data_source_timeout: Option<u64>,

    /// JSON or TOML file with a static providers snapshot, used instead of `--data-source`
    #[arg(long)]
    pub providers_snapshot: Option<PathBuf>,

    #[arg(long)]
    pub sentry_dsn: Option<String>,
}

fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("providers-api")
        .join("config.toml")
}

impl Args {
    fn parse_args(config_path: &Path) -> Result<Args, AppError> {
        let matches = Self::command().get_matches();

        let mut config_layers = vec![
            Layer::Env(Some(String::from(ENV_PREFIX))),
            Layer::Clap(matches),
        ];
        if config_path.exists() {
            config_layers.insert(0, Layer::Toml(config_path.to_path_buf()));
        }

        Self::with_layers(&config_layers).map_err(|e| match e {
            twelf::Error::Toml(_) => AppError::Config(format!(
                "Failed to parse config file '{}'",
                config_path.to_string_lossy()
            )),
            _ => AppError::Config(e.to_string()),
        })
    }

    /// Resolves CLI flags, `PROVIDERS_API_*` env vars and the TOML config file into a [`Config`].
    pub fn init() -> Result<Config, AppError> {
        let initial_args = Args::parse();
        let config_path = initial_args.config.unwrap_or_else(get_config_path);

        let arguments = Args::parse_args(&config_path)?;

        SHOULD_SKIP_SERIALIZING_FIELDS.store(true, Ordering::SeqCst);

        if arguments.init {
            arguments
                .to_file(&config_path)
                .map_err(|e| AppError::Config(e.to_string()))?;

            info!(path = %config_path.display(), "Configuration written");
        }

        Config::from_args(arguments)
    }

    fn to_file(&self, file_path: &Path) -> Result<()> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string(self).map_err(Error::new)?;
        let mut file = fs::File::create(file_path)?;
        file.write_all(toml_string.as_bytes())?;
        Ok(())
    }
}
