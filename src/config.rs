use crate::cli::Args;
use crate::errors::AppError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_DATA_SOURCE_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: std::net::IpAddr,
    pub server_port: u16,
    pub log_level: Level,
    pub no_metrics: bool,
    pub data_source: DataSource,
    pub sentry_dsn: Option<String>,
}

/// Where provider data comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Http(DataSourceConfig),
    Snapshot(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSourceConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, AppError> {
        let data_source = match (args.data_source, args.providers_snapshot) {
            (Some(endpoint), None) => {
                let timeout = Duration::from_secs(
                    args.data_source_timeout
                        .unwrap_or(DEFAULT_DATA_SOURCE_TIMEOUT_SECS),
                );

                DataSource::Http(DataSourceConfig {
                    endpoint,
                    request_timeout: timeout,
                })
            },
            (None, Some(path)) => DataSource::Snapshot(path),
            (Some(_), Some(_)) => {
                return Err(AppError::Config(
                    "Cannot set both --data-source and --providers-snapshot".into(),
                ));
            },
            (None, None) => {
                return Err(AppError::Config(
                    "Either --data-source or --providers-snapshot must be set".into(),
                ));
            },
        };

        Ok(Config {
            server_address: args.server_address,
            server_port: args.server_port,
            log_level: args.log_level.into(),
            no_metrics: args.no_metrics,
            data_source,
            sentry_dsn: args.sentry_dsn.filter(|dsn| !dsn.is_empty()),
        })
    }
}
