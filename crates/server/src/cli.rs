use std::path::PathBuf;

use clap::Parser;
use shared::model::{DateKey, DateParsing, LimitMode};

use crate::service::LogSettings;

#[derive(Debug, Clone, Parser)]
#[clap(name = "exercise tracker server")]
pub struct Cli {
    /// Static files served for any path outside the api
    #[clap(long, env, default_value = "public")]
    pub assets_dir: PathBuf,
    #[clap(long, env, default_value = "exercise.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "3000")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    /// Allowed CORS origin, `*` allows any
    #[arg(long, env, default_value = "*")]
    pub cors_origin: String,

    /// How submitted exercise dates are parsed
    #[arg(long, env, value_enum, default_value = "strict")]
    pub date_parsing: DateParsing,
    /// How log entries are compared against `from` and `to`
    #[arg(long, env, value_enum, default_value = "calendar")]
    pub log_date_key: DateKey,
    /// Whether `limit` replaces the date range or applies after it
    #[arg(long, env, value_enum, default_value = "replace")]
    pub log_limit: LimitMode,
}

impl Cli {
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            date_parsing: self.date_parsing,
            date_key: self.log_date_key,
            limit_mode: self.log_limit,
        }
    }
}
