//! Command line definition for the `dm1881` binary

use clap::{Args, Parser, Subcommand, ValueEnum};
use dm1881_core::{ConfigOverrides, QueryArguments};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyValueError {
    #[error("expected KEY=VALUE, got {0:?}")]
    MissingSeparator(String),

    #[error("argument name is empty in {0:?}")]
    EmptyKey(String),
}

/// Parse a raw `KEY=VALUE` search argument
pub fn parse_key_value(s: &str) -> Result<(String, String), KeyValueError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| KeyValueError::MissingSeparator(s.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(KeyValueError::EmptyKey(s.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Search the 1881 person, company and phone number directory
#[derive(Debug, Parser)]
#[command(name = "dm1881", version)]
pub struct Cli {
    /// JSON file with client settings, ignored when missing
    #[arg(long, global = true, default_value = "dm1881.json")]
    pub config: PathBuf,

    /// dev, stage or prod
    #[arg(long, global = true, env = "DM1881_ENVIRONMENT")]
    pub environment: Option<String>,

    #[arg(long, global = true, env = "DM1881_BASE_URI")]
    pub base_uri: Option<String>,

    #[arg(long, global = true, env = "DM1881_CLIENT_ID")]
    pub client_id: Option<String>,

    #[arg(long, global = true, env = "DM1881_USERNAME")]
    pub username: Option<String>,

    #[arg(long, global = true, env = "DM1881_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true, conflicts_with = "verify_tls")]
    pub insecure_skip_verify: bool,

    /// Always verify TLS certificates, also outside prod
    #[arg(long, global = true)]
    pub verify_tls: bool,

    /// Verbose HTTP logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Directory for the JSON log files
    #[arg(long, global = true, env = "DM1881_LOG_DIR", default_value = "./logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search persons and companies
    Search(SearchArgs),
    /// Search persons
    Person(SearchArgs),
    /// Search companies
    Company(SearchArgs),
    /// Look up a phone number
    Phone(SearchArgs),
    /// List the filters, sort orders or facets accepted by searches
    Meta {
        #[arg(value_enum, default_value_t = MetaKind::All)]
        kind: MetaKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetaKind {
    Filter,
    #[value(name = "sortby")]
    SortBy,
    Facet,
    All,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub query: String,

    #[arg(long)]
    pub rows: Option<u32>,

    #[arg(long)]
    pub offset: Option<u32>,

    #[arg(long)]
    pub filters: Option<String>,

    #[arg(long)]
    pub facets: Option<String>,

    #[arg(long)]
    pub sort_by: Option<String>,

    /// Include every contact point of each hit
    #[arg(long)]
    pub all_contact_points: bool,

    /// Raw search argument, may be repeated
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub extra: Vec<(String, String)>,
}

impl Cli {
    /// Settings given on the command line or through `DM1881_*` variables
    pub fn overrides(&self) -> ConfigOverrides {
        let insecure_skip_verify = if self.insecure_skip_verify {
            Some(true)
        } else if self.verify_tls {
            Some(false)
        } else {
            None
        };

        ConfigOverrides {
            environment: self.environment.clone(),
            base_uri: self.base_uri.clone(),
            client_id: self.client_id.clone(),
            username: self.username.clone(),
            secret: self.secret.clone(),
            debug: self.debug.then_some(true),
            insecure_skip_verify,
            ..ConfigOverrides::default()
        }
    }
}

impl SearchArgs {
    /// Extra search arguments; raw `--arg` values are applied last
    pub fn query_arguments(&self) -> QueryArguments {
        let mut args = QueryArguments::new();
        if let Some(rows) = self.rows {
            args.insert("Rows", rows);
        }
        if let Some(offset) = self.offset {
            args.insert("Offset", offset);
        }
        if let Some(filters) = &self.filters {
            args.insert("Filters", filters);
        }
        if let Some(facets) = &self.facets {
            args.insert("Facets", facets);
        }
        if let Some(sort_by) = &self.sort_by {
            args.insert("SortBy", sort_by);
        }
        if self.all_contact_points {
            args.insert("ReturnAllContactPoints", true);
        }
        for (key, value) in &self.extra {
            args.insert(key.as_str(), value);
        }
        args
    }
}
