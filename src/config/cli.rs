use crate::config::toml_config::AtlasConfig;
use crate::core::MeasurementType;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "atlas")]
#[command(about = "Command-line client for the RIPE Atlas API")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "API key, overrides the configuration file")]
    pub api_key: Option<String>,

    #[arg(long, global = true, help = "API base URL")]
    pub endpoint: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the current IPv4/IPv6 addresses of a probe
    Ip {
        /// Probe ID, defaults to `probes.default_probe`
        probe_id: Option<u32>,
    },
    /// Create a one-off measurement
    Measure(MeasureArgs),
}

#[derive(Debug, Clone, Args)]
pub struct MeasureArgs {
    /// dns, http, ntp, ping, sslcert or traceroute
    #[arg(value_parser = parse_measurement_type)]
    pub measurement_type: MeasurementType,

    /// Host to measure (the query name for dns)
    pub target: String,

    #[arg(short = 'F', long = "field", value_parser = parse_key_value, help = "Extra definition field, e.g. -F MaxHops=20")]
    pub fields: Vec<(String, String)>,

    #[arg(long, help = "Use IPv6")]
    pub ipv6: bool,

    #[arg(long, help = "Number of probes")]
    pub probes: Option<u32>,

    #[arg(long, help = "Probe selection type (area, country, asn, ...)")]
    pub area_type: Option<String>,

    #[arg(long, help = "Probe selection value")]
    pub area_value: Option<String>,

    #[arg(long, help = "Probe tags, e.g. +system-ipv6-works,-home")]
    pub tags: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

fn parse_measurement_type(s: &str) -> std::result::Result<MeasurementType, String> {
    s.parse().map_err(|e: crate::utils::error::AtlasError| e.to_string())
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))
}

impl CliConfig {
    /// Reads `--config` (or the default file when present) and applies global overrides.
    pub fn load_config(&self) -> Result<AtlasConfig> {
        let path = self
            .config
            .clone()
            .or_else(|| AtlasConfig::default_path().filter(|p| p.exists()));

        let mut config = match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                AtlasConfig::from_file(path)?
            }
            None => AtlasConfig::default(),
        };

        if let Some(key) = &self.api_key {
            config.api.key = Some(key.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.api.endpoint = endpoint.clone();
        }

        Ok(config)
    }
}

impl MeasureArgs {
    pub fn apply_probe_overrides(&self, config: &mut AtlasConfig) {
        if let Some(probes) = self.probes {
            config.probes.pool_size = probes;
        }
        if let Some(area_type) = &self.area_type {
            config.probes.area_type = area_type.clone();
        }
        if let Some(area_value) = &self.area_value {
            config.probes.area_value = area_value.clone();
        }
        if let Some(tags) = &self.tags {
            config.probes.tags = tags.clone();
        }
    }

    /// Field map for the definition; `-F` entries come last and win.
    pub fn definition_fields(&self) -> Vec<(String, String)> {
        let kind = self.measurement_type;
        let description = self
            .description
            .clone()
            .unwrap_or_else(|| format!("{} - {}", kind, self.target));

        let mut fields = vec![
            ("Type".to_string(), kind.to_string()),
            ("Description".to_string(), description),
            ("AF".to_string(), if self.ipv6 { "6" } else { "4" }.to_string()),
            ("IsOneoff".to_string(), "true".to_string()),
        ];

        if kind == MeasurementType::Dns {
            fields.push(("QueryArgument".to_string(), self.target.clone()));
            fields.push(("QueryClass".to_string(), "IN".to_string()));
            fields.push(("QueryType".to_string(), "A".to_string()));
            fields.push(("UseProbeResolver".to_string(), "true".to_string()));
        } else {
            fields.push(("Target".to_string(), self.target.clone()));
        }

        fields.extend(self.fields.iter().cloned());
        fields
    }
}
