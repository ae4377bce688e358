use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use mdharvest::engine::config::{ExtractionConfig, ExtractionConfigBuilder, ResolutionScope};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_SOFTWARE_MODEL: &str = "SmartSoftwareFinderModel";
pub const DEFAULT_WATER_MODEL: &str = "SmartWaterModelFinderModel";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Which oracle picks the relevant candidates for each mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// Keep the closest candidate of each list.
    #[default]
    Nearest,
    /// Keep every candidate.
    All,
    /// Ask an Ollama-compatible chat endpoint.
    Http,
}

impl FromStr for OracleKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "nearest" => Ok(OracleKind::Nearest),
            "all" => Ok(OracleKind::All),
            "http" => Ok(OracleKind::Http),
            _ => Err(CliError::Config(format!(
                "Unknown oracle kind '{}'. Expected one of: nearest, all, http.",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleSettings {
    pub kind: OracleKind,
    pub endpoint: String,
    pub software_model: String,
    pub water_model: String,
    pub timeout: Duration,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            kind: OracleKind::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            software_model: DEFAULT_SOFTWARE_MODEL.to_string(),
            water_model: DEFAULT_WATER_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fully resolved settings for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub extraction: ExtractionConfig,
    pub oracle: OracleSettings,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialExtractionConfig {
    #[serde(rename = "context-radius")]
    context_radius: Option<usize>,
    #[serde(rename = "resolution-scope")]
    resolution_scope: Option<ResolutionScope>,
    #[serde(rename = "include-water-model-type")]
    include_water_model_type: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialOracleConfig {
    kind: Option<OracleKind>,
    endpoint: Option<String>,
    #[serde(rename = "software-model")]
    software_model: Option<String>,
    #[serde(rename = "water-model")]
    water_model: Option<String>,
    #[serde(rename = "timeout-secs")]
    timeout_secs: Option<u64>,
}

/// One layer of configuration, as read from a TOML file or from `--set` pairs.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    extraction: Option<PartialExtractionConfig>,
    oracle: Option<PartialOracleConfig>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// `config.toml` in the per-user configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "mdharvest", "mdharvest")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads `explicit` if given, otherwise the default file if it exists, otherwise nothing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found, using built-in defaults.");
                Ok(Self::default())
            }
        }
    }

    /// Resolves the final settings. `--set` pairs win over flags, flags over the file.
    pub fn merge_with_cli(self, args: &ConfigArgs) -> Result<AppConfig> {
        let mut overrides = Self::default();
        overrides.apply_set_values(&args.set_values)?;

        let file_extraction = self.extraction.unwrap_or_default();
        let file_oracle = self.oracle.unwrap_or_default();
        let set_extraction = overrides.extraction.unwrap_or_default();
        let set_oracle = overrides.oracle.unwrap_or_default();

        let mut builder = ExtractionConfigBuilder::new();
        if let Some(radius) = set_extraction
            .context_radius
            .or(args.context_radius)
            .or(file_extraction.context_radius)
        {
            builder = builder.context_radius(radius);
        }
        let flag_scope = args.per_mention.then_some(ResolutionScope::PerMention);
        if let Some(scope) = set_extraction
            .resolution_scope
            .or(flag_scope)
            .or(file_extraction.resolution_scope)
        {
            builder = builder.resolution_scope(scope);
        }
        let flag_include = args.include_water_model_type.then_some(true);
        if let Some(include) = set_extraction
            .include_water_model_type
            .or(flag_include)
            .or(file_extraction.include_water_model_type)
        {
            builder = builder.include_water_model_type(include);
        }

        let defaults = OracleSettings::default();
        let timeout_secs = set_oracle
            .timeout_secs
            .or(file_oracle.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::Config(
                "`oracle.timeout-secs` must be greater than zero.".to_string(),
            ));
        }
        let oracle = OracleSettings {
            kind: set_oracle
                .kind
                .or(args.oracle)
                .or(file_oracle.kind)
                .unwrap_or(defaults.kind),
            endpoint: set_oracle
                .endpoint
                .or(file_oracle.endpoint)
                .unwrap_or(defaults.endpoint),
            software_model: set_oracle
                .software_model
                .or(file_oracle.software_model)
                .unwrap_or(defaults.software_model),
            water_model: set_oracle
                .water_model
                .or(file_oracle.water_model)
                .unwrap_or(defaults.water_model),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(AppConfig {
            extraction: builder.build(),
            oracle,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "extraction.context-radius" => {
                    self.extraction
                        .get_or_insert_with(Default::default)
                        .context_radius = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "extraction.resolution-scope" => {
                    let scope = match value_str {
                        "per-document" => ResolutionScope::PerDocument,
                        "per-mention" => ResolutionScope::PerMention,
                        _ => {
                            return Err(CliError::Config(format!(
                                "Invalid value for {}: {}. Expected per-document or per-mention.",
                                key, value_str
                            )));
                        }
                    };
                    self.extraction
                        .get_or_insert_with(Default::default)
                        .resolution_scope = Some(scope);
                }
                "extraction.include-water-model-type" => {
                    self.extraction
                        .get_or_insert_with(Default::default)
                        .include_water_model_type = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "oracle.kind" => {
                    self.oracle.get_or_insert_with(Default::default).kind =
                        Some(value_str.parse()?);
                }
                "oracle.endpoint" => {
                    self.oracle.get_or_insert_with(Default::default).endpoint =
                        Some(value_str.to_string());
                }
                "oracle.software-model" => {
                    self.oracle
                        .get_or_insert_with(Default::default)
                        .software_model = Some(value_str.to_string());
                }
                "oracle.water-model" => {
                    self.oracle.get_or_insert_with(Default::default).water_model =
                        Some(value_str.to_string());
                }
                "oracle.timeout-secs" => {
                    self.oracle.get_or_insert_with(Default::default).timeout_secs =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid integer value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let path = TEST_DIR.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn extract_config_args(args: &[&str]) -> ConfigArgs {
        let mut argv = vec!["mdharvest", "extract"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::Extract(args) => args.config,
            _ => panic!("Expected 'extract' subcommand"),
        }
    }

    #[test]
    fn no_file_and_no_flags_yields_defaults() {
        let config = PartialAppConfig::default()
            .merge_with_cli(&extract_config_args(&[]))
            .unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.extraction.context_radius, 2);
        assert_eq!(config.oracle.kind, OracleKind::Nearest);
        assert_eq!(config.oracle.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn file_values_are_applied() {
        let path = write_config_file(
            "full.toml",
            r#"
[extraction]
context-radius = 1
resolution-scope = "per-mention"
include-water-model-type = true

[oracle]
kind = "http"
endpoint = "http://gpu-box:11434"
software-model = "sw"
water-model = "wm"
timeout-secs = 30
"#,
        );
        let config = PartialAppConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&extract_config_args(&[]))
            .unwrap();
        assert_eq!(config.extraction.context_radius, 1);
        assert_eq!(
            config.extraction.resolution_scope,
            ResolutionScope::PerMention
        );
        assert!(config.extraction.include_water_model_type);
        assert_eq!(config.oracle.kind, OracleKind::Http);
        assert_eq!(config.oracle.endpoint, "http://gpu-box:11434");
        assert_eq!(config.oracle.software_model, "sw");
        assert_eq!(config.oracle.water_model, "wm");
        assert_eq!(config.oracle.timeout, Duration::from_secs(30));
    }

    #[test]
    fn flags_override_file_and_set_values_override_flags() {
        let path = write_config_file(
            "layered.toml",
            "[extraction]\ncontext-radius = 4\n\n[oracle]\nkind = \"http\"\n",
        );
        let args = extract_config_args(&[
            "--context-radius",
            "3",
            "--oracle",
            "all",
            "-S",
            "oracle.kind=nearest",
        ]);
        let config = PartialAppConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();
        assert_eq!(config.extraction.context_radius, 3);
        assert_eq!(config.oracle.kind, OracleKind::Nearest);
    }

    #[test]
    fn set_values_cover_every_supported_key() {
        let args = extract_config_args(&[
            "-S",
            "extraction.context-radius=0",
            "-S",
            "extraction.resolution-scope=per-mention",
            "-S",
            "extraction.include-water-model-type=true",
            "-S",
            "oracle.endpoint=http://127.0.0.1:9999",
            "-S",
            "oracle.software-model=a",
            "-S",
            "oracle.water-model=b",
            "-S",
            "oracle.timeout-secs=7",
        ]);
        let config = PartialAppConfig::default().merge_with_cli(&args).unwrap();
        assert_eq!(config.extraction.context_radius, 0);
        assert_eq!(
            config.extraction.resolution_scope,
            ResolutionScope::PerMention
        );
        assert!(config.extraction.include_water_model_type);
        assert_eq!(config.oracle.endpoint, "http://127.0.0.1:9999");
        assert_eq!(config.oracle.software_model, "a");
        assert_eq!(config.oracle.water_model, "b");
        assert_eq!(config.oracle.timeout, Duration::from_secs(7));
    }

    #[test]
    fn per_mention_flag_sets_resolution_scope() {
        let config = PartialAppConfig::default()
            .merge_with_cli(&extract_config_args(&["--per-mention"]))
            .unwrap();
        assert_eq!(
            config.extraction.resolution_scope,
            ResolutionScope::PerMention
        );
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let result = PartialAppConfig::default()
            .merge_with_cli(&extract_config_args(&["-S", "oracle.kind"]));
        assert!(
            matches!(result, Err(CliError::Config(msg)) if msg.contains("Expected KEY=VALUE"))
        );
    }

    #[test]
    fn unsupported_set_key_is_rejected() {
        let result = PartialAppConfig::default()
            .merge_with_cli(&extract_config_args(&["-S", "oracle.temperature=0.2"]));
        assert!(
            matches!(result, Err(CliError::Config(msg)) if msg.contains("Unsupported configuration key"))
        );
    }

    #[test]
    fn invalid_set_values_are_rejected() {
        for pair in [
            "extraction.context-radius=two",
            "extraction.resolution-scope=sometimes",
            "extraction.include-water-model-type=maybe",
            "oracle.kind=oracle",
            "oracle.timeout-secs=-1",
        ] {
            let result =
                PartialAppConfig::default().merge_with_cli(&extract_config_args(&["-S", pair]));
            assert!(matches!(result, Err(CliError::Config(_))), "{}", pair);
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = PartialAppConfig::default()
            .merge_with_cli(&extract_config_args(&["-S", "oracle.timeout-secs=0"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let path = write_config_file("unknown.toml", "[extraction]\nradius = 2\n");
        let result = PartialAppConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn explicit_missing_file_is_an_io_error() {
        let path = TEST_DIR.path().join("does-not-exist.toml");
        let result = PartialAppConfig::load(Some(&path));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
