//! Configuration structures for the building metrics service
//!
//! This module contains the command line arguments, the partial configuration
//! file form, and the merged service configuration with its validation logic.

use super::{Metric, Operation, OutputStyle};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Path value meaning "read the document from standard input"
pub const STDIN_PATH: &str = "-";

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "building-metrics",
    version = "0.1.0",
    about = "Building metrics - area, volume and luminosity reports for building documents",
    long_about = "Loads a building document (building -> levels -> rooms) and computes area, volume and \
        average luminosity over the whole tree or a single node.

EXAMPLES:
    # Print an outline of the building
    building-metrics --input building.json

    # Full nested area report, pretty printed
    building-metrics --operation area --input building.json --pretty

    # Volume of one room
    building-metrics --operation measure --level-id L1 --room-id R1 --input building.json

    # Read from stdin and save a normalised copy
    cat building.json | building-metrics --operation save --input - --output copy.json

    # Generate configuration template
    building-metrics --print-config > service.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Operation to run
    #[arg(
        long,
        help = "Operation (load, save, area, volume, luminosity, measure, describe)",
        long_help = "Which operation to route the document to. Default: describe"
    )]
    pub operation: Option<String>,

    /// Input document path, `-` for stdin
    #[arg(short, long, help = "Input document path ('-' for stdin)")]
    pub input: Option<String>,

    /// Output path; stdout when absent
    #[arg(short, long, help = "Output path (stdout when absent)")]
    pub output: Option<String>,

    /// Metric used by the measure operation
    #[arg(long, help = "Metric for the measure operation (area, volume, luminosity)")]
    pub metric: Option<String>,

    /// Level to measure
    #[arg(long, help = "Level id for the measure operation")]
    pub level_id: Option<String>,

    /// Room to measure (requires a level id)
    #[arg(long, help = "Room id for the measure operation (requires --level-id)")]
    pub room_id: Option<String>,

    /// Pretty print JSON output
    #[arg(long, help = "Pretty print JSON output")]
    pub pretty: bool,

    /// Wrap the reader pipeline with the audit decorator
    #[arg(long, help = "Record an audit trail of every read and write")]
    pub audit: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit log lines as JSON
    #[arg(long, help = "Emit log lines as JSON")]
    pub json_logs: bool,

    /// Additionally write logs to a daily rolling file in this directory
    #[arg(long, help = "Directory for rolling log files")]
    pub log_dir: Option<String>,

    /// Dry run mode - validate configuration without touching any document
    #[arg(long, help = "Validate configuration without running the operation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Operation to run
    pub operation: Option<Operation>,

    /// Input document path
    pub input: Option<PathBuf>,

    /// Output path
    pub output: Option<PathBuf>,

    /// Metric used by the measure operation
    pub metric: Option<Metric>,

    /// Level to measure
    pub level_id: Option<String>,

    /// Room to measure
    pub room_id: Option<String>,

    /// JSON output style
    pub output_style: Option<OutputStyle>,

    /// Whether to add the audit decorator
    pub audit: Option<bool>,
}

/// Configuration for one invocation of the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Operation to run
    pub operation: Operation,

    /// Input document path; `None` or `-` reads standard input
    pub input: Option<PathBuf>,

    /// Output path; `None` writes to standard output
    pub output: Option<PathBuf>,

    /// Metric used by the measure operation
    pub metric: Metric,

    /// Level to measure
    pub level_id: Option<String>,

    /// Room to measure
    pub room_id: Option<String>,

    /// JSON output style
    pub output_style: OutputStyle,

    /// Whether to add the audit decorator
    pub audit: bool,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A CLI value could not be parsed
    #[error("Invalid value for --{field}: {message}")]
    InvalidArgument {
        /// Name of the offending flag
        field: &'static str,
        /// Parser message
        message: String,
    },
}

/// Validation errors for the service configuration
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// A room id was given without the level it belongs to
    #[error("Parameter 'level_id' is required when 'room_id' ({0}) is provided")]
    RoomWithoutLevel(String),

    /// Node ids were given to an operation that does not use them
    #[error("Level and room ids are only valid for the measure operation, not {0}")]
    NodeIdsWithoutMeasure(Operation),

    /// The operation persists a document but no output path was given
    #[error("Operation {0} requires an output path")]
    MissingOutput(Operation),
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            operation: Operation::Describe,
            input: None,
            output: None,
            metric: Metric::Volume,
            level_id: None,
            room_id: None,
            output_style: OutputStyle::Compact,
            audit: false,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args)?;

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            operation: config_file.operation.unwrap_or(defaults.operation),
            input: config_file.input.or(defaults.input),
            output: config_file.output.or(defaults.output),
            metric: config_file.metric.unwrap_or(defaults.metric),
            level_id: config_file.level_id.or(defaults.level_id),
            room_id: config_file.room_id.or(defaults.room_id),
            output_style: config_file.output_style.unwrap_or(defaults.output_style),
            audit: config_file.audit.unwrap_or(defaults.audit),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.operation {
            config.operation = value
                .parse()
                .map_err(|message| ConfigError::InvalidArgument { field: "operation", message })?;
        }
        if let Some(value) = args.metric {
            config.metric = value
                .parse()
                .map_err(|message| ConfigError::InvalidArgument { field: "metric", message })?;
        }
        if let Some(value) = args.input {
            config.input = Some(PathBuf::from(value));
        }
        if let Some(value) = args.output {
            config.output = Some(PathBuf::from(value));
        }
        if let Some(value) = args.level_id {
            config.level_id = Some(value);
        }
        if let Some(value) = args.room_id {
            config.room_id = Some(value);
        }
        if args.pretty {
            config.output_style = OutputStyle::Pretty;
        }
        if args.audit {
            config.audit = true;
        }

        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate cross-field rules
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let has_node_ids = self.level_id.is_some() || self.room_id.is_some();
        if self.operation != Operation::Measure && has_node_ids {
            return Err(ConfigValidationError::NodeIdsWithoutMeasure(self.operation));
        }

        if let (Some(room_id), None) = (&self.room_id, &self.level_id) {
            return Err(ConfigValidationError::RoomWithoutLevel(room_id.clone()));
        }

        if self.operation.requires_output() && self.output.is_none() {
            return Err(ConfigValidationError::MissingOutput(self.operation));
        }

        Ok(())
    }

    /// Whether the document comes from standard input
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == STDIN_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs::try_parse_from(["building-metrics"]).unwrap()
    }

    #[test]
    fn test_service_config_default() {
        let config = ServiceConfig::default();

        assert_eq!(config.operation, Operation::Describe);
        assert_eq!(config.metric, Metric::Volume);
        assert_eq!(config.output_style, OutputStyle::Compact);
        assert!(config.input.is_none());
        assert!(config.reads_stdin());
        assert!(!config.audit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "operation": "luminosity",
            "input": "tower.json",
            "output_style": "pretty",
            "audit": true
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = ServiceConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.operation, Operation::Luminosity);
        assert_eq!(config.input, Some(PathBuf::from("tower.json")));
        assert_eq!(config.output_style, OutputStyle::Pretty);
        assert!(config.audit);
        // Defaults remain for fields the file leaves out
        assert_eq!(config.metric, Metric::Volume);
        assert!(!config.reads_stdin());
    }

    #[test]
    fn test_config_file_wrong_extension() {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let result = ServiceConfig::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"));
    }

    #[test]
    fn test_config_file_missing() {
        let result = ServiceConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let mut args = empty_args();
        args.operation = Some("measure".to_string());
        args.metric = Some("area".to_string());
        args.level_id = Some("L1".to_string());
        args.input = Some("-".to_string());
        args.pretty = true;

        let config = ServiceConfig::from_cli_args(args).unwrap();

        assert_eq!(config.operation, Operation::Measure);
        assert_eq!(config.metric, Metric::Area);
        assert_eq!(config.level_id.as_deref(), Some("L1"));
        assert_eq!(config.output_style, OutputStyle::Pretty);
        assert!(config.reads_stdin());
    }

    #[test]
    fn test_cli_invalid_operation() {
        let mut args = empty_args();
        args.operation = Some("upload".to_string());

        let result = ServiceConfig::from_cli_args(args);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidArgument { field: "operation", .. })
        ));
    }

    #[test]
    fn test_validation_room_without_level() {
        let config = ServiceConfig {
            operation: Operation::Measure,
            room_id: Some("R1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::RoomWithoutLevel("R1".to_string()))
        );
    }

    #[test]
    fn test_validation_ids_outside_measure() {
        let config = ServiceConfig {
            operation: Operation::Area,
            level_id: Some("L1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::NodeIdsWithoutMeasure(Operation::Area))
        );
    }

    #[test]
    fn test_validation_save_requires_output() {
        let mut config = ServiceConfig { operation: Operation::Save, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingOutput(Operation::Save)));

        config.output = Some(PathBuf::from("out.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_print_json_round_trips() {
        let config = ServiceConfig { audit: true, ..Default::default() };
        let json = config.print_json().unwrap();
        let parsed: ServiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_printed_config_loads_as_config_file() {
        use std::io::Write;
        use tempfile::Builder;

        let config = ServiceConfig {
            operation: Operation::Measure,
            input: Some(PathBuf::from("tower.json")),
            metric: Metric::Area,
            level_id: Some("L1".to_string()),
            output_style: OutputStyle::Pretty,
            ..Default::default()
        };
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(config.print_json().unwrap().as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert_eq!(ServiceConfig::from_file(temp_file.path()).unwrap(), config);
    }
}
