// Building Metrics - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/building-metrics --input building.json
// ```
//
// Or with a specific operation:
//
// ```console
// $ ./target/release/building-metrics --operation luminosity --input building.json --pretty
// ```

use anyhow::{Context, Result};
use building_metrics::io::{
    write_atomic, AuditLog, AuditingReader, JsonReader, LoggingReader, Reader,
};
use building_metrics::logging::LoggingConfig;
use building_metrics::service::{BuildingService, Request, Response, ServiceError};
use building_metrics::types::config::CliArgs;
use building_metrics::types::{Operation, ServiceConfig};
use clap::Parser;
use std::process;
use tracing::{error, info, Level};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match ServiceConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = logging_config(&args).init() {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Building Metrics");

    // Load configuration from CLI arguments and optional config file
    let config = match ServiceConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(2);
    }

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no document will be read.");
        print_configuration_summary(&config);
        return;
    }

    let pipeline = LoggingReader::new(JsonReader::new().with_style(config.output_style));
    let result = if config.audit {
        let log = AuditLog::new();
        let result = run(&config, AuditingReader::new(pipeline, log.clone()));
        print_audit_trail(&log);
        result
    } else {
        run(&config, pipeline)
    };

    if let Err(e) = result {
        let client_error = match e.downcast_ref::<ServiceError>() {
            Some(service_error) => {
                service_error.log();
                service_error.is_client_error()
            }
            None => false,
        };
        error!("Operation {} failed: {:#}", config.operation, e);
        eprintln!("Error: {:#}", e);
        process::exit(if client_error { 2 } else { 1 });
    }

    info!("Building Metrics completed successfully");
}

/// Logging setup from the CLI flags; quiet (WARN) unless asked otherwise
fn logging_config(args: &CliArgs) -> LoggingConfig {
    let level = if args.debug {
        Level::DEBUG
    } else if args.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let mut logging = LoggingConfig::new().with_level(level);
    if args.debug {
        logging = logging.with_span_events();
    }
    if args.json_logs {
        logging = logging.with_json_format().without_ansi();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }
    logging
}

/// Load the document, handle the configured request and emit the response
fn run<R: Reader>(config: &ServiceConfig, reader: R) -> Result<()> {
    let service = BuildingService::new(reader);
    let request = Request::from_config(config)?;

    let source = if config.reads_stdin() {
        "standard input".to_string()
    } else {
        config.input.as_deref().map(|p| p.display().to_string()).unwrap_or_default()
    };
    let document = service
        .load(config.input.as_deref())
        .with_context(|| format!("Failed to load building document from {}", source))?;

    let response = service
        .handle(&request, &document)
        .with_context(|| format!("Failed to handle {} request", config.operation))?;

    emit(config, &response)
}

/// Write the response to the output path, or standard output
fn emit(config: &ServiceConfig, response: &Response) -> Result<()> {
    if !response.has_payload() {
        eprintln!("{}", response);
        return Ok(());
    }

    let text = format!("{}\n", response);
    match (&config.output, config.operation) {
        (Some(path), operation) if operation != Operation::Save => {
            write_atomic(path, text.as_bytes())
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        _ => print!("{}", text),
    }
    Ok(())
}

/// Print configuration summary
fn print_configuration_summary(config: &ServiceConfig) {
    eprintln!("Configuration:");
    eprintln!("  Operation: {}", config.operation);
    match &config.input {
        Some(path) if !config.reads_stdin() => eprintln!("  Input: {}", path.display()),
        _ => eprintln!("  Input: <stdin>"),
    }
    match &config.output {
        Some(path) => eprintln!("  Output: {}", path.display()),
        None => eprintln!("  Output: <stdout>"),
    }
    if config.operation == Operation::Measure {
        eprintln!("  Metric: {}", config.metric);
        eprintln!("  Level: {}", config.level_id.as_deref().unwrap_or("-"));
        eprintln!("  Room: {}", config.room_id.as_deref().unwrap_or("-"));
    }
    eprintln!("  Output Style: {}", config.output_style);
    eprintln!("  Audit: {}", config.audit);
    eprintln!();
}

/// Print the audit trail as JSON lines on standard error
fn print_audit_trail(log: &AuditLog) {
    eprintln!("Audit trail ({} entries, {} failed):", log.len(), log.failures());
    for entry in log.entries() {
        match serde_json::to_string(&entry) {
            Ok(line) => eprintln!("{}", line),
            Err(e) => eprintln!("Failed to serialize audit entry: {}", e),
        }
    }
}
