//! WireGuard Endpoint Pinger - Main CLI Application
//!
//! Finds every peer endpoint in a directory of WireGuard configs, pings
//! each unique host and prints the hosts fastest first.

use clap::{error::ErrorKind, Parser};
use wg_endpoint_pinger::{
    cli::Cli,
    config::{display_config_summary, load_config, validate_config},
    discovery::ConfigDiscovery,
    error::{AppError, ErrorReporter, Result},
    executor::{ProbeScheduler, SchedulerConfig},
    extractor::EndpointExtractor,
    logging::LoggerFactory,
    models::Config,
    output::{OutputCoordinator, OutputFormatterFactory},
    probe::SystemPinger,
    report::Report,
    PKG_NAME, VERSION,
};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Panics on runtime workers surface as failed probes; only the main thread exits here
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        if std::thread::current().name() == Some("main") {
            process::exit(99);
        }
    }));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            process::exit(code);
        }
    };

    if cli.should_show_topic_help() {
        print!("{}", cli.display_help());
        return;
    }

    if cli.debug {
        eprintln!("{} v{} ({}, built {}, {})",
            PKG_NAME,
            VERSION,
            env!("GIT_COMMIT"),
            env!("BUILD_TIME"),
            env!("TARGET_TRIPLE"),
        );
        eprintln!("Debug mode enabled");
        eprintln!();
    }

    let debug = cli.debug;
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, false, debug),
    };

    let use_color = config.enable_color;
    if let Err(e) = run_application(config).await {
        exit_with_error(&e, use_color, debug);
    }
}

/// Print the error, its suggestions and exit with its code
fn exit_with_error(error: &AppError, use_color: bool, debug: bool) -> ! {
    eprintln!("Error: {}", error);

    if debug {
        eprintln!();
        eprintln!("{}", ErrorReporter::new(use_color, true).render(error));
    }

    print_error_suggestions(error);

    process::exit(error.exit_code());
}

/// Main application logic
async fn run_application(config: Config) -> Result<()> {
    colored::control::set_override(config.enable_color);

    if config.debug {
        eprintln!("Configuration loaded successfully:");
        eprintln!("{}", display_config_summary(&config));
        eprintln!();
    }

    for warning in validate_config(&config)? {
        eprintln!("{}", warning.format(config.enable_color));
    }

    let loggers = LoggerFactory::new(config.clone());
    let logger = loggers.create_logger("wgping").await;

    if config.debug {
        eprintln!("Session: {}", loggers.session_id());
    }

    let files = ConfigDiscovery::new(config.recursive, loggers.create_logger("discovery").await)
        .discover(&config.directory)
        .await?;

    let (endpoints, scan) = EndpointExtractor::new(loggers.create_logger("extractor").await)
        .scan(&files)
        .await;

    if endpoints.is_empty() {
        return Err(AppError::no_endpoints(files.len()));
    }

    wg_endpoint_pinger::log_info!(
        logger,
        "Probing endpoints from {} file(s) with {} packet(s), concurrency {}, timeout {}s",
        scan.files_scanned,
        config.ping_count,
        config.concurrency,
        config.timeout_seconds
    );

    let scheduler = ProbeScheduler::new(
        Arc::new(SystemPinger::new()),
        SchedulerConfig::from(&config),
        loggers.create_logger("scheduler").await,
    );
    let outcome = scheduler.run(endpoints).await?;

    let formatter = OutputFormatterFactory::create_formatter(config.enable_color, config.json_output, config.verbose);
    let coordinator = OutputCoordinator::new(formatter);

    if config.verbose {
        eprintln!("{}", coordinator.display_scan_summary(&scan, outcome.duplicates_skipped)?);
    }

    let report = Report::new(outcome, &scan);

    if report.summary.reachable == 0 {
        logger.warn("No endpoint answered; check network connectivity")
            .field("unreachable", report.summary.unreachable)
            .log()
            .await;
    }

    println!("{}", coordinator.display_report(&report)?);

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Usage(_) => {
            eprintln!();
            eprintln!("Usage: wgping [OPTIONS] <DIR>");
            eprintln!("  - Run 'wgping --help' for all options");
            eprintln!("  - Run 'wgping --help-topic examples' for common invocations");
        }
        AppError::Config(_) | AppError::Validation(_) | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - WGPING_COUNT must be 1-100, WGPING_CONCURRENCY 1-1024, WGPING_TIMEOUT 1-300");
            eprintln!("  - Boolean variables accept 'true' or 'false'");
        }
        AppError::DirectoryNotFound(_) | AppError::NoConfigFiles(_) => {
            eprintln!();
            eprintln!("Input help:");
            eprintln!("  - Point wgping at the directory holding your *.conf files");
            eprintln!("  - Use --recursive if the configs live in subdirectories");
        }
        AppError::NoEndpoints { .. } => {
            eprintln!();
            eprintln!("Extraction help:");
            eprintln!("  - Only 'Endpoint = host:port' lines inside [Peer] sections are used");
            eprintln!("  - Run with --verbose to see skipped files and malformed lines");
        }
        _ => {}
    }
}
