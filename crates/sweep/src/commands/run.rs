use std::path::PathBuf;
use std::sync::Arc;

use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use sweep_core::fixture::ENV_FIXTURE;
use sweep_core::{
    FixtureCloud, Region, RunOptions, RunStatus, RunSummary, SweepConfig, SweeperRegistry,
    events, resources, run_sweepers,
};

use crate::signals;
use crate::table::TableFormatter;

pub(crate) async fn handle_run_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    let config = match load_config_with_overrides(matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            error!(event = "cli.run_config_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let fixture_path = fixture_path(matches).ok_or_else(|| {
        format!(
            "No cloud to sweep: pass --fixture <path> or set {}",
            ENV_FIXTURE
        )
    })?;

    let regions = config
        .sweep
        .regions
        .iter()
        .map(Region::new)
        .collect::<Result<Vec<_>, _>>()?;
    let options = RunOptions {
        regions,
        sweepers: (!config.sweep.sweepers.is_empty()).then(|| config.sweep.sweepers.clone()),
        allow_failures: config.sweep.allow_failures(),
    };

    info!(
        event = "cli.run_started",
        fixture = %fixture_path.display(),
        regions = ?config.sweep.regions,
        dry_run = config.sweep.dry_run(),
        allow_failures = options.allow_failures
    );

    let cloud = FixtureCloud::load(&fixture_path)?;
    let mut registry = SweeperRegistry::new();
    resources::register_builtin(&mut registry, Arc::new(cloud), &config)?;

    let cancel = CancellationToken::new();
    let watcher = signals::spawn_shutdown_watcher(cancel.clone());
    let result = run_sweepers(&registry, &options, &cancel).await;
    watcher.abort();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Failed to run sweepers: {}", e);
            error!(event = "cli.run_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    info!(
        event = "cli.run_completed",
        runs = summary.runs.len(),
        failed = summary.failed_count(),
        skipped = summary.skipped_count(),
        deleted = summary.deleted_count(),
        cancelled = summary.cancelled
    );

    if summary.has_failures() && !options.allow_failures {
        return Err(format_partial_failure_error(summary.failed_count(), summary.runs.len()).into());
    }

    Ok(())
}

/// Config files and environment, then command-line flags on top.
fn load_config_with_overrides(
    matches: &ArgMatches,
) -> Result<SweepConfig, sweep_core::errors::ConfigError> {
    let mut config = SweepConfig::load_hierarchy()?;

    if let Some(regions) = matches.get_many::<String>("region") {
        config.sweep.regions = regions
            .flat_map(|r| sweep_core::config::loading::split_list(r))
            .collect();
    }
    if let Some(sweepers) = matches.get_many::<String>("sweeper") {
        config.sweep.sweepers = sweepers.cloned().collect();
    }
    if let Some(concurrency) = matches.get_one::<usize>("concurrency") {
        config.sweep.concurrency = Some(*concurrency);
    }
    if matches.get_flag("dry-run") {
        config.sweep.dry_run = Some(true);
    }
    if matches.get_flag("allow-failures") {
        config.sweep.allow_failures = Some(true);
    }

    config.validate()?;
    Ok(config)
}

fn fixture_path(matches: &ArgMatches) -> Option<PathBuf> {
    matches
        .get_one::<PathBuf>("fixture")
        .cloned()
        .or_else(|| std::env::var_os(ENV_FIXTURE).map(PathBuf::from))
}

fn print_summary(summary: &RunSummary) {
    if summary.runs.is_empty() {
        println!("No sweepers registered.");
        return;
    }

    TableFormatter::new(&summary.runs).print_table(&summary.runs);

    println!(
        "Deleted {} resource(s); {} sweeper run(s) skipped, {} failed.",
        summary.deleted_count(),
        summary.skipped_count(),
        summary.failed_count()
    );
    if summary.cancelled {
        println!("Run was cancelled before completion.");
    }

    let failures: Vec<_> = summary.failed().collect();
    if !failures.is_empty() {
        eprintln!("Failed sweeper run(s):");
        for run in failures {
            if let RunStatus::Failed { error, .. } = &run.outcome {
                eprintln!("   {} in {}: {}", run.sweeper, run.region, error);
            }
        }
    }
}

fn format_partial_failure_error(failed: usize, total: usize) -> String {
    format!(
        "Partial failure: {} of {} sweeper run(s) failed",
        failed, total
    )
}
