use std::sync::Arc;

use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info};

use sweep_core::fixture::FixtureState;
use sweep_core::{FixtureCloud, SweepConfig, SweeperRegistry, events, resources};

#[derive(Serialize)]
struct SweeperEntry<'a> {
    name: &'a str,
    dependencies: &'a [String],
}

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_started", json_output = json_output);

    let config = SweepConfig::load_hierarchy().map_err(|e| {
        events::log_app_error(&e);
        e
    })?;

    // Registration only needs a provider type; nothing is called on it here.
    let provider = Arc::new(FixtureCloud::from_state(FixtureState::default()));
    let mut registry = SweeperRegistry::new();
    resources::register_builtin(&mut registry, provider, &config)?;

    let sweepers = match registry.run_order(None) {
        Ok(sweepers) => sweepers,
        Err(e) => {
            eprintln!("Failed to resolve sweeper order: {}", e);
            error!(event = "cli.list_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        let entries: Vec<SweeperEntry<'_>> = sweepers
            .iter()
            .map(|s| SweeperEntry {
                name: s.name(),
                dependencies: s.dependencies(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Registered sweepers (run order):");
        for sweeper in &sweepers {
            if sweeper.dependencies().is_empty() {
                println!("   {}", sweeper.name());
            } else {
                println!(
                    "   {} (after: {})",
                    sweeper.name(),
                    sweeper.dependencies().join(", ")
                );
            }
        }
    }

    info!(event = "cli.list_completed", count = sweepers.len());

    Ok(())
}
