use clap::ArgMatches;
use tracing::error;

use sweep_core::events;

mod list;
mod run;

pub async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("run", sub_matches)) => run::handle_run_command(sub_matches).await,
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}
