use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("sweep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Delete cloud resources left behind by acceptance tests")
        .long_about("sweep lists every resource of each registered type in the selected regions and deletes them with bounded parallelism. Failures caused by the environment (region does not support the resource, credentials lack permission) are reported as skips instead of errors.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Sweep the selected regions")
                .arg(
                    Arg::new("region")
                        .long("region")
                        .short('r')
                        .help("Region to sweep, repeatable (overrides SWEEP and config)")
                        .action(ArgAction::Append)
                )
                .arg(
                    Arg::new("sweeper")
                        .long("sweeper")
                        .short('s')
                        .help("Run only this sweeper and its dependencies, repeatable (overrides SWEEP_RUN)")
                        .action(ArgAction::Append)
                )
                .arg(
                    Arg::new("fixture")
                        .long("fixture")
                        .help("JSON fixture cloud to sweep (default: $SWEEP_FIXTURE)")
                        .value_parser(value_parser!(std::path::PathBuf))
                )
                .arg(
                    Arg::new("allow-failures")
                        .long("allow-failures")
                        .help("Keep sweeping a region after a sweeper fails and exit successfully")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("List resources without deleting them")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("concurrency")
                        .long("concurrency")
                        .short('c')
                        .help("Maximum deletions in flight per sweeper (overrides config, default: 10)")
                        .value_parser(value_parser!(usize))
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output the run summary in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("list")
                .about("List registered sweepers in run order")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "sweep");
    }

    #[test]
    fn test_cli_verify() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_run_collects_repeated_regions() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "sweep",
                "run",
                "--region",
                "us-west-2",
                "-r",
                "us-east-1",
                "--sweeper",
                "cloud_app",
            ])
            .unwrap();
        let run = matches.subcommand_matches("run").unwrap();

        let regions: Vec<&String> = run.get_many::<String>("region").unwrap().collect();
        assert_eq!(regions, vec!["us-west-2", "us-east-1"]);
        assert_eq!(run.get_one::<String>("sweeper").unwrap(), "cloud_app");
        assert!(!run.get_flag("dry-run"));
    }

    #[test]
    fn test_run_concurrency_must_be_a_number() {
        let result = build_cli().try_get_matches_from(vec!["sweep", "run", "--concurrency", "lots"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let matches = build_cli()
            .try_get_matches_from(vec!["sweep", "list", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_subcommand_required() {
        let result = build_cli().try_get_matches_from(vec!["sweep"]);
        assert!(result.is_err());
    }
}
