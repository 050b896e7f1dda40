use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only warning- and error-level events are emitted,
/// so skipped sweepers stay visible.
/// When `quiet` is false, info-level and above events are emitted.
/// Events go to stderr as JSON so stdout stays reserved for the run summary.
pub fn init_logging(quiet: bool) {
    let directive = if quiet { "sweep=warn" } else { "sweep=info" };

    let filter = match directive.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}
