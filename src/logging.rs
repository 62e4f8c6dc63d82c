// Logging initialisation.
//
// Writes structured logs to both:
//   - stderr → stdout is reserved for the JSON routes the binary prints
//   - `./logs/route-planner.log` → persisted next to the working directory
//
// The log level is controlled by the `RUST_LOG` environment variable
// (defaults to `info`, with the HTTP stack kept at `warn`).
//
// To see per-tour details:  `RUST_LOG=debug`
// To trace OSRM requests:   `RUST_LOG=info,route_planner::render=debug`

use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_DIR: &str = "./logs";
pub const LOG_FILE: &str = "route-planner.log";

// Initialise the global tracing subscriber.
//
// Returns a [`WorkerGuard`] that must be kept alive for the whole run;
// dropping it early loses buffered log lines.
pub fn init() -> non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(LOG_DIR, LOG_FILE);
    let (file_writer, guard) = non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn,hyper_util=warn"));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    // plain text, no ANSI escapes
    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
