//! Policy Cache - demo runner
//!
//! Drives one eviction policy through a list of operations given on the
//! command line, e.g.
//!
//! ```text
//! CACHE_POLICY=mru policy_cache put:A=Hello put:B=World get:A put:C=Foo
//! ```
//!
//! With no arguments a reference workload is used. Discarded keys are
//! printed as `DISCARD: <key>` while the operations run.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use policy_cache::cache::{build_policy, StdoutNotifier};
use policy_cache::models::{reference_workload, render_listing, CacheSnapshot, Operation, Outcome};
use policy_cache::Config;

/// Main entry point for the demo runner.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Build the configured policy
/// 4. Run the operations and print lookups
/// 5. Print the cache listing and a JSON snapshot
fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Defaults to the configured filter, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let kind = config.validate().context("invalid cache configuration")?;
    info!(
        "Configuration loaded: policy={}, capacity={}",
        kind, config.capacity
    );

    let operations = parse_operations(std::env::args().skip(1))?;

    let mut cache = build_policy::<String, String>(kind, config.capacity, Box::new(StdoutNotifier))?;

    for op in &operations {
        if let Outcome::Found { key, value } = op.apply(&mut *cache) {
            println!(
                "{}: {}",
                key.as_deref().unwrap_or("None"),
                value.as_deref().unwrap_or("None")
            );
        }
    }

    print!("{}", render_listing(&*cache));

    let snapshot = CacheSnapshot::capture(&*cache);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    info!("Ran {} operations", operations.len());
    Ok(())
}

/// Parses the command-line operations, falling back to the reference workload.
fn parse_operations(args: impl Iterator<Item = String>) -> anyhow::Result<Vec<Operation>> {
    let operations = args
        .map(|arg| arg.parse::<Operation>())
        .collect::<Result<Vec<_>, _>>()
        .context("could not parse operations")?;

    if operations.is_empty() {
        return Ok(reference_workload());
    }
    Ok(operations)
}
