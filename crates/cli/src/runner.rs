// runner.rs
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::args::Cli;
use crate::config::RunConfig;
use crate::output::{check_output_file, report, OverwritePrompt, TerminalPrompt};
use portprint_common::{PortprintResult, ScanEngine};
use portprint_orchestrator::Orchestrator;
use portprint_plugins::{default_port_range, PluginRegistry};
use portprint_target_resolver::{HostLookup, TargetResolver};

pub async fn run(cli: Cli) -> Result<()> {
    let registry = PluginRegistry::builtin().context("Failed loading plugins")?;

    if cli.priority_ports {
        println!("{}", default_port_range(&registry));
        return Ok(());
    }

    let config = RunConfig::from_cli(cli)?;
    preflight(&config, &mut TerminalPrompt)?;

    let resolver = TargetResolver::system()?.with_verbose(config.scan.verbose);
    let engine = Orchestrator::new(registry).with_concurrency(config.concurrency);
    execute(&config, &resolver, &engine).await
}

/// Checks that must pass before any target is touched.
fn preflight(config: &RunConfig, prompt: &mut dyn OverwritePrompt) -> PortprintResult<()> {
    if let Some(path) = &config.report.output {
        check_output_file(path, prompt)?;
    }

    if config.scan.udp && config.scan.verbose && !running_as_root() {
        warn!("Note: UDP scan may require root privileges");
    }
    Ok(())
}

/// Resolve, scan, report.
async fn execute<L: HostLookup>(config: &RunConfig, resolver: &TargetResolver<L>, engine: &dyn ScanEngine) -> Result<()> {
    let raw_targets = config.source.clone().read_lines().context("Failed reading targets")?;
    let targets = resolver.resolve(&raw_targets).await.context("Failed resolving targets")?;
    info!("Resolved {} of {} target(s)", targets.len(), raw_targets.len());

    let services = engine
        .scan_targets(targets, &config.scan)
        .await
        .context("Failed running scan")?;

    report(&services, &config.report).context("Failed reporting results")?;
    Ok(())
}

#[cfg(unix)]
fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn running_as_root() -> bool {
    true
}
