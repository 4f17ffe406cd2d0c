//! Run configuration, built once from the parsed command line

use std::path::PathBuf;
use std::time::Duration;

use crate::args::Cli;
use portprint_common::{PortprintError, PortprintResult, ScanConfig};
use portprint_target_resolver::TargetSource;

/// How detected services are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line.
    Json,
    /// Header row, then one row per service.
    Csv,
    /// One human-readable line per service.
    Text,
}

impl OutputFormat {
    pub fn from_flags(json: bool, csv: bool) -> PortprintResult<Self> {
        match (json, csv) {
            (true, true) => Err(PortprintError::ConfigurationConflict(
                "--json and --csv are mutually exclusive".to_string(),
            )),
            (true, false) => Ok(Self::Json),
            (false, true) => Ok(Self::Csv),
            (false, false) => Ok(Self::Text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub format: OutputFormat,
    /// `None` writes to stdout.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: TargetSource,
    pub scan: ScanConfig,
    pub report: ReportConfig,
    pub concurrency: usize,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> PortprintResult<Self> {
        if !cli.targets.is_empty() && cli.list.is_some() {
            return Err(PortprintError::ConfigurationConflict(
                "--targets and --list are mutually exclusive".to_string(),
            ));
        }

        let report = ReportConfig {
            format: OutputFormat::from_flags(cli.json, cli.csv)?,
            output: cli.output,
        };

        let scan = ScanConfig {
            default_timeout: Duration::from_millis(cli.timeout),
            fast_mode: cli.fast,
            udp: cli.udp,
            verbose: cli.verbose,
        };

        Ok(Self {
            source: TargetSource::select(cli.targets, cli.list),
            scan,
            report,
            concurrency: cli.concurrency,
        })
    }
}
