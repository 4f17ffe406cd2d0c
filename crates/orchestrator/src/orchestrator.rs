//! Orchestrator - fans targets out to a fixed pool of probe workers

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

use crate::probe::Prober;
use crate::summary::ScanSummary;
use portprint_common::{PortprintError, PortprintResult, ScanConfig, ScanEngine, Service, Target};
use portprint_plugins::PluginRegistry;

const DEFAULT_CONCURRENCY: usize = 50;

/// Reference scan engine: every target is probed once by the first free worker.
pub struct Orchestrator {
    registry: Arc<PluginRegistry>,
    concurrency: usize,
}

impl Orchestrator {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Cap the number of targets probed at once (at least one).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

#[async_trait]
impl ScanEngine for Orchestrator {
    /// Results come back in target order, one entry per identified service.
    #[instrument(skip_all, fields(targets = targets.len()))]
    async fn scan_targets(&self, targets: Vec<Target>, config: &ScanConfig) -> PortprintResult<Vec<Service>> {
        let total = targets.len();
        info!("Scanning {} target(s) with up to {} workers", total, self.concurrency);

        // Shared queue pattern: workers pop (index, target) until it drains.
        let queue = Arc::new(Mutex::new(targets.into_iter().enumerate().collect::<VecDeque<_>>()));

        let mut workers = Vec::new();
        for _ in 0..self.concurrency.min(total.max(1)) {
            let queue = queue.clone();
            let prober = Prober::new(self.registry.clone(), config.clone());

            workers.push(tokio::spawn(async move {
                let mut findings = Vec::new();
                loop {
                    let next = queue.lock().await.pop_front();
                    let Some((index, target)) = next else { break };
                    findings.push((index, prober.identify(&target).await));
                }
                findings
            }));
        }

        let mut findings: Vec<(usize, Option<Service>)> = join_workers(workers).await?.into_iter().flatten().collect();
        ScanSummary::from_findings(findings.iter().map(|(_, found)| found)).log();

        findings.sort_by_key(|(index, _)| *index);
        Ok(findings.into_iter().filter_map(|(_, found)| found).collect())
    }
}

/// Wait for every worker. The first failure aborts the ones still running.
async fn join_workers<T>(workers: Vec<JoinHandle<T>>) -> PortprintResult<Vec<T>> {
    let mut outputs = Vec::with_capacity(workers.len());
    let mut pending = workers.into_iter();

    while let Some(worker) = pending.next() {
        match worker.await {
            Ok(output) => outputs.push(output),
            Err(e) => {
                for rest in pending {
                    rest.abort();
                }
                return Err(PortprintError::OrchestrationFailed(format!("probe worker failed: {e}")));
            }
        }
    }
    Ok(outputs)
}
