//! Per-scan identification counts

use portprint_common::Service;
use tracing::info;

/// What one scan found, folded from every worker's findings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub targets: usize,
    pub identified: usize,
}

impl ScanSummary {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Option<Service>>) -> Self {
        findings.into_iter().fold(Self::default(), |mut summary, found| {
            summary.targets += 1;
            summary.identified += usize::from(found.is_some());
            summary
        })
    }

    pub fn unidentified(&self) -> usize {
        self.targets - self.identified
    }

    pub fn log(&self) {
        info!(
            targets = self.targets,
            identified = self.identified,
            unidentified = self.unidentified(),
            "Scan finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portprint_common::Target;

    #[test]
    fn test_counts_from_findings() {
        let target = Target::new("10.0.0.1:22".parse().unwrap());
        let findings = vec![Some(Service::new(&target, "ssh")), None, None];

        let summary = ScanSummary::from_findings(&findings);
        assert_eq!(summary.targets, 3);
        assert_eq!(summary.identified, 1);
        assert_eq!(summary.unidentified(), 2);
    }

    #[test]
    fn test_empty_scan() {
        let summary = ScanSummary::from_findings(&Vec::new());
        assert_eq!(summary, ScanSummary::default());
        assert_eq!(summary.unidentified(), 0);
    }
}
