//! Report listener
//!
//! The seam to the execution/reporting collaborator: contexts publish report
//! entries and published files through a [`ReportListener`].

use mbe_discovery::BenchmarkNode;
use std::collections::BTreeMap;
use std::path::Path;

/// Receiver of report entries and published files
///
/// All methods default to no-ops so listeners implement only what they need.
pub trait ReportListener: Send + Sync {
    /// A context published a key/value report entry for a node
    fn report_entry_published(&self, node: &BenchmarkNode, entries: &BTreeMap<String, String>) {
        let _ = (node, entries);
    }

    /// A context published a file or directory for a node
    fn file_entry_published(&self, node: &BenchmarkNode, path: &Path) {
        let _ = (node, path);
    }
}

/// Listener discarding everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReportListener;

impl ReportListener for NoopReportListener {}
