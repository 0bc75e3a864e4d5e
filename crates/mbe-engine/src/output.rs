//! Per-node output directories
//!
//! Provides [`OutputDirectoryProvider`], the seam through which contexts
//! obtain a node's output directory, plus a default implementation laying
//! directories out under a configured root by unique-id segment values.

use mbe_discovery::BenchmarkNode;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Provider of per-node output directories
pub trait OutputDirectoryProvider: Send + Sync {
    /// Create (if necessary) and return the output directory of a node
    ///
    /// # Errors
    /// Any I/O failure while creating the directory.
    fn create_output_directory(&self, node: &BenchmarkNode) -> io::Result<PathBuf>;
}

/// Default provider rooted at a fixed directory
///
/// A node's directory is `root/<segment>/<segment>/...`, one path component
/// per unique-id segment value, sanitized for the file system.
#[derive(Debug, Clone)]
pub struct DefaultOutputDirectoryProvider {
    root: PathBuf,
}

impl DefaultOutputDirectoryProvider {
    /// Create a provider rooted at the given directory
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl OutputDirectoryProvider for DefaultOutputDirectoryProvider {
    fn create_output_directory(&self, node: &BenchmarkNode) -> io::Result<PathBuf> {
        let mut dir = self.root.clone();
        for segment in node.unique_id().segments() {
            dir.push(sanitize(segment.value()));
        }
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Replace file-system-hostile characters with underscores
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_safe_characters() {
        assert_eq!(sanitize("com.acme.Bench"), "com.acme.Bench");
        assert_eq!(sanitize("run(com.acme.Bench$State)"), "run_com.acme.Bench_State_");
        assert_eq!(sanitize("[n=1]"), "_n_1_");
    }
}
