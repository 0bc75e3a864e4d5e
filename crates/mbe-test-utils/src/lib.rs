//! Testing utilities for the microbench-engine workspace
//!
//! Shared sample classes, an in-memory class universe, and a recording
//! report listener.

#![allow(missing_docs)]

use mbe_discovery::BenchmarkNode;
use mbe_engine::ReportListener;
use mbe_model::{BenchmarkFixture, BenchmarkUniverse, ClassMetadata, MethodMetadata};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// In-memory class universe backed by a plain list
#[derive(Debug, Default)]
pub struct InMemoryUniverse {
    classes: Vec<Arc<ClassMetadata>>,
}

impl InMemoryUniverse {
    pub fn new(classes: impl IntoIterator<Item = ClassMetadata>) -> Self {
        Self {
            classes: classes.into_iter().map(Arc::new).collect(),
        }
    }
}

impl BenchmarkUniverse for InMemoryUniverse {
    fn find_class(&self, class_name: &str) -> Option<Arc<ClassMetadata>> {
        self.classes
            .iter()
            .find(|class| class.class_name() == class_name)
            .cloned()
    }

    fn scan_package(&self, package: &str) -> Vec<Arc<ClassMetadata>> {
        self.classes
            .iter()
            .filter(|class| class.package_name() == package)
            .cloned()
            .collect()
    }
}

/// Canonical sample: `Bench { run(), scan(State) x [n=1],[n=2] }`
pub fn sample_bench() -> ClassMetadata {
    ClassMetadata::new("com.acme.Bench")
        .with_method(MethodMetadata::benchmark("run", Vec::<String>::new()))
        .with_method(
            MethodMetadata::benchmark("scan", ["com.acme.Bench$State"]).with_fixtures([
                BenchmarkFixture::new([("n", "1")]),
                BenchmarkFixture::new([("n", "2")]),
            ]),
        )
}

/// A container with a single plain benchmark method
pub fn plain_bench() -> ClassMetadata {
    ClassMetadata::new("com.acme.PlainBench")
        .with_method(MethodMetadata::benchmark("run", Vec::<String>::new()))
}

/// A class with no benchmark methods; fails the container predicate
pub fn helper_class() -> ClassMetadata {
    ClassMetadata::new("com.acme.Helpers")
        .with_method(MethodMetadata::new("setup", Vec::<String>::new()))
}

/// A container with overloaded benchmark methods distinguished by signature
pub fn overloaded_bench() -> ClassMetadata {
    ClassMetadata::new("com.acme.OverloadedBench")
        .with_method(MethodMetadata::benchmark("load", Vec::<String>::new()))
        .with_method(MethodMetadata::benchmark("load", ["int"]))
}

/// A container in a different package
pub fn other_package_bench() -> ClassMetadata {
    ClassMetadata::new("org.other.Bench")
        .with_method(MethodMetadata::benchmark("run", Vec::<String>::new()))
}

/// Universe holding every sample class
pub fn sample_universe() -> Arc<InMemoryUniverse> {
    Arc::new(InMemoryUniverse::new([
        sample_bench(),
        plain_bench(),
        helper_class(),
        overloaded_bench(),
        other_package_bench(),
    ]))
}

/// Listener recording every published report and file entry
#[derive(Debug, Default)]
pub struct RecordingListener {
    report_entries: Mutex<Vec<(String, BTreeMap<String, String>)>>,
    file_entries: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded report entries as (unique id, entries) pairs
    pub fn report_entries(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.report_entries.lock().clone()
    }

    /// Recorded file entries as (unique id, path) pairs
    pub fn file_entries(&self) -> Vec<(String, PathBuf)> {
        self.file_entries.lock().clone()
    }
}

impl ReportListener for RecordingListener {
    fn report_entry_published(&self, node: &BenchmarkNode, entries: &BTreeMap<String, String>) {
        self.report_entries
            .lock()
            .push((node.unique_id().to_string(), entries.clone()));
    }

    fn file_entry_published(&self, node: &BenchmarkNode, path: &Path) {
        self.file_entries
            .lock()
            .push((node.unique_id().to_string(), path.to_path_buf()));
    }
}
