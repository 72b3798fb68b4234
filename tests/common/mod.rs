//! Common test utilities for the netviz integration suite.

// Allow dead code because these utilities are shared across test files and
// not every helper is used in every file
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

/// A temporary resolution root with fixture helpers.
pub struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    pub fn new() -> Self {
        netviz::test_utils::init_test_logging(None);
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write one fixture file, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> &Self {
        netviz::test_utils::write_fixture(self.dir.path(), relative, contents);
        self
    }

    /// Seed the standard two-file graph (eager backbone, lazy head).
    pub fn with_basic_graph(self) -> Self {
        netviz::test_utils::write_basic_graph(self.dir.path());
        self
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }
}

/// Build an in-memory zip bundle from (name, contents) pairs.
pub fn zip_bundle(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default();
        for (name, contents) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }
    buffer.into_inner()
}
