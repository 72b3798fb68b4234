//! Test support: logging setup and document fixtures.
//!
//! Available to unit tests and, behind the `test-utils` feature, to the
//! integration suite.

use std::path::Path;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Safe to call from every test; only the first call installs a subscriber.
/// Respects `RUST_LOG` when no explicit level is given.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}

/// Write a fixture file under `root`, creating parent directories.
///
/// `relative` uses forward slashes regardless of platform.
pub fn write_fixture(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative.replace('/', std::path::MAIN_SEPARATOR_STR));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// A minimal two-file model graph: an entry document with one eager and one
/// lazy module, plus the referenced sub-config.
pub fn write_basic_graph(root: &Path) {
    write_fixture(
        root,
        "model.yaml",
        r"modules:
  entry:
    cls: Input
  backbone:
    cls: Sequential
    config: blocks/backbone.yaml
  head:
    cls: ComposableModel
    config: blocks/head.yaml
  exit:
    cls: Output
",
    );
    write_fixture(
        root,
        "blocks/backbone.yaml",
        "channels: 64\nactivation: relu\n",
    );
    write_fixture(root, "blocks/head.yaml", "modules:\n  exit:\n    cls: Output\n");
}
