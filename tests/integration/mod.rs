//! Integration test suite for netviz
//!
//! End-to-end tests covering the full resolution pipeline: documents on real
//! storage, upload sessions, preset catalogs, and the CLI binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolution**: eager/lazy reference expansion over a local root
//! - **sessions**: upload sessions and on-demand subgraph fetches
//! - **presets**: catalog discovery and cloning into sessions
//! - **cli**: the `netviz` binary's resolve/refs/presets commands

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod presets;
mod resolution;
mod sessions;
