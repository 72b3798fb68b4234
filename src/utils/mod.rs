//! Shared utilities for netviz.
//!
//! Currently this is limited to logical path handling ([`paths`]), which is
//! used by both the reference resolver and the storage backends.

pub mod paths;
