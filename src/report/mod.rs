//! Report renderers for scoring results.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects `--verbose` / `--quiet`.
//! - [`pdf`] — cover page with rating stat cards followed by a per-document table.

pub mod pdf;
pub mod terminal;
