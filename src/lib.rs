//! Purpose: Shared library crate used by the `csbkit` CLI and tests.
//! Exports: `core` (container codec, byte ordering, tables, errors) and
//! `csv` (delimited-text glue).
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Treat the crate API as internal until a dedicated library release.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod core;
pub mod csv;
