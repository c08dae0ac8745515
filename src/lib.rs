//! Workspace anchor crate.
//!
//! Exists so the workspace root can carry shared tooling (git hooks via
//! `cargo-husky`); all functionality lives in the crates under `crates/`.
