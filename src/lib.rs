//! Workspace-level tooling package (pre-commit hooks). The planner lives in
//! `crates/freightpath-lib` and the binary in `crates/freightpath-cli`.
