//! Stable DTOs and IDs used across the webglguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs for rules and failure codes
//! - canonical repo-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use path::RepoPath;
pub use receipt::{
    Location, ReportEnvelope, RuleOutcome, RuleStatus, ToolMeta, Verdict, WebglguardData,
    WebglguardReport, SCHEMA_REPORT_V1,
};
