//! Pure policy evaluation (no IO).
//!
//! Input: a settings snapshot constructed elsewhere and an ordered rule set.
//! Output: one result per rule + overall verdict.

#![forbid(unsafe_code)]

pub mod fingerprint;
pub mod model;
pub mod policy;
pub mod report;

mod engine;

pub use engine::{validate, EvalError};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
