//! The small, closed set of caller-recoverable errors this crate raises.
//!
//! Per §7 of the design, most "errors" in this domain are not errors at all:
//! a divide by zero becomes `UNDEF`, an unrecognised expression shape becomes
//! `NAC`. [`CoreError`] only covers the handful of genuine caller mistakes —
//! a malformed CFG, or asking for an analysis result that was never stored.
//! A type-assumption violation (a claimed-integer lvalue that isn't a `Var`)
//! is a programming bug, not a `CoreError` variant, and panics instead.

use crate::result_store::AnalysisId;

/// An error raised by this crate's public entry points.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    /// An [`AnalysisStore`](crate::result_store::AnalysisStore) was asked
    /// for an analysis result that hasn't been stored yet.
    #[error("no stored result for analysis id `{0}`")]
    MissingResult(AnalysisId),
    /// The CFG handed to the solver has no entry node.
    #[error("control flow graph has no entry node")]
    NoEntry,
    /// The CFG handed to the solver has no exit node.
    #[error("control flow graph has no exit node")]
    NoExit,
}
