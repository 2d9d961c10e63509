#![warn(
    clippy::pedantic,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

//! A generic monotone dataflow analysis core: a forward/backward worklist
//! solver, a three-tier constant-propagation analysis, and a dead-code
//! detector over a three-address intermediate representation.
//!
//! This crate does not parse source, build IR, or construct control flow
//! graphs from a real front end — it is the analysis core an enclosing
//! harness plugs into, consuming an [`Ir`](ir::Ir) and a [`Cfg`](cfg::Cfg)
//! it already has.
//!
//! ## Features
#![doc = document_features::document_features!()]

pub mod analysis;
pub mod cfg;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod fact;
pub mod ir;
pub mod result_store;
pub mod value;

pub use analysis::{solve, ConstantPropagation, DataflowAnalysis, DataflowResult};
pub use cfg::{Cfg, CfgBuilder, EdgeKind, NodeId};
pub use config::AnalysisConfig;
pub use error::CoreError;
pub use fact::{CPFact, SetFact};
pub use result_store::{AnalysisId, AnalysisStore};
pub use value::Value;
