//! Keyed storage for previously computed analysis results.
//!
//! Spec §6 describes `IR::getResult(analysisId)` as "a keyed retrieval of a
//! previously stored analysis result" without prescribing how the key or the
//! storage work. Rather than stringly-typed keys throughout the crate, this
//! promotes the two identifiers this core actually exposes —
//! `"constprop"` and `"deadcode"` — to a closed [`AnalysisId`] enum that
//! still [`Display`](std::fmt::Display)s as those exact strings for any
//! external registry that wants them.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::error::CoreError;

/// The identifier of one of the two analyses this crate exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisId {
    /// The constant-propagation analysis, `"constprop"`.
    ConstProp,
    /// The dead-code detector, `"deadcode"`.
    DeadCode,
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ConstProp => "constprop",
            Self::DeadCode => "deadcode",
        };
        f.write_str(s)
    }
}

/// A type-erased store of analysis results, keyed by [`AnalysisId`].
///
/// This is ambient plumbing for the "provided to the core" `IR::getResult`
/// surface of spec §6; the constant-propagation and dead-code
/// implementations in this crate take their inputs directly as typed
/// arguments rather than going through this store (see `DESIGN.md`), so this
/// type matters only to callers that want a single place to stash and later
/// retrieve results by id.
#[derive(Debug, Default)]
pub struct AnalysisStore {
    results: HashMap<AnalysisId, Box<dyn Any>>,
}

impl AnalysisStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a result under the given id, overwriting any previous value.
    pub fn insert<T: 'static>(&mut self, id: AnalysisId, value: T) {
        self.results.insert(id, Box::new(value));
    }

    /// Retrieves a previously stored result, downcast to `T`.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingResult`] if nothing was stored under `id`.
    ///
    /// # Panics
    /// Panics if a value was stored under `id` but at a different type than
    /// `T` — a caller-side programming bug (storing and retrieving under
    /// mismatched types), not a recoverable condition.
    pub fn get<T: 'static>(&self, id: AnalysisId) -> Result<&T, CoreError> {
        let value = self.results.get(&id).ok_or(CoreError::MissingResult(id))?;
        Ok(value
            .downcast_ref::<T>()
            .expect("analysis result stored under a mismatched type"))
    }
}
