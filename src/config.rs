//! Configuration passed through to analysis constructors.

/// An opaque configuration object threaded through to analysis
/// constructors.
///
/// Per §6 of the design, the core never interprets this — it is a pass-through
/// for whatever knobs the enclosing analysis harness (out of scope for this
/// crate) wants its analyses to see, e.g. which variables to seed as
/// interprocedurally-tainted, or a verbosity level for a future diagnostic
/// renderer. The fields below are placeholders a harness can extend; none of
/// them change the behavior of [`ConstantPropagation`](crate::analysis::ConstantPropagation)
/// or [`dead_code::detect`](crate::analysis::dead_code::detect).
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    options: std::collections::BTreeMap<String, String>,
}

impl AnalysisConfig {
    /// An empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an opaque `key = value` option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Reads back an opaque option previously set with
    /// [`with_option`](Self::with_option).
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}
