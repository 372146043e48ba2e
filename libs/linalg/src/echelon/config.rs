//! Reducer configuration.

/// Reducer configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ReducerConfig {
    /// Maximum number of reduction iterations, `rows + columns` when not set.
    pub max_iterations: Option<usize>,
}

impl ReducerConfig {
    /// Iteration limit for a matrix of the given shape.
    pub fn iteration_limit(&self, nrows: usize, ncols: usize) -> usize {
        self.max_iterations.unwrap_or_else(|| nrows.saturating_add(ncols))
    }
}
