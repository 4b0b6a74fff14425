//! Linking options and configuration.

/// Options for linking service responses into tables.
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// How raw grid indices are validated
    pub index_policy: IndexPolicy,

    /// Error handling mode for batches of tables
    pub error_mode: ErrorMode,

    /// Whether to link batches in parallel
    pub parallel: bool,
}

impl LinkOptions {
    /// Create new link options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set index policy.
    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    /// Treat index 0 as a reserved, invalid reference.
    pub fn reserve_zero_index(mut self) -> Self {
        self.index_policy = IndexPolicy::ReserveZero;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip tables that fail to link).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            index_policy: IndexPolicy::Strict,
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

/// Which raw grid indices are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// Any index in `0..cell_count`
    #[default]
    Strict,
    /// Like `Strict`, but index 0 is rejected
    ReserveZero,
}

impl IndexPolicy {
    /// Resolve a raw grid value against a cell list of `len` entries.
    pub fn resolve(self, index: i64, len: usize) -> Option<usize> {
        if self == IndexPolicy::ReserveZero && index == 0 {
            return None;
        }
        usize::try_from(index).ok().filter(|&i| i < len)
    }
}

/// Error handling mode for batch linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the whole batch on the first malformed table
    #[default]
    Strict,
    /// Skip malformed tables and continue
    Lenient,
}
