//! Configuration for recordkv
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for an Engine instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Secondary Index Configuration
    // -------------------------------------------------------------------------
    /// How surnames and query prefixes are folded before they reach the
    /// secondary index
    pub case_folding: CaseFolding,

    // -------------------------------------------------------------------------
    // Instrumentation Configuration
    // -------------------------------------------------------------------------
    /// Log a warning when a single query costs more comparisons than this
    pub cost_warn_threshold: Option<u64>,
}

/// Case folding applied to surname keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseFolding {
    /// Full Unicode lowercase mapping
    #[default]
    Unicode,

    /// ASCII letters only; other characters are left untouched
    Ascii,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_folding: CaseFolding::Unicode,
            cost_warn_threshold: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the surname case folding
    pub fn case_folding(mut self, folding: CaseFolding) -> Self {
        self.config.case_folding = folding;
        self
    }

    /// Warn when a query exceeds `comparisons`
    pub fn cost_warn_threshold(mut self, comparisons: u64) -> Self {
        self.config.cost_warn_threshold = Some(comparisons);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
