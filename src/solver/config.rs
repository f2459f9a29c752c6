//! Solver configuration.

/// Configuration knobs shared by solver implementations.
///
/// # Examples
///
/// ```
/// use u_circlepack::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_time_limit_ms(5_000)
///     .with_restarts(8)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Maximum wall-clock solve time in milliseconds.
    pub time_limit_ms: i64,

    /// Total iteration budget, split across restarts.
    pub max_iterations: usize,

    /// Number of independent starts (the first uses the model's warm
    /// start when present).
    pub restarts: usize,

    /// Feasibility tolerance for constraint satisfaction checks.
    pub tolerance: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
            max_iterations: 20_000,
            restarts: 4,
            tolerance: 1e-6,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit_ms(mut self, ms: i64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_limit_ms <= 0 {
            return Err("time_limit_ms must be positive".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be positive".into());
        }
        if self.restarts == 0 {
            return Err("restarts must be positive".into());
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(format!("tolerance must be positive, got {}", self.tolerance));
        }
        Ok(())
    }
}
