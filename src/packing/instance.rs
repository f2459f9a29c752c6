//! Packing instance parameters.

use thiserror::Error;

/// Default constant used for the disk-area lower bound.
///
/// Note: this is not the exact value of π — it differs in the third
/// decimal (3.1459 vs 3.14159…). It is kept as the default so that
/// derived bounds reproduce earlier runs exactly; pass
/// `std::f64::consts::PI` to [`PackingInstance::with_pi`] for an exact
/// bound.
pub const DEFAULT_PI: f64 = 3.1459;

/// Default upper bound for positions and rectangle side lengths.
pub const DEFAULT_SIDE_LIMIT: f64 = 80.0;

/// Default separation margin subtracted from radius sums.
///
/// Keeps pairwise non-overlap constraints away from the exactly-tangent
/// case, which is numerically degenerate for NLP solvers.
pub const DEFAULT_MARGIN: f64 = 0.1;

/// Radii of the built-in 14-circle instance.
pub const DEFAULT_RADII: [f64; 14] = [
    13.0, 13.0, 8.0, 8.0, 8.0, 8.0, 8.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0,
];

/// A circle of the instance: its index and prescribed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub id: usize,
    pub radius: f64,
}

/// An initial placement hint: one `(x, y)` center per circle plus the
/// rectangle dimensions it occupies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarmStart {
    pub positions: Vec<(f64, f64)>,
    pub width: f64,
    pub height: f64,
}

/// Errors detected while validating instance parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstanceError {
    #[error("circle {index}: radius {value} must be positive and finite")]
    InvalidRadius { index: usize, value: f64 },

    #[error("side limit {0} must be positive and finite")]
    InvalidSideLimit(f64),

    #[error("margin {0} must be nonnegative and finite")]
    InvalidMargin(f64),

    #[error("pi constant {0} must be positive and finite")]
    InvalidPi(f64),

    #[error("area cutoff {0} must be positive and finite")]
    InvalidAreaCutoff(f64),

    #[error("warm start has {actual} positions, instance has {expected} circles")]
    WarmStartLength { expected: usize, actual: usize },
}

/// Immutable parameters of one packing problem.
///
/// Holds the ordered radii list and the formulation knobs: side limit,
/// separation margin, the π constant for the area lower bound, an
/// optional area cutoff, optional symmetry breaking, and an optional
/// warm start. `Default` is the built-in 14-circle instance.
///
/// # Examples
///
/// ```
/// use u_circlepack::packing::PackingInstance;
///
/// let instance = PackingInstance::new(vec![5.0, 5.0, 3.0])
///     .with_side_limit(40.0)
///     .with_margin(0.05);
/// assert!(instance.validate().is_ok());
/// assert_eq!(instance.circle_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackingInstance {
    radii: Vec<f64>,
    side_limit: f64,
    margin: f64,
    pi: f64,
    area_cutoff: Option<f64>,
    symmetry_breaking: bool,
    warm_start: Option<WarmStart>,
}

impl Default for PackingInstance {
    fn default() -> Self {
        Self::new(DEFAULT_RADII.to_vec())
    }
}

impl PackingInstance {
    /// Creates an instance with the given radii and default parameters.
    pub fn new(radii: Vec<f64>) -> Self {
        Self {
            radii,
            side_limit: DEFAULT_SIDE_LIMIT,
            margin: DEFAULT_MARGIN,
            pi: DEFAULT_PI,
            area_cutoff: None,
            symmetry_breaking: false,
            warm_start: None,
        }
    }

    pub fn with_side_limit(mut self, side_limit: f64) -> Self {
        self.side_limit = side_limit;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Overrides the π constant used for the area lower bound.
    pub fn with_pi(mut self, pi: f64) -> Self {
        self.pi = pi;
        self
    }

    /// Caps the area variable from above.
    pub fn with_area_cutoff(mut self, cutoff: f64) -> Self {
        self.area_cutoff = Some(cutoff);
        self
    }

    /// Enables lexicographic x-ordering within equal-radius groups.
    ///
    /// Adds one linear order constraint per consecutive pair of circles
    /// sharing a radius. Prunes permutation-symmetric solutions; off by
    /// default so the base constraint counts stay untouched.
    pub fn with_symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    /// Supplies an initial placement hint forwarded to the solver.
    pub fn with_warm_start(mut self, warm_start: WarmStart) -> Self {
        self.warm_start = Some(warm_start);
        self
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn circle_count(&self) -> usize {
        self.radii.len()
    }

    /// Circles in index order.
    pub fn circles(&self) -> impl Iterator<Item = Circle> + '_ {
        self.radii
            .iter()
            .enumerate()
            .map(|(id, &radius)| Circle { id, radius })
    }

    pub fn side_limit(&self) -> f64 {
        self.side_limit
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn pi(&self) -> f64 {
        self.pi
    }

    pub fn area_cutoff(&self) -> Option<f64> {
        self.area_cutoff
    }

    pub fn symmetry_breaking(&self) -> bool {
        self.symmetry_breaking
    }

    pub fn warm_start(&self) -> Option<&WarmStart> {
        self.warm_start.as_ref()
    }

    /// Lower bound on the rectangle area: total disk area under this
    /// instance's π constant.
    pub fn area_lower_bound(&self) -> f64 {
        super::bounds::area_lower_bound(&self.radii, self.pi)
    }

    /// Maximal groups of circle indices sharing a radius, in order of
    /// first occurrence. Exact value equality; radii are configuration
    /// constants, not computed quantities.
    pub(crate) fn equal_radius_groups(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<(u64, Vec<usize>)> = Vec::new();
        for (i, r) in self.radii.iter().enumerate() {
            let key = r.to_bits();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(i),
                None => groups.push((key, vec![i])),
            }
        }
        groups.into_iter().map(|(_, members)| members).collect()
    }

    /// Checks all parameters.
    pub fn validate(&self) -> Result<(), InstanceError> {
        for (index, &value) in self.radii.iter().enumerate() {
            if !(value > 0.0 && value.is_finite()) {
                return Err(InstanceError::InvalidRadius { index, value });
            }
        }
        if !(self.side_limit > 0.0 && self.side_limit.is_finite()) {
            return Err(InstanceError::InvalidSideLimit(self.side_limit));
        }
        if !(self.margin >= 0.0 && self.margin.is_finite()) {
            return Err(InstanceError::InvalidMargin(self.margin));
        }
        if !(self.pi > 0.0 && self.pi.is_finite()) {
            return Err(InstanceError::InvalidPi(self.pi));
        }
        if let Some(cutoff) = self.area_cutoff {
            if !(cutoff > 0.0 && cutoff.is_finite()) {
                return Err(InstanceError::InvalidAreaCutoff(cutoff));
            }
        }
        if let Some(ws) = &self.warm_start {
            if ws.positions.len() != self.radii.len() {
                return Err(InstanceError::WarmStartLength {
                    expected: self.radii.len(),
                    actual: ws.positions.len(),
                });
            }
        }
        Ok(())
    }
}
