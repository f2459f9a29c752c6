//! Fixed-radius circle packing formulation.
//!
//! Compiles a [`PackingInstance`] into a nonconvex NLP: minimize the area
//! of the axis-aligned bounding rectangle containing all circles without
//! overlap. Positions and rectangle dimensions are continuous variables;
//! boundary constraints are linear, the area link and the pairwise
//! non-overlap constraints are quadratic.
//!
//! # Key Components
//!
//! - [`PackingInstance`] — radii and formulation parameters
//! - [`build_model`] — instance to solver-ready [`Model`](crate::model::Model)
//! - [`area_lower_bound`] — total disk area, the provable objective floor
//! - [`shelf_layout`] — greedy feasible layout used as a warm start
//! - [`PackingReport`] — solution values rendered back into geometry

mod bounds;
mod formulation;
mod heuristic;
mod instance;
mod report;

pub use bounds::area_lower_bound;
pub use formulation::{build_model, FormulationError, PackingModel, PackingVars};
pub use heuristic::shelf_layout;
pub use instance::{
    Circle, InstanceError, PackingInstance, WarmStart, DEFAULT_MARGIN, DEFAULT_PI, DEFAULT_RADII,
    DEFAULT_SIDE_LIMIT,
};
pub use report::{PackingReport, Placement};
